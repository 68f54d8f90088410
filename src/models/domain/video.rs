use std::fmt;

use reqwest::Url;
use serde::Serialize;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Canonical reference to a video, as sent to the model backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoReference(String);

impl VideoReference {
    /// Normalises a full URL or a bare video id.
    ///
    /// YouTube URLs collapse to `https://www.youtube.com/watch?v=<id>`; other
    /// URLs are kept as given. Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Some(Self::from_id(raw));
        }

        let reference = Url::parse(raw)
            .ok()
            .and_then(|url| youtube_id(&url))
            .map(|id| Self::from_id(&id))
            .unwrap_or_else(|| VideoReference(raw.to_string()));

        Some(reference)
    }

    fn from_id(id: &str) -> Self {
        VideoReference(format!("{}{}", WATCH_URL, id))
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn youtube_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("shorts") | Some("embed") | Some("live") | Some("v") => {
                segments.next().map(str::to_string)
            }
            _ => None,
        },
        _ => None,
    };

    id.filter(|id| !id.is_empty())
}

/// Optional descriptive details embedded into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
    pub upload_date: String,
}
