use crate::models::domain::{VideoMetadata, VideoReference};

pub const DEFAULT_PROMPT: &str =
    "Summarize the YouTube video. Return a short summary and a list of keywords.";

pub const CASE_STUDY_PROMPT: &str = r#"You are extracting structured startup case-study facts from a YouTube video.

## HARD RULES

- Only extract facts that are explicitly stated or shown in the video.
- Never infer numbers (revenue, users, spend, funding, ...). When a figure is not stated, set the field to null and list it under missing_info.
- Approximate figures ("~", "about", "around") are kept and marked with confidence "medium".
- Unclear or ambiguous figures get value null, an explanation in notes and an entry in missing_info.
- Outcome labels:
  - "success" only when the video clearly claims meaningful success (profitability, significant revenue or users, acquisition, strong growth).
  - "failure" only when the video clearly says the venture failed, shut down, ran out of money or never found product-market fit.
  - Otherwise "mixed" or "unknown", with the reasoning spelled out.
- Competitors: only those named in the video.

## EVIDENCE

- Every important claim (metrics, outcome, competitors, key decisions) carries at least one evidence item with an MM:SS timestamp and a snippet of at most 20 words.
- When timestamps cannot be given reliably, use "N/A" and explain why under limitations.

## EXTRACT

- who the people are, when stated
- what they built
- the outcome with its reasoning
- metrics, only when explicitly stated
- competitors, only when explicitly named
- important facts the video does not provide, under missing_info

## OUTPUT

Return ONLY valid JSON matching the provided schema."#;

const SCHEMA_INFERENCE_INSTRUCTIONS: &str = r#"You are designing a JSON Schema for a structured summary of a video.

Treat the user's prompt as guidance and return ONLY a JSON Schema object:
- It must be a single JSON object with "type": "object".
- Properties use the types string, number, boolean, array or object.
- Array items are strings unless the prompt clearly calls for objects.
- Nest at most one level deep.
- Add a "required" list naming the essential fields."#;

/// Appends the video metadata block and the output instruction to a user prompt.
pub fn build_video_prompt(
    base_prompt: &str,
    video: &VideoReference,
    metadata: &VideoMetadata,
) -> String {
    format!(
        "{base}\n\nVIDEO METADATA (use exactly):\n- video_url: {url}\n- title: {title}\n- channel: {channel}\n- upload_date: {date}\n\nReturn ONLY valid JSON that matches the provided schema.\n",
        base = base_prompt.trim_end(),
        url = video,
        title = metadata.title,
        channel = metadata.channel,
        date = metadata.upload_date,
    )
}

pub fn build_schema_inference_prompt(user_prompt: &str) -> String {
    format!(
        "{}\n\nUser prompt:\n{}\n",
        SCHEMA_INFERENCE_INSTRUCTIONS,
        user_prompt.trim()
    )
}
