use serde_json::{json, Value};

pub const CASE_STUDY_PRESET_ID: &str = "startup_case_study";

pub fn default_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "keyword": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["summary", "keyword"]
    })
}

fn evidence_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "timestamp": {
                "type": "string",
                "description": "MM:SS, HH:MM:SS, or 'N/A' if not available."
            },
            "snippet": {
                "type": "string",
                "description": "At most 20 words from the video (paraphrase allowed)."
            },
            "note": { "type": ["string", "null"] }
        },
        "required": ["timestamp", "snippet"]
    })
}

fn metric_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "metric_type": {
                "type": "string",
                "enum": [
                    "revenue", "profit", "spend", "burn", "funding", "valuation", "users",
                    "paying_customers", "mau", "dau", "downloads", "price", "arr", "mrr",
                    "growth_rate", "churn", "cac", "ltv", "other"
                ]
            },
            "value": { "type": ["number", "null"] },
            "unit": { "type": ["string", "null"] },
            "time_frame": { "type": ["string", "null"] },
            "confidence": { "type": "string", "enum": ["high", "medium", "low"] },
            "evidence": { "type": "array", "items": evidence_schema() }
        },
        "required": ["metric_type", "confidence", "evidence"]
    })
}

fn product_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": ["string", "null"] },
            "what_it_does": { "type": "string" },
            "target_customer": { "type": ["string", "null"] },
            "business_model": { "type": ["string", "null"] },
            "outcome": { "type": "string", "enum": ["success", "failure", "mixed", "unknown"] },
            "outcome_reasoning": { "type": "string" },
            "status": {
                "type": "string",
                "enum": ["active", "shutdown", "acquired", "pivoted", "unknown"]
            },
            "competitors": { "type": "array", "items": { "type": "string" } },
            "metrics": { "type": "array", "items": metric_schema() },
            "key_lessons": { "type": "array", "items": { "type": "string" } },
            "evidence": { "type": "array", "items": evidence_schema() }
        },
        "required": ["what_it_does", "outcome", "outcome_reasoning"]
    })
}

/// Schema for startup case-study extraction.
pub fn case_study_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "video_url": { "type": "string" },
            "title": { "type": "string" },
            "channel": { "type": "string" },
            "upload_date": {
                "type": "string",
                "description": "YYYY-MM-DD if known, else an empty string."
            },
            "story": {
                "type": "object",
                "properties": {
                    "people": { "type": "array", "items": { "type": "string" } },
                    "background": { "type": ["string", "null"] },
                    "attempts": { "type": "array", "items": { "type": "string" } },
                    "themes": { "type": "array", "items": { "type": "string" } }
                }
            },
            "products": { "type": "array", "items": product_schema() },
            "top_takeaways": { "type": "array", "items": { "type": "string" } },
            "missing_info": { "type": "array", "items": { "type": "string" } },
            "limitations": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["video_url", "story", "products", "top_takeaways"]
    })
}
