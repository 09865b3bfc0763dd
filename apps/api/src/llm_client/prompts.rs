// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

use serde_json::{json, Value};

/// Closing instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JSON schema for an object holding one required array of strings under `field`.
pub fn string_list_schema(field: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": [field]
    })
}
