//! Tolerant parsing for loosely formatted JSON returned by language models.
//!
//! Models regularly wrap their answer in Markdown code fences or prepend a
//! sentence of prose. Parsing tries the raw text first and falls back to the
//! first balanced JSON value found in the response.

use crate::error::AppError;
use serde_json::Value;

/// Parse model output as JSON, stripping code fences and surrounding prose.
pub fn parse_json_relaxed(input: &str) -> Result<Value, AppError> {
    let text = strip_code_fences(input);
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Ok(v);
    }
    let span = extract_first_balanced(text).ok_or_else(|| {
        AppError::MalformedResponse("no JSON object found in model response".into())
    })?;
    serde_json::from_str::<Value>(span)
        .map_err(|e| AppError::MalformedResponse(format!("invalid JSON in model response: {e}")))
}

/// Remove Markdown code fences around a JSON snippet.
fn strip_code_fences(s: &str) -> &str {
    let s = s.trim();
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .unwrap_or(s);
    let s = s.trim_start();
    let s = s.strip_suffix("```").unwrap_or(s);
    s.trim()
}

/// Locate the first balanced `{...}` or `[...]` span in the input, skipping
/// brackets inside string literals.
fn extract_first_balanced(s: &str) -> Option<&str> {
    let mut in_str = false;
    let mut escaped = false;
    let mut depth: Vec<char> = Vec::new();
    let mut start = None;

    for (i, ch) in s.char_indices() {
        if in_str {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_str = false;
            }
            continue;
        }
        match ch {
            '"' => in_str = true,
            '{' | '[' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth.push(ch);
            }
            '}' | ']' => {
                let Some(open) = depth.pop() else {
                    start = None;
                    continue;
                };
                let balanced = (open == '{' && ch == '}') || (open == '[' && ch == ']');
                if !balanced {
                    depth.clear();
                    start = None;
                    continue;
                }
                if depth.is_empty() {
                    return Some(&s[start?..i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
