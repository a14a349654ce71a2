use crate::utils::error::{BepError, Result};

/// Removes a surrounding ```json / ``` fence, if any.
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```JSON"))
        .or_else(|| trimmed.strip_prefix("```"));

    match unfenced {
        Some(body) => body.strip_suffix("```").unwrap_or(body).trim(),
        None => trimmed,
    }
}

/// Parses a model response body as JSON. Absent or blank bodies read as an
/// empty object.
pub fn parse_json_body(body: Option<&str>) -> Result<serde_json::Value> {
    let body = match body.map(strip_code_fence) {
        Some(text) if !text.is_empty() => text,
        _ => "{}",
    };

    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(120).collect();
        BepError::parse(format!("{} (body starts with: {:?})", e, preview))
    })
}
