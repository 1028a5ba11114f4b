use serde::Serialize;

/// Pretty JSON with a trailing newline.
pub fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
