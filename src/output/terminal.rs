//! Field formatting for summary rows.

/// Quote a value, doubling any embedded `"`.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quoted value right-aligned to `width`; never truncated.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = quote(&value.to_string());
    format!("{quoted:>width$}")
}
