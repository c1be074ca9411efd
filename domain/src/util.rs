//! Shared utility functions.

/// Single-line preview of `s` for log messages.
///
/// Newlines are flattened to spaces and the result is cut to at most
/// `max_bytes` bytes on a UTF-8 character boundary, with `...` appended when
/// anything was dropped.
pub fn log_preview(s: &str, max_bytes: usize) -> String {
    let flat = s.replace(['\r', '\n'], " ");
    if flat.len() <= max_bytes {
        return flat;
    }
    let mut end = max_bytes;
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &flat[..end])
}
