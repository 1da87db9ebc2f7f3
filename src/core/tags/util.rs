//! core/tags/util.rs
//! Small helpers shared by tag reading/writing.

/// Decode a 4-byte ID3v2 syncsafe integer (7 significant bits per byte).
/// Returns `None` if any byte has its high bit set.
pub(crate) fn decode_syncsafe(bytes: [u8; 4]) -> Option<u32> {
    if bytes.iter().any(|b| b & 0x80 != 0) {
        return None;
    }

    Some(bytes.iter().fold(0u32, |acc, &b| (acc << 7) | u32::from(b)))
}

/// Normalize a text frame value.
/// - ID3v2.4 multi-value separators (NUL) are joined with "/"
/// - surrounding whitespace is trimmed
/// - empty -> None
pub(crate) fn clean_text(s: &str) -> Option<String> {
    let joined = s
        .split('\0')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() { None } else { Some(joined) }
}

/// Turn user input into an optional value.
/// - empty or whitespace-only -> None
/// - non-empty -> Some(trimmed_string)
pub(crate) fn clean_optional_string(s: Option<&str>) -> Option<String> {
    let trimmed = s?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
