use std::path::Path;

/// Byte limit for the message preview stored alongside each dispatch.
pub const MESSAGE_PREVIEW_MAX_BYTES: usize = 256;

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

pub fn truncate_string(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        if truncated.len() + ch.len_utf8() > max_bytes {
            break;
        }
        truncated.push(ch);
    }
    truncated
}

/// Shorten to `max_chars` characters, marking the cut with `…`.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

/// Hide all but the last four digits of a phone-like value.
///
/// Values with fewer than four digits are returned trimmed but otherwise
/// unchanged.
pub fn mask_digits(value: &str) -> String {
    let trimmed = value.trim();
    let digits: Vec<char> = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return trimmed.to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("...{tail}")
}
