//! Log hygiene for strings that originate in the game world (store names,
//! search terms). Keeps every log line single-line and bounded.

/// Escape a world-supplied string for logging: newlines, tabs and other
/// control characters become visible escapes, and very long values are cut
/// with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 120;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn control_characters_become_visible() {
        assert_eq!(escape_log("Stand\nOne\t#2"), "Stand\\nOne\\t#2");
        assert_eq!(escape_log("bell\x07"), "bell\\x07");
    }

    #[test]
    fn long_names_are_cut() {
        let long = "s".repeat(300);
        let escaped = escape_log(&long);
        assert!(escaped.chars().count() <= 121);
        assert!(escaped.ends_with('…'));
    }
}
