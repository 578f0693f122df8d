// DNS-safe naming
//
// Display names from the controller ("Bob's Laptop", "Living Room AP")
// are turned into strings usable as a single DNS label.

/// Longest permitted DNS label, in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// Sanitize a display name into a DNS label.
///
/// Lowercases ASCII letters, drops apostrophes, collapses every other run of
/// characters outside `[a-z0-9]` into one `-`, trims leading and trailing
/// hyphens, and truncates to [`MAX_LABEL_LEN`]. The output only ever
/// contains `[a-z0-9-]`; a name with no alphanumerics yields an empty string.
pub fn dns_safe_name(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if matches!(ch, '\'' | '\u{2019}') {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !label.is_empty() {
                label.push('-');
            }
            pending_hyphen = false;
            label.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    label.truncate(MAX_LABEL_LEN);
    let trimmed_len = label.trim_end_matches('-').len();
    label.truncate(trimmed_len);
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_label_safe(s: &str) -> bool {
        s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    }

    #[test]
    fn possessive_names() {
        assert_eq!(dns_safe_name("Bob's Laptop"), "bobs-laptop");
        assert_eq!(dns_safe_name("Anna\u{2019}s iPhone"), "annas-iphone");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(dns_safe_name("  Living Room -- AP  "), "living-room-ap");
        assert_eq!(dns_safe_name("NoIP_Device.local"), "noip-device-local");
        assert_eq!(dns_safe_name("--edge--"), "edge");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(dns_safe_name("Café Büro"), "caf-b-ro");
    }

    #[test]
    fn empty_when_nothing_usable() {
        assert_eq!(dns_safe_name(""), "");
        assert_eq!(dns_safe_name("!!!"), "");
    }

    #[test]
    fn truncates_to_label_limit() {
        let long = "a".repeat(62) + " b" + &"c".repeat(10);
        let out = dns_safe_name(&long);
        assert!(out.len() <= MAX_LABEL_LEN);
        assert!(!out.ends_with('-'));
        assert_eq!(out, "a".repeat(62));
    }

    #[test]
    fn deterministic_and_safe() {
        for name in ["Bob's Laptop", "UPPER lower 123", "tab\there", "ÆØÅ", "x"] {
            let first = dns_safe_name(name);
            assert_eq!(first, dns_safe_name(name));
            assert!(is_label_safe(&first), "{first:?} from {name:?}");
        }
    }
}
