//! Entity name and tag sanitizers.
//!
//! Backstage restricts `metadata.name` to `[a-z0-9_.-]` and tags to
//! `[a-z0-9.-]` (no underscores), both capped at 63 characters, the usual
//! label-length constraint. Both functions are pure, total over any input,
//! and idempotent on already-clean input.

/// Maximum length of an entity name or tag.
const MAX_LABEL_LEN: usize = 63;

/// Normalize a string into a valid entity name.
///
/// Trims, lowercases, replaces anything outside `[a-z0-9_.-]` with `-`,
/// collapses doubled underscores, and strips trailing underscores (invalid
/// in entity names). Cleans up formats like `my group (Reader)`.
pub fn normalize_entity_name(name: &str) -> String {
    let mut clean: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    while clean.contains("__") {
        clean = clean.replace("__", "_");
    }

    while clean.ends_with('_') {
        clean.pop();
    }

    // Output is pure ASCII at this point, so byte truncation is safe.
    clean.truncate(MAX_LABEL_LEN);

    // Truncation can expose a trailing underscore again.
    while clean.ends_with('_') {
        clean.pop();
    }

    clean
}

/// Normalize a string into a valid entity tag.
///
/// Like [`normalize_entity_name`], but tags disallow underscores entirely,
/// so `_` is replaced with `-` along with every other invalid character.
pub fn clean_tag(tag: &str) -> String {
    let mut clean: String = tag
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    clean.truncate(MAX_LABEL_LEN);
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const NASTY_INPUTS: &[&str] = &[
        "",
        "   ",
        "My Group (Reader)__x_",
        "AI_ML",
        "___",
        "____",
        "UPPER lower 123",
        "dots.and-dashes_ok",
        "unicode: héllo wörld",
        "ends_with_underscore_",
        "a really really really really really really really long name that overflows the limit",
    ];

    #[test]
    fn normalize_worked_example() {
        assert_eq!(
            normalize_entity_name("My Group (Reader)__x_"),
            "my-group--reader-_x"
        );
    }

    #[test]
    fn normalize_output_charset_and_length() {
        let valid = Regex::new(r"^[a-z0-9_.\-]{0,63}$").unwrap();
        for input in NASTY_INPUTS {
            let out = normalize_entity_name(input);
            assert!(valid.is_match(&out), "invalid output {out:?} for {input:?}");
            assert!(!out.ends_with('_'), "trailing underscore in {out:?}");
            assert!(!out.contains("__"), "doubled underscore in {out:?}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in NASTY_INPUTS {
            let once = normalize_entity_name(input);
            assert_eq!(normalize_entity_name(&once), once);
        }
    }

    #[test]
    fn normalize_collapses_underscore_runs_fully() {
        assert_eq!(normalize_entity_name("a____b"), "a_b");
        assert_eq!(normalize_entity_name("____"), "");
    }

    #[test]
    fn clean_tag_worked_example() {
        assert_eq!(clean_tag("AI_ML"), "ai-ml");
    }

    #[test]
    fn clean_tag_output_charset_and_length() {
        let valid = Regex::new(r"^[a-z0-9.\-]{0,63}$").unwrap();
        for input in NASTY_INPUTS {
            let out = clean_tag(input);
            assert!(valid.is_match(&out), "invalid output {out:?} for {input:?}");
        }
    }

    #[test]
    fn clean_tag_is_idempotent() {
        for input in NASTY_INPUTS {
            let once = clean_tag(input);
            assert_eq!(clean_tag(&once), once);
        }
    }

    #[test]
    fn already_clean_input_passes_through() {
        assert_eq!(normalize_entity_name("awesome-azd"), "awesome-azd");
        assert_eq!(clean_tag("python"), "python");
    }
}
