//! LaTeX special-character escaping.
//!
//! Applied to every user-text field before interpolation — a single
//! unescaped `\` or `%` can break the whole generated document, so there
//! are no exceptions.

/// Escapes the ten LaTeX-special characters, leaving everything else
/// untouched. The scan is a single left-to-right pass over the input, so a
/// backslash introduced by one substitution is never re-escaped. Total over
/// any string: unrecognized characters pass through rather than erroring.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '$' => out.push_str("\\$"),
            '&' => out.push_str("\\&"),
            '#' => out.push_str("\\#"),
            '^' => out.push_str("\\textasciicircum{}"),
            '_' => out.push_str("\\_"),
            '%' => out.push_str("\\%"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape("Ada Lovelace"), "Ada Lovelace");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_every_special_character_is_mapped() {
        assert_eq!(escape("\\"), "\\textbackslash{}");
        assert_eq!(escape("{"), "\\{");
        assert_eq!(escape("}"), "\\}");
        assert_eq!(escape("$"), "\\$");
        assert_eq!(escape("&"), "\\&");
        assert_eq!(escape("#"), "\\#");
        assert_eq!(escape("^"), "\\textasciicircum{}");
        assert_eq!(escape("_"), "\\_");
        assert_eq!(escape("%"), "\\%");
        assert_eq!(escape("~"), "\\textasciitilde{}");
    }

    #[test]
    fn test_mixed_text_escapes_in_place() {
        assert_eq!(
            escape("C# & 100% profit_margin"),
            "C\\# \\& 100\\% profit\\_margin"
        );
    }

    #[test]
    fn test_backslash_substitution_is_not_re_escaped() {
        // The braces and backslashes produced by escaping `\` must survive
        // as-is; only the original input characters get substituted.
        assert_eq!(escape("\\%"), "\\textbackslash{}\\%");
        assert_eq!(escape("\\{"), "\\textbackslash{}\\{");
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(escape("Zoë — Génie Logiciel"), "Zoë — Génie Logiciel");
    }

    #[test]
    fn test_escaped_output_has_balanced_braces() {
        let out = escape("a{b}c\\d^e~f");
        let opens = out.matches('{').count();
        let closes = out.matches('}').count();
        assert_eq!(opens, closes);
    }
}
