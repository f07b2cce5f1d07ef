//! Molecular formula markup conversion
//!
//! Rewrites a plain-text molecular formula so that every digit run following
//! a letter run is wrapped in a `<sub>` element, e.g. `C6H12O6` becomes
//! `C<sub>6</sub>H<sub>12</sub>O<sub>6</sub>`.

/// Converts a molecular formula to `<sub>`-tagged markup
///
/// The input is scanned as a sequence of (letter run, optional digit run)
/// tokens. A token without digits emits just its letters; a token with
/// digits emits `letters<sub>digits</sub>`. Tokens are concatenated without
/// separators. Characters that open neither a letter run nor belong to the
/// digit run of the current token are dropped.
///
/// Conversion is idempotent on digit-free formulas: `NaCl` stays `NaCl`.
pub fn convert_formula(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len());
    let mut chars = formula.chars().peekable();

    while let Some(&c) = chars.peek() {
        if !c.is_ascii_alphabetic() {
            chars.next();
            continue;
        }

        // Letter state: consume the element symbol run.
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            out.push(c);
            chars.next();
        }

        // Digit state: consume the optional count run.
        let mut digits = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            chars.next();
        }

        if !digits.is_empty() {
            out.push_str("<sub>");
            out.push_str(&digits);
            out.push_str("</sub>");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formula_is_unchanged() {
        assert_eq!(convert_formula("NaCl"), "NaCl");
    }

    #[test]
    fn test_single_token_with_digits() {
        assert_eq!(convert_formula("H2O"), "H<sub>2</sub>O");
    }

    #[test]
    fn test_every_pair_wrapped_independently() {
        assert_eq!(
            convert_formula("C6H12O6"),
            "C<sub>6</sub>H<sub>12</sub>O<sub>6</sub>"
        );
    }

    #[test]
    fn test_multi_digit_counts() {
        assert_eq!(
            convert_formula("C27H46O"),
            "C<sub>27</sub>H<sub>46</sub>O"
        );
    }

    #[test]
    fn test_trailing_letter_run_without_digits() {
        assert_eq!(
            convert_formula("CH3COOH"),
            "CH<sub>3</sub>COOH"
        );
    }

    #[test]
    fn test_non_token_characters_are_dropped() {
        // Parentheses and the digit following ')' belong to no token.
        assert_eq!(
            convert_formula("(C6H5)2"),
            "C<sub>6</sub>H<sub>5</sub>"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert_formula(""), "");
    }

    #[test]
    fn test_leading_digits_are_dropped() {
        assert_eq!(convert_formula("2H2O"), "H<sub>2</sub>O");
    }
}
