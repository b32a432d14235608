//! Rule string tokenizer

use once_cell::sync::Lazy;
use regex::Regex;

/// Lexical pattern, in match-preference order: word characters, two-char
/// comparison operators, single-char comparison operators, parentheses,
/// quoted literals (quotes retained in the lexeme).
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\w+|<=|>=|<>|!=|=|<|>|\(|\)|'[^']*'|"[^"]*""#).expect("token pattern compiles")
});

/// Split a raw rule string into token lexemes.
///
/// Whitespace and anything else that matches no pattern is silently
/// dropped; unmatched input yields an empty sequence, not an error.
/// Malformed-rule detection belongs to the parser.
pub fn tokenize(rule: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(rule)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_rule() {
        assert_eq!(tokenize("age > 30"), vec!["age", ">", "30"]);
    }

    #[test]
    fn test_tokenize_keywords_and_parens() {
        assert_eq!(
            tokenize("(age > 30 AND department = 'Sales') OR experience >= 5"),
            vec![
                "(",
                "age",
                ">",
                "30",
                "AND",
                "department",
                "=",
                "'Sales'",
                ")",
                "OR",
                "experience",
                ">=",
                "5"
            ]
        );
    }

    #[test]
    fn test_tokenize_two_char_operators() {
        assert_eq!(tokenize("a <= 1"), vec!["a", "<=", "1"]);
        assert_eq!(tokenize("a >= 1"), vec!["a", ">=", "1"]);
        assert_eq!(tokenize("a <> 1"), vec!["a", "<>", "1"]);
        assert_eq!(tokenize("a != 1"), vec!["a", "!=", "1"]);
    }

    #[test]
    fn test_tokenize_quoted_literals_keep_quotes() {
        assert_eq!(
            tokenize(r#"city = "New York""#),
            vec!["city", "=", "\"New York\""]
        );
        assert_eq!(tokenize("city = 'Austin'"), vec!["city", "=", "'Austin'"]);
    }

    #[test]
    fn test_tokenize_is_whitespace_insensitive() {
        assert_eq!(tokenize("age>30"), tokenize("age  >   30"));
    }

    #[test]
    fn test_tokenize_drops_unmatched_input() {
        assert_eq!(tokenize("age # 30"), vec!["age", "30"]);
        assert!(tokenize("@#$%").is_empty());
        assert!(tokenize("").is_empty());
    }
}
