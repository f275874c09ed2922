//! Textual helpers for clause injection into hand-written query templates.
//!
//! These operate on unparsed text. Locating a `WHERE` keyword or a closing
//! parenthesis is a best-effort heuristic, not a SQL parse; templates with
//! ambiguous nesting should declare placeholder tokens instead.

/// Render a configured `{0}`/`{1}`-style format string with positional
/// arguments.
pub fn render_format(format: &str, args: &[&str]) -> String {
    let mut rendered = format.to_string();
    for (index, arg) in args.iter().enumerate() {
        rendered = rendered.replace(&format!("{{{index}}}"), arg);
    }
    rendered
}

/// Byte position of the first case-insensitive ` WHERE ` keyword, if any.
pub fn find_where_keyword(text: &str) -> Option<usize> {
    text.to_ascii_uppercase().find(" WHERE ")
}

/// Byte position of the first closing parenthesis, if any.
pub fn find_first_close_paren(text: &str) -> Option<usize> {
    text.find(')')
}

/// The name of the first `{{name}}` template token remaining in `text`.
pub fn find_unresolved_token(text: &str) -> Option<String> {
    let start = text.find("{{")?;
    let rest = &text[start + 2..];
    let end = rest.find("}}")?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn render_format_substitutes_positional_slots() {
        assert_eq!(
            render_format("LIMIT {0} OFFSET {1}", &["25", "50"]),
            "LIMIT 25 OFFSET 50"
        );
        assert_eq!(
            render_format("date({0}) {1} date({2})", &["created", ">", "@p1"]),
            "date(created) > date(@p1)"
        );
    }

    #[test]
    fn where_keyword_search_is_case_insensitive() {
        assert_eq!(find_where_keyword("select * from t where x = 1"), Some(15));
        assert_eq!(find_where_keyword("SELECT * FROM t"), None);
    }

    #[test]
    fn unresolved_token_reports_the_first_name() {
        assert_eq!(
            find_unresolved_token("SELECT * FROM t WHERE a = {{userId}}"),
            Some("userId".to_string())
        );
        assert_eq!(find_unresolved_token("SELECT * FROM t"), None);
    }
}
