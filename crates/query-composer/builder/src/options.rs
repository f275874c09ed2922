//! Composer configuration: placeholder tokens and clause format strings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// The tokens and format strings a query template may reference.
///
/// A template opts in to explicit clause placement by containing one of the
/// placeholder words; clauses without a declared placeholder are appended or
/// wrapped around the template at build time. Options are copied into each
/// composer at construction and are immutable once the composer is
/// initialized.
///
/// All fields are optional when deserialized; defaults target an ANSI-ish
/// `LIMIT`/`OFFSET` dialect and can be overridden per backend (for example a
/// `OFFSET {1} ROWS FETCH NEXT {0} ROWS ONLY` pagination format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposerOptions {
    /// Template token replaced by the accumulated text-search clause.
    pub search_word: String,
    /// Template token replaced by the accumulated filter clause.
    pub filter_word: String,
    /// Template token replaced by the accumulated sort list.
    pub order_word: String,
    /// Template token replaced by the current page number.
    pub current_page_word: String,
    /// Template token replaced by the page size.
    pub page_size_word: String,
    /// Template token replaced by the computed start row.
    pub start_row_word: String,
    /// Prefix of parameter references in the query text, e.g. `@`.
    pub param_sign: String,
    /// Format of a field reference; `{0}` is the field name.
    pub field_format: String,
    /// Format of a date comparison; `{0}` field, `{1}` operator, `{2}` parameter.
    pub date_compare_format: String,
    /// Format of the contains operator appended to a field reference; `{0}` is
    /// the parameter reference.
    pub contains_format: String,
    /// Format of an implicit order clause; `{0}` is the sort list.
    pub order_by_format: String,
    /// Format of a pagination clause; `{0}` page size, `{1}` start row.
    pub pagination_format: String,
    /// No-op predicate substituted when a search placeholder has no runtime value.
    pub empty_search: String,
    /// No-op predicate substituted when a filter placeholder has no runtime value.
    pub empty_filter: String,
    /// Sort list used when no sort fields were supplied.
    pub empty_order: String,
    /// Page size of the pagination clause synthesized when none was requested.
    pub default_page_size: i64,
    /// Start row of the pagination clause synthesized when none was requested.
    pub default_start_row: i64,
}

impl Default for ComposerOptions {
    fn default() -> ComposerOptions {
        ComposerOptions {
            search_word: "$$SEARCH$$".to_string(),
            filter_word: "$$FILTER$$".to_string(),
            order_word: "$$ORDER$$".to_string(),
            current_page_word: "$$CURRENTPAGE$$".to_string(),
            page_size_word: "$$NUMBERPAGE$$".to_string(),
            start_row_word: "$$STARTROW$$".to_string(),
            param_sign: "@".to_string(),
            field_format: "{0}".to_string(),
            date_compare_format: "date({0}) {1} date({2})".to_string(),
            contains_format: " LIKE '%' || {0} || '%'".to_string(),
            order_by_format: "ORDER BY {0}".to_string(),
            pagination_format: "LIMIT {0} OFFSET {1}".to_string(),
            empty_search: "1=1".to_string(),
            empty_filter: "1=1".to_string(),
            empty_order: "1 asc".to_string(),
            default_page_size: 10,
            default_start_row: 0,
        }
    }
}

impl ComposerOptions {
    /// Check that every token is present and every format string carries the
    /// slots the composer renders into. Called once, at initialization.
    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        let tokens: [(&'static str, &str); 7] = [
            ("searchWord", &self.search_word),
            ("filterWord", &self.filter_word),
            ("orderWord", &self.order_word),
            ("currentPageWord", &self.current_page_word),
            ("pageSizeWord", &self.page_size_word),
            ("startRowWord", &self.start_row_word),
            ("paramSign", &self.param_sign),
        ];
        for (name, token) in tokens {
            if token.is_empty() {
                return Err(ConfigurationError::EmptyToken(name));
            }
        }

        let formats: [(&'static str, &str, &[&'static str]); 5] = [
            ("fieldFormat", &self.field_format, &["{0}"]),
            (
                "dateCompareFormat",
                &self.date_compare_format,
                &["{0}", "{1}", "{2}"],
            ),
            ("containsFormat", &self.contains_format, &["{0}"]),
            ("orderByFormat", &self.order_by_format, &["{0}"]),
            ("paginationFormat", &self.pagination_format, &["{0}", "{1}"]),
        ];
        for (name, format, slots) in formats {
            for slot in slots {
                if !format.contains(slot) {
                    return Err(ConfigurationError::MissingSlot { format: name, slot });
                }
            }
        }

        if self.default_page_size < 0 {
            return Err(ConfigurationError::NegativeDefault("defaultPageSize"));
        }
        if self.default_start_row < 0 {
            return Err(ConfigurationError::NegativeDefault("defaultStartRow"));
        }
        Ok(())
    }
}
