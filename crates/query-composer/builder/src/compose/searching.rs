//! Free-text search across named fields.

use query_composer_sql::helpers::render_format;
use query_composer_sql::string::{ComposedQuery, ParameterValue};

use crate::options::ComposerOptions;

/// Render one contains-condition per search field, all bound to the same
/// literal `text` under distinct synthetic parameters. Fragments are joined
/// with ` OR ` at finalization.
pub(crate) fn translate_text_search(
    options: &ComposerOptions,
    query: &mut ComposedQuery,
    text: &str,
    search_fields: &[String],
) -> Vec<String> {
    search_fields
        .iter()
        .map(|field| {
            let name = query.bind(ParameterValue::Text(text.to_string()));
            let param_ref = format!("{}{}", options.param_sign, name);
            format!(
                "{}{}",
                render_format(&options.field_format, &[field]),
                render_format(&options.contains_format, &[&param_ref])
            )
        })
        .collect()
}
