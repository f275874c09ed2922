//! Sort specifications and their rendering into an order list.

use query_composer_sql::helpers::render_format;
use serde::{Deserialize, Serialize};

use crate::options::ComposerOptions;

/// A single sort field with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortableField {
    pub field_name: String,
    pub sort_type: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Render sort fields into `<field> <asc|desc>` fragments, joined with a
/// comma at finalization.
pub(crate) fn translate_sort(options: &ComposerOptions, sorts: &[SortableField]) -> Vec<String> {
    sorts
        .iter()
        .map(|sort| {
            format!(
                "{} {}",
                render_format(&options.field_format, &[&sort.field_name]),
                sort.sort_type.keyword()
            )
        })
        .collect()
}
