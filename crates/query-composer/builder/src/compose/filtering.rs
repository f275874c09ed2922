//! Filter groups and their rendering into predicate fragments.

use query_composer_sql::helpers::render_format;
use query_composer_sql::string::{ComposedQuery, ParameterValue};
use serde::{Deserialize, Serialize};

use crate::error::CompositionError;
use crate::options::ComposerOptions;

/// An ordered group of filter conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub filter_options: Vec<FilterOption>,
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub field_name: String,
    pub filter_operator: FilterOperator,
    pub field_value: ParameterValue,
    /// Connective between this condition and the next one in the group.
    pub filter_chain_operator: ChainOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equal,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Contains,
}

impl FilterOperator {
    /// The comparison symbol, or `None` for `Contains`, which renders through
    /// the configured contains format instead.
    fn comparison_symbol(self) -> Option<&'static str> {
        match self {
            FilterOperator::Equal => Some("="),
            FilterOperator::Greater => Some(">"),
            FilterOperator::GreaterOrEqual => Some(">="),
            FilterOperator::Less => Some("<"),
            FilterOperator::LessOrEqual => Some("<="),
            FilterOperator::Contains => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainOperator {
    And,
    Or,
    None,
}

impl ChainOperator {
    fn keyword(self) -> Option<&'static str> {
        match self {
            ChainOperator::And => Some("AND"),
            ChainOperator::Or => Some("OR"),
            ChainOperator::None => None,
        }
    }
}

/// Render the single populated filter group into predicate fragments, binding
/// each value as a fresh synthetic parameter.
///
/// Returns `None` when there is nothing to compose. More than one populated
/// group is rejected: the combination rule between groups is deliberately
/// unspecified until product intent is clarified.
pub(crate) fn translate_filter(
    options: &ComposerOptions,
    query: &mut ComposedQuery,
    groups: &[FilterGroup],
) -> Result<Option<Vec<(String, ChainOperator)>>, CompositionError> {
    let mut populated = groups.iter().filter(|group| !group.filter_options.is_empty());
    let Some(group) = populated.next() else {
        return Ok(None);
    };
    if populated.next().is_some() {
        return Err(CompositionError::MultipleFilterGroups);
    }

    let mut fragments = Vec::with_capacity(group.filter_options.len());
    for filter in &group.filter_options {
        let name = query.bind(filter.field_value.clone());
        let param_ref = format!("{}{}", options.param_sign, name);
        let field = render_format(&options.field_format, &[&filter.field_name]);
        let condition = match filter.filter_operator.comparison_symbol() {
            None => format!(
                "{}{}",
                field,
                render_format(&options.contains_format, &[&param_ref])
            ),
            Some(symbol) => {
                if matches!(filter.field_value, ParameterValue::Date(_)) {
                    render_format(&options.date_compare_format, &[&field, symbol, &param_ref])
                } else {
                    format!("{field} {symbol} {param_ref}")
                }
            }
        };
        fragments.push((condition, filter.filter_chain_operator));
    }
    Ok(Some(fragments))
}

/// Join predicate fragments with their chain connectives. The trailing
/// connective has nothing to chain to and is dropped.
pub(crate) fn join_fragments(fragments: &[(String, ChainOperator)]) -> String {
    let mut clause = String::new();
    for (index, (condition, chain)) in fragments.iter().enumerate() {
        clause.push_str(condition);
        if index < fragments.len() - 1 {
            match chain.keyword() {
                Some(keyword) => {
                    clause.push(' ');
                    clause.push_str(keyword);
                    clause.push(' ');
                }
                None => clause.push(' '),
            }
        }
    }
    clause
}
