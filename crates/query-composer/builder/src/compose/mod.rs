//! The query composer: a per-request fluent builder that assembles a
//! parameterized query from a base template plus filter, sort, search and
//! pagination clauses.

use query_composer_sql::helpers;
use query_composer_sql::string::{ComposedQuery, ParameterValue};
use serde::{Deserialize, Serialize};

use crate::error::{CompositionError, Error, TemplateError};
use crate::options::ComposerOptions;

pub mod filtering;
pub mod searching;
pub mod sorting;

use filtering::{ChainOperator, FilterGroup};
use sorting::SortableField;

/// A template parameter whose value was already resolved before composition
/// starts; its `{{name}}` token is substituted at initialization and the
/// value is bound as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledParameter {
    pub name: String,
    pub value: String,
}

/// One composer per logical query-build request.
///
/// The composer is a small state machine: it starts configured, becomes
/// composing once [`initialize`](QueryComposer::initialize) binds a template,
/// and is consumed by [`build`](QueryComposer::build). Adding clauses before
/// initialization is rejected rather than operating on undefined accumulator
/// state. The fluent methods take the composer by value, so an instance
/// cannot be shared across requests or reused after build.
#[derive(Debug)]
pub struct QueryComposer {
    options: ComposerOptions,
    state: State,
}

#[derive(Debug)]
enum State {
    Configured,
    Composing(Composition),
}

/// Clause accumulators for one composition. Fragments are kept as explicit
/// lists and joined with the correct separator at finalization.
#[derive(Debug)]
struct Composition {
    query: ComposedQuery,
    search: Vec<String>,
    filter: Vec<(String, ChainOperator)>,
    order: Vec<String>,
    pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy)]
struct Pagination {
    current_page: i64,
    page_size: i64,
    start_row: i64,
}

fn composing(state: &mut State) -> Result<&mut Composition, TemplateError> {
    match state {
        State::Composing(composition) => Ok(composition),
        State::Configured => Err(TemplateError::NotInitialized),
    }
}

impl Default for QueryComposer {
    fn default() -> QueryComposer {
        QueryComposer::new()
    }
}

impl QueryComposer {
    /// A composer with default configuration.
    pub fn new() -> QueryComposer {
        QueryComposer {
            options: ComposerOptions::default(),
            state: State::Configured,
        }
    }

    /// A composer with configuration overrides applied on top of the
    /// defaults. The callback runs exactly once, before any other call.
    pub fn configure(mutate: impl FnOnce(&mut ComposerOptions)) -> QueryComposer {
        let mut options = ComposerOptions::default();
        mutate(&mut options);
        QueryComposer {
            options,
            state: State::Configured,
        }
    }

    /// A composer using `options` as-is, e.g. deserialized platform overrides.
    pub fn with_options(options: ComposerOptions) -> QueryComposer {
        QueryComposer {
            options,
            state: State::Configured,
        }
    }

    /// Validate the configuration, bind the pre-filled parameters into the
    /// template and reset the clause accumulators.
    ///
    /// Every `{{name}}` occurrence of a filled parameter is replaced by a
    /// fresh synthetic parameter reference. A filled parameter whose token
    /// never occurs in the template is recorded anyway and logged at warning
    /// level; dropping it silently would change behavior for execution layers
    /// that bind by position.
    pub fn initialize(
        mut self,
        template: &str,
        parameters: &[FilledParameter],
    ) -> Result<QueryComposer, Error> {
        self.options.validate()?;
        if template.trim().is_empty() {
            return Err(TemplateError::EmptyTemplate.into());
        }

        let mut query = ComposedQuery::new(template);
        for parameter in parameters {
            let token = format!("{{{{{}}}}}", parameter.name);
            if !query.text.contains(&token) {
                tracing::warn!(
                    parameter = %parameter.name,
                    "filled parameter token not found in template"
                );
            }
            let name = query.bind(ParameterValue::Text(parameter.value.clone()));
            let reference = format!("{}{}", self.options.param_sign, name);
            query.text = query.text.replace(&token, &reference);
        }

        self.state = State::Composing(Composition {
            query,
            search: vec![],
            filter: vec![],
            order: vec![],
            pagination: None,
        });
        Ok(self)
    }

    /// Add one populated filter group. Empty input is a no-op; more than one
    /// populated group is rejected. A repeated call replaces the previous
    /// filter clause (its parameters stay bound).
    pub fn add_filter(mut self, groups: &[FilterGroup]) -> Result<QueryComposer, Error> {
        let QueryComposer { options, state } = &mut self;
        let composition = composing(state)?;
        if let Some(fragments) =
            filtering::translate_filter(options, &mut composition.query, groups)?
        {
            composition.filter = fragments;
        }
        Ok(self)
    }

    /// Add sort fields. Empty input is a no-op; a repeated call replaces the
    /// previous sort list.
    pub fn add_sort(mut self, sorts: &[SortableField]) -> Result<QueryComposer, Error> {
        let QueryComposer { options, state } = &mut self;
        let composition = composing(state)?;
        if !sorts.is_empty() {
            composition.order = sorting::translate_sort(options, sorts);
        }
        Ok(self)
    }

    /// Search for `text` across every named field, OR-ed together. Empty text
    /// or an empty field list is a no-op.
    pub fn add_text_search(
        mut self,
        text: &str,
        search_fields: &[String],
    ) -> Result<QueryComposer, Error> {
        let QueryComposer { options, state } = &mut self;
        let composition = composing(state)?;
        if !text.is_empty() && !search_fields.is_empty() {
            composition.search =
                searching::translate_text_search(options, &mut composition.query, text, search_fields);
        }
        Ok(self)
    }

    /// Register pagination; the start row is `current_page * page_size`.
    /// The last call wins.
    pub fn add_pagination(
        mut self,
        current_page: i64,
        page_size: i64,
    ) -> Result<QueryComposer, Error> {
        let composition = composing(&mut self.state)?;
        if current_page < 0 || page_size < 0 {
            return Err(CompositionError::NegativePagination {
                current_page,
                page_size,
            }
            .into());
        }
        composition.pagination = Some(Pagination {
            current_page,
            page_size,
            start_row: current_page * page_size,
        });
        Ok(self)
    }

    /// Finalize the composition and return the composed query.
    ///
    /// Placeholder tokens still present in the template are substituted with
    /// their accumulated clause text ("contained" placement). If no token was
    /// contained, a wrapping shape is chosen by the position of the first
    /// case-insensitive ` WHERE ` relative to the first `)`, a textual
    /// heuristic over the unparsed template rather than a SQL parse. A `WHERE` that
    /// appears before the first `)` is assumed to belong to an inner subquery,
    /// so the whole template is wrapped instead of appended to; templates for
    /// which that guess is wrong should declare placeholder tokens.
    pub fn build(self) -> Result<ComposedQuery, Error> {
        let QueryComposer { options, state } = self;
        let Composition {
            mut query,
            search,
            filter,
            order,
            pagination,
        } = match state {
            State::Composing(composition) => composition,
            State::Configured => return Err(TemplateError::NotInitialized.into()),
        };

        // Injection points are decided against the template before any
        // placeholder substitution, which may itself introduce a WHERE.
        let where_index = helpers::find_where_keyword(&query.text);
        let close_paren_index = helpers::find_first_close_paren(&query.text);

        let mut search_clause = if search.is_empty() {
            options.empty_search.clone()
        } else {
            search.join(" OR ")
        };
        let mut filter_clause = if filter.is_empty() {
            options.empty_filter.clone()
        } else {
            filtering::join_fragments(&filter)
        };
        let order_list = if order.is_empty() {
            options.empty_order.clone()
        } else {
            order.join(", ")
        };

        let mut text = query.text;

        let contains_search = text.contains(&options.search_word);
        if contains_search {
            text = text.replace(&options.search_word, &search_clause);
            search_clause = options.empty_search.clone();
        }

        let contains_filter = text.contains(&options.filter_word);
        if contains_filter {
            text = text.replace(&options.filter_word, &filter_clause);
            filter_clause = options.empty_filter.clone();
        }

        let contains_order = text.contains(&options.order_word);
        let order_clause = if contains_order {
            text = text.replace(&options.order_word, &order_list);
            String::new()
        } else {
            helpers::render_format(&options.order_by_format, &[&order_list])
        };

        let contains_paging = text.contains(&options.current_page_word)
            || text.contains(&options.page_size_word)
            || text.contains(&options.start_row_word);
        let pagination_clause = if contains_paging {
            // Trusted numeric builder inputs; the only values inlined as text.
            let values = pagination.unwrap_or(Pagination {
                current_page: 0,
                page_size: 0,
                start_row: 0,
            });
            text = text.replace(&options.current_page_word, &values.current_page.to_string());
            text = text.replace(&options.page_size_word, &values.page_size.to_string());
            text = text.replace(&options.start_row_word, &values.start_row.to_string());
            String::new()
        } else {
            match pagination {
                Some(values) => helpers::render_format(
                    &options.pagination_format,
                    &[&values.page_size.to_string(), &values.start_row.to_string()],
                ),
                None => helpers::render_format(
                    &options.pagination_format,
                    &[
                        &options.default_page_size.to_string(),
                        &options.default_start_row.to_string(),
                    ],
                ),
            }
        };

        let contained_any = contains_search || contains_filter || contains_order || contains_paging;

        let mut final_text = if contained_any {
            // The template opted in to explicit placement somewhere; the
            // remaining clauses go on an outer wrapping select.
            format!("SELECT * FROM ({text}) s WHERE (({search_clause}) AND ({filter_clause}))")
        } else {
            match (where_index, close_paren_index) {
                (None, _) => {
                    format!("{text} WHERE (({search_clause}) AND ({filter_clause}))")
                }
                (Some(where_at), close_at)
                    if where_at > 0 && close_at.map_or(true, |close_at| where_at > close_at) =>
                {
                    format!("{text} AND (({search_clause}) AND ({filter_clause}))")
                }
                _ => {
                    format!(
                        "SELECT * FROM ({text}) s WHERE (({search_clause}) AND ({filter_clause}))"
                    )
                }
            }
        };

        if !order_clause.is_empty() {
            final_text.push(' ');
            final_text.push_str(&order_clause);
        }
        if !pagination_clause.is_empty() {
            final_text.push(' ');
            final_text.push_str(&pagination_clause);
        }

        if let Some(token) = helpers::find_unresolved_token(&final_text) {
            return Err(TemplateError::UnresolvedParameter(token).into());
        }

        query.text = final_text;
        Ok(query)
    }
}
