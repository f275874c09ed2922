//! Dynamic query composition over hand-written query templates.
//!
//! A [`QueryComposer`] takes a base query template plus composable filter
//! groups, sort specifications, free-text search terms and pagination, and
//! produces a single parameterized query string with an ordered, named
//! parameter set ready for execution against a relational backend.
//!
//! The pipeline is: configure, initialize with a template and pre-filled
//! parameters, optionally add clauses, then `build()`:
//!
//! ```
//! use query_composer_builder::QueryComposer;
//!
//! let composed = QueryComposer::new()
//!     .initialize("SELECT * FROM users", &[])?
//!     .add_text_search("bob", &["first_name".to_string(), "last_name".to_string()])?
//!     .add_pagination(0, 25)?
//!     .build()?;
//! assert_eq!(composed.params.len(), 2);
//! assert!(composed.text.ends_with("LIMIT 25 OFFSET 0"));
//! # Ok::<(), query_composer_builder::Error>(())
//! ```
//!
//! User-supplied values only ever reach the query text as synthetic bound
//! parameters; templates may opt in to explicit clause placement with
//! placeholder tokens such as `$$FILTER$$` (see [`ComposerOptions`]).

pub mod compose;
pub mod error;
pub mod options;

pub use compose::filtering::{ChainOperator, FilterGroup, FilterOption, FilterOperator};
pub use compose::sorting::{SortDirection, SortableField};
pub use compose::{FilledParameter, QueryComposer};
pub use error::{CompositionError, ConfigurationError, Error, TemplateError};
pub use options::ComposerOptions;
pub use query_composer_sql::{ComposedQuery, Parameter, ParameterValue, ValueType};
