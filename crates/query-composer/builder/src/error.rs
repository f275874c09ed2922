//! Error taxonomy for query composition.
//!
//! All failures are local and synchronous. Composition is pure, so retrying
//! without changing input is pointless; `build()` either returns a complete
//! composed query or fails before returning one.

use thiserror::Error;

/// Top-level composition failure returned to the caller.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

/// Invalid or incomplete composer configuration.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("configured token '{0}' must not be empty")]
    EmptyToken(&'static str),
    #[error("format string '{format}' is missing its '{slot}' slot")]
    MissingSlot {
        format: &'static str,
        slot: &'static str,
    },
    #[error("configured default '{0}' must not be negative")]
    NegativeDefault(&'static str),
}

/// Problems with the base query template or the composer call order.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("base query template is empty")]
    EmptyTemplate,
    #[error("composer is not initialized; call initialize before adding clauses")]
    NotInitialized,
    #[error("template token '{{{{{0}}}}}' was never resolved")]
    UnresolvedParameter(String),
}

/// Invalid clause input supplied during composition.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("pagination values must not be negative (current page {current_page}, page size {page_size})")]
    NegativePagination { current_page: i64, page_size: i64 },
    #[error("composing more than one populated filter group is not supported")]
    MultipleFilterGroups,
}
