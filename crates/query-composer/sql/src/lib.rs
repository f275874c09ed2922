//! Low-level representation of a composed, parameterized query, plus the
//! textual helpers used to inject clauses into hand-written query templates.

pub mod helpers;
pub mod string;

pub use string::{ComposedQuery, Parameter, ParameterValue, ValueType};
