//! Type definitions of a low-level parameterized query representation.

use serde::{Deserialize, Serialize};

/// A parameterized query: the running query text and the ordered parameters
/// referenced from it.
///
/// Parameter names are always synthetic (`p1`, `p2`, ...) so that repeated
/// conditions on the same field never collide and caller-supplied names never
/// reach the query text. Names are counter-based, so identical call sequences
/// produce byte-identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedQuery {
    pub text: String,
    pub params: Vec<Parameter>,
    param_index: u64,
}

impl ComposedQuery {
    pub fn new(text: impl Into<String>) -> ComposedQuery {
        ComposedQuery {
            text: text.into(),
            params: vec![],
            param_index: 0,
        }
    }

    /// Record a value as a bound parameter and return the generated name.
    /// The literal value never appears in the query text.
    pub fn bind(&mut self, value: ParameterValue) -> String {
        self.param_index += 1;
        let name = format!("p{}", self.param_index);
        self.params.push(Parameter {
            name: name.clone(),
            value,
        });
        name
    }
}

/// A single named parameter of a composed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
}

/// A parameter value tagged with the type the execution layer should bind it
/// as. The composer never inspects the value beyond its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ParameterValue {
    Text(String),
    Number(serde_json::Number),
    /// An ISO-8601 date or timestamp, bound as a date by the execution layer.
    Date(String),
    Boolean(bool),
}

impl ParameterValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            ParameterValue::Text(_) => ValueType::Text,
            ParameterValue::Number(_) => ValueType::Number,
            ParameterValue::Date(_) => ValueType::Date,
            ParameterValue::Boolean(_) => ValueType::Boolean,
        }
    }
}

/// The declared binding type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Number,
    Date,
    Boolean,
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn bind_generates_sequential_unique_names() {
        let mut query = ComposedQuery::new("SELECT 1");
        let first = query.bind(ParameterValue::Text("a".to_string()));
        let second = query.bind(ParameterValue::Text("b".to_string()));
        assert_eq!(first, "p1");
        assert_eq!(second, "p2");
        assert_eq!(query.params.len(), 2);
        assert_eq!(query.params[0].name, "p1");
        assert_eq!(query.params[1].name, "p2");
    }

    #[test]
    fn value_type_follows_the_tag() {
        assert_eq!(
            ParameterValue::Date("2024-01-01".to_string()).value_type(),
            ValueType::Date
        );
        assert_eq!(
            ParameterValue::Number(serde_json::Number::from(3)).value_type(),
            ValueType::Number
        );
        assert_eq!(ParameterValue::Boolean(true).value_type(), ValueType::Boolean);
    }
}
