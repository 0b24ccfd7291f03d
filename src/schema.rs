//! Declarative input schemas and argument validation
//!
//! Tools declare their parameter contracts as `Schema` values; the validator
//! turns a loosely-typed JSON argument map into coerced typed values before
//! any tool body runs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    String,
    Number,
    Integer,
    Boolean,
    Array,
}

/// A recursive parameter schema. Serializes to the JSON-Schema subset that
/// MCP clients expect in a tool's `inputSchema`.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl Schema {
    fn leaf(schema_type: SchemaType, description: &str) -> Self {
        Self {
            schema_type,
            description: Some(description.to_string()),
            properties: BTreeMap::new(),
            required: Vec::new(),
            allowed_values: None,
        }
    }

    pub fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Self {
        Self {
            schema_type: SchemaType::Object,
            description: None,
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|name| name.to_string()).collect(),
            allowed_values: None,
        }
    }

    pub fn string(description: &str) -> Self {
        Self::leaf(SchemaType::String, description)
    }

    pub fn number(description: &str) -> Self {
        Self::leaf(SchemaType::Number, description)
    }

    pub fn integer(description: &str) -> Self {
        Self::leaf(SchemaType::Integer, description)
    }

    pub fn boolean(description: &str) -> Self {
        Self::leaf(SchemaType::Boolean, description)
    }

    pub fn string_enum(description: &str, allowed: &[&str]) -> Self {
        let mut schema = Self::leaf(SchemaType::String, description);
        schema.allowed_values = Some(allowed.iter().map(|value| value.to_string()).collect());
        schema
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("arguments must be a JSON object")]
    NotAnObject,
    #[error("missing required argument {name}")]
    MissingArgument { name: String },
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// A coerced argument value. Numbers widen to f64, integers stay i64.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Bool(bool),
    Raw(Value),
}

/// Arguments that passed validation against a schema. Accessors return
/// `None` for properties the schema did not require and the caller omitted.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidatedArgs {
    values: BTreeMap<String, ArgValue>,
}

impl ValidatedArgs {
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ArgValue::Number(value)) => Some(*value),
            Some(ArgValue::Integer(value)) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Validates an argument map against an object schema and coerces each
/// declared property. Extra properties the schema does not declare are
/// ignored. Pure: identical input always yields an identical outcome.
pub fn validate(
    schema: &Schema,
    arguments: &Map<String, Value>,
) -> Result<ValidatedArgs, ValidationError> {
    for name in &schema.required {
        if !arguments.contains_key(name) {
            return Err(ValidationError::MissingArgument { name: name.clone() });
        }
    }

    let mut values = BTreeMap::new();
    for (name, property) in &schema.properties {
        let Some(value) = arguments.get(name) else {
            continue;
        };

        values.insert(name.clone(), coerce(name, property, value)?);
    }

    Ok(ValidatedArgs { values })
}

fn coerce(name: &str, property: &Schema, value: &Value) -> Result<ArgValue, ValidationError> {
    match property.schema_type {
        SchemaType::Number => value
            .as_f64()
            .map(ArgValue::Number)
            .ok_or_else(|| invalid_value(name, value)),
        SchemaType::Integer => match value.as_i64() {
            Some(integer) => Ok(ArgValue::Integer(integer)),
            None => value
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .map(|float| ArgValue::Integer(float as i64))
                .ok_or_else(|| invalid_value(name, value)),
        },
        SchemaType::String => {
            let text = value
                .as_str()
                .ok_or_else(|| invalid_value(name, value))?;
            if let Some(allowed) = &property.allowed_values {
                if !allowed.iter().any(|candidate| candidate == text) {
                    return Err(invalid_value(name, value));
                }
            }
            Ok(ArgValue::Text(text.to_string()))
        }
        SchemaType::Boolean => value
            .as_bool()
            .map(ArgValue::Bool)
            .ok_or_else(|| invalid_value(name, value)),
        SchemaType::Object | SchemaType::Array => Ok(ArgValue::Raw(value.clone())),
    }
}

fn invalid_value(name: &str, value: &Value) -> ValidationError {
    ValidationError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate, Schema, ValidationError};
    use serde_json::{json, Value};

    fn number_pair_schema() -> Schema {
        Schema::object(
            vec![
                ("a", Schema::number("First number")),
                ("b", Schema::number("Second number")),
            ],
            &["a", "b"],
        )
    }

    fn arguments(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn accepts_numbers_in_any_numeric_representation() {
        let args = validate(&number_pair_schema(), &arguments(json!({"a": 5, "b": 3.5})))
            .expect("valid arguments");
        assert_eq!(args.number("a"), Some(5.0));
        assert_eq!(args.number("b"), Some(3.5));
    }

    #[test]
    fn reports_first_missing_required_argument() {
        let error = validate(&number_pair_schema(), &arguments(json!({"b": 3})))
            .expect_err("missing argument");
        assert_eq!(error.to_string(), "missing required argument a");
    }

    #[test]
    fn rejects_numeric_looking_string_for_number() {
        let error = validate(&number_pair_schema(), &arguments(json!({"a": "5", "b": 3})))
            .expect_err("strict type policy");
        assert_eq!(
            error,
            ValidationError::InvalidValue {
                name: "a".to_string(),
                value: "\"5\"".to_string(),
            }
        );
    }

    #[test]
    fn integer_accepts_whole_floats_and_rejects_fractions() {
        let schema = Schema::object(
            vec![
                ("min", Schema::integer("Minimum value (inclusive)")),
                ("max", Schema::integer("Maximum value (inclusive)")),
            ],
            &["min", "max"],
        );

        let args = validate(&schema, &arguments(json!({"min": 1.0, "max": 10})))
            .expect("whole floats coerce");
        assert_eq!(args.integer("min"), Some(1));
        assert_eq!(args.integer("max"), Some(10));

        let error = validate(&schema, &arguments(json!({"min": 1.5, "max": 10})))
            .expect_err("fractional integer");
        assert!(error.to_string().contains("invalid value for min"));
    }

    #[test]
    fn enum_membership_is_enforced() {
        let schema = Schema::object(
            vec![(
                "operation",
                Schema::string_enum("The operation to perform", &["add", "subtract"]),
            )],
            &["operation"],
        );

        validate(&schema, &arguments(json!({"operation": "add"}))).expect("member value");

        let error = validate(&schema, &arguments(json!({"operation": "modulo"})))
            .expect_err("non-member value");
        assert_eq!(
            error.to_string(),
            "invalid value for operation: \"modulo\""
        );
    }

    #[test]
    fn extra_properties_are_ignored() {
        let args = validate(
            &number_pair_schema(),
            &arguments(json!({"a": 1, "b": 2, "unexpected": true})),
        )
        .expect("extras ignored");
        assert!(!args.contains("unexpected"));
    }

    #[test]
    fn validation_is_deterministic() {
        let schema = number_pair_schema();
        let input = arguments(json!({"a": 4, "b": 2}));
        assert_eq!(validate(&schema, &input), validate(&schema, &input));
    }

    #[test]
    fn optional_properties_may_be_absent() {
        let schema = Schema::object(
            vec![(
                "timezone",
                Schema::string("Timezone (optional, defaults to system timezone)"),
            )],
            &[],
        );
        let args = validate(&schema, &arguments(json!({}))).expect("no required properties");
        assert_eq!(args.text("timezone"), None);
    }
}
