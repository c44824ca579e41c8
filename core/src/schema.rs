//! Tool argument schemas
//!
//! A [`ToolSchema`] is the declarative description of a tool's inputs. It is
//! used in two places:
//! - serialized as a JSON Schema object, it is what the agent runtime sees
//!   when deciding how to populate arguments
//! - as the argument-binding layer, it checks a raw JSON payload against the
//!   declared field list before the payload is deserialized into the tool's
//!   argument struct
//!
//! ## Example
//!
//! ```
//! use rental_desk_core::schema::ToolSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Quote {
//!     car_group: String,
//!     price: f64,
//! }
//!
//! let schema = ToolSchema::new()
//!     .string("car_group", "The negotiated car group")
//!     .number("price", "The price of the negotiated car group");
//!
//! let quote: Quote = schema.bind(r#"{"car_group": "B", "price": 42}"#).unwrap();
//! assert_eq!(quote.car_group, "B");
//! assert!((quote.price - 42.0).abs() < f64::EPSILON);
//! ```

use crate::agent::ToolError;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Semantic type of a tool argument
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// JSON string
    String,
    /// JSON number (integers are accepted)
    Number,
    /// JSON boolean
    Boolean,
}

impl FieldType {
    /// JSON Schema type name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether `value` has this type. `null` never matches.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared tool argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Argument name, unique within its schema
    pub name: String,
    /// Semantic type
    pub field_type: FieldType,
    /// Human-readable description shown to the agent
    pub description: String,
}

impl FieldSpec {
    /// Create a field specification
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: description.into(),
        }
    }
}

/// Ordered set of field specifications
///
/// Every declared field is required. Payloads carrying keys outside the
/// declared set are rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolSchema {
    fields: Vec<FieldSpec>,
}

impl ToolSchema {
    /// Create an empty schema
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder: append a field
    ///
    /// Names are not checked here; [`ToolSchema::duplicate_field`] reports
    /// the first repeated name so registries can refuse the schema at build
    /// time.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Builder: append a string field
    #[must_use]
    pub fn string(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldType::String, description))
    }

    /// Builder: append a number field
    #[must_use]
    pub fn number(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldType::Number, description))
    }

    /// Builder: append a boolean field
    #[must_use]
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.field(FieldSpec::new(name, FieldType::Boolean, description))
    }

    /// Declared fields, in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Look up a field by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// First field name declared more than once, if any
    #[must_use]
    pub fn duplicate_field(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.field_names().find(|name| !seen.insert(*name))
    }

    /// JSON Schema object describing the arguments
    ///
    /// ```json
    /// {
    ///   "type": "object",
    ///   "properties": {"query": {"type": "string", "description": "..."}},
    ///   "required": ["query"],
    ///   "additionalProperties": false
    /// }
    /// ```
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.clone(),
                    json!({
                        "type": field.field_type.as_str(),
                        "description": field.description,
                    }),
                )
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.field_names().collect::<Vec<_>>(),
            "additionalProperties": false
        })
    }

    /// Check a parsed payload against the declared fields
    ///
    /// Unexpected keys are reported before missing or mistyped ones.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the payload is not a JSON object
    /// - `UnexpectedArgument` for a key that is not declared
    /// - `MissingArgument` for a declared field that is absent
    /// - `InvalidArgument` for a declared field of the wrong type
    pub fn validate(&self, input: &Value) -> Result<(), ToolError> {
        let Some(object) = input.as_object() else {
            return Err(ToolError::InvalidInput(
                "arguments must be a JSON object".to_string(),
            ));
        };

        if let Some(key) = object.keys().find(|key| self.get(key).is_none()) {
            return Err(ToolError::UnexpectedArgument { field: key.clone() });
        }

        for field in &self.fields {
            match object.get(&field.name) {
                None => {
                    return Err(ToolError::MissingArgument {
                        field: field.name.clone(),
                    });
                }
                Some(value) if !field.field_type.accepts(value) => {
                    return Err(ToolError::InvalidArgument {
                        field: field.name.clone(),
                        expected: field.field_type,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Parse, validate and deserialize a JSON argument payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `input` is not valid JSON or does not
    /// deserialize into `T`, and any error from [`ToolSchema::validate`].
    pub fn bind<T: DeserializeOwned>(&self, input: &str) -> Result<T, ToolError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ToolError::InvalidInput(format!("Invalid input JSON: {e}")))?;

        self.validate(&value)?;

        serde_json::from_value(value).map_err(|e| ToolError::InvalidInput(e.to_string()))
    }
}

impl Serialize for ToolSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}
