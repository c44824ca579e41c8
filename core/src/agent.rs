//! Tool types for agent systems
//!
//! A tool is exposed to the agent runtime as a [`Tool`] (name, description and
//! argument schema) paired with a [`ToolExecutorFn`] that runs it. The pair is
//! bundled into a [`ToolDescriptor`] once it is registered.
//!
//! ## Error contract
//!
//! A tool's business outcome, good or bad, is always `Ok(String)`: the agent
//! reads it and relays it conversationally. `Err(ToolError)` is reserved for
//! failures the agent cannot act on: unknown tool, malformed arguments, or a
//! transport failure talking to the backend.

use crate::schema::{FieldType, ToolSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Result from tool execution
pub type ToolResult = Result<String, ToolError>;

/// Future returned by a tool executor
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool executor: takes the raw JSON argument payload, returns the tool output
pub type ToolExecutorFn = Arc<dyn Fn(String) -> ToolFuture + Send + Sync>;

/// Tool execution errors
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ToolError {
    /// No registered tool has this name
    #[error("Tool not found: {name}")]
    NotFound {
        /// Requested tool name
        name: String,
    },

    /// Argument payload is not a JSON object or does not deserialize
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A declared argument is absent
    #[error("Missing argument '{field}'")]
    MissingArgument {
        /// Field name
        field: String,
    },

    /// The payload carries an argument the schema does not declare
    #[error("Unexpected argument '{field}'")]
    UnexpectedArgument {
        /// Field name
        field: String,
    },

    /// A declared argument has the wrong JSON type
    #[error("Invalid argument '{field}': expected {expected}")]
    InvalidArgument {
        /// Field name
        field: String,
        /// Declared type
        expected: FieldType,
    },

    /// The backend could not be reached or its response could not be read
    #[error("Backend request failed: {0}")]
    Transport(String),
}

impl ToolError {
    /// Name of the offending argument, for argument-binding errors
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { field }
            | Self::UnexpectedArgument { field }
            | Self::InvalidArgument { field, .. } => Some(field),
            Self::NotFound { .. } | Self::InvalidInput(_) | Self::Transport(_) => None,
        }
    }
}

/// Capability descriptor advertised to the agent runtime
///
/// Serializes as `{"name": ..., "description": ..., "input_schema": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tool {
    /// Tool name (used to identify which tool to call)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// Declared arguments
    #[serde(rename = "input_schema")]
    pub schema: ToolSchema,
}

impl Tool {
    /// Create a tool definition
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: ToolSchema) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// JSON Schema for the tool's input parameters
    #[must_use]
    pub fn input_schema(&self) -> serde_json::Value {
        self.schema.to_json_schema()
    }
}

/// A registered, invocable tool
#[derive(Clone)]
pub struct ToolDescriptor {
    tool: Tool,
    executor: ToolExecutorFn,
}

impl ToolDescriptor {
    /// Bind a tool definition to its executor
    #[must_use]
    pub fn new(tool: Tool, executor: ToolExecutorFn) -> Self {
        Self { tool, executor }
    }

    /// Tool name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.tool.name
    }

    /// Tool description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.tool.description
    }

    /// Declared arguments
    #[must_use]
    pub const fn schema(&self) -> &ToolSchema {
        &self.tool.schema
    }

    /// Capability descriptor
    #[must_use]
    pub const fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Run the tool with a JSON argument payload
    pub fn invoke(&self, input: String) -> ToolFuture {
        (self.executor)(input)
    }
}

impl From<(Tool, ToolExecutorFn)> for ToolDescriptor {
    fn from((tool, executor): (Tool, ToolExecutorFn)) -> Self {
        Self::new(tool, executor)
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("tool", &self.tool)
            .finish_non_exhaustive()
    }
}

/// Build an executor that binds the payload to `A` before calling `handler`
///
/// Binding runs synchronously when the executor is called, so a malformed
/// payload never reaches the handler body.
///
/// ## Example
///
/// ```
/// use rental_desk_core::agent::{bind_executor, ToolResult};
/// use rental_desk_core::schema::ToolSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Echo {
///     text: String,
/// }
///
/// let schema = ToolSchema::new().string("text", "Text to echo");
/// let executor = bind_executor(schema, |args: Echo| async move {
///     ToolResult::Ok(args.text)
/// });
/// ```
pub fn bind_executor<A, F, Fut>(schema: ToolSchema, handler: F) -> ToolExecutorFn
where
    A: DeserializeOwned + Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResult> + Send + 'static,
{
    Arc::new(move |input: String| -> ToolFuture {
        match schema.bind::<A>(&input) {
            Ok(args) => Box::pin(handler(args)),
            Err(error) => Box::pin(std::future::ready(Err(error))),
        }
    })
}
