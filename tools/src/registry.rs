//! Tool registry
//!
//! The registry is an ordered, immutable table of tools built once at
//! startup. It serves both sides of the agent loop:
//! - capability listing (`list_tools`, `get_tools`) for the model's prompt
//! - exact-name dispatch (`get_tool`, `execute`) when the model picks a tool
//!
//! Clones share the same table, so a registry can be handed to any number of
//! concurrent callers.

use crate::backend::BackendClient;
use crate::{basic_info, call_back, finalize_prices, get_data};
use rental_desk_core::agent::{Tool, ToolDescriptor, ToolError, ToolExecutorFn, ToolResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors detected while building a registry
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two tools share a name
    #[error("Tool registered twice: {name}")]
    DuplicateTool {
        /// Tool name
        name: String,
    },

    /// A tool's schema declares the same field twice
    #[error("Tool {tool} declares field {field} more than once")]
    DuplicateField {
        /// Tool name
        tool: String,
        /// Field name
        field: String,
    },
}

/// Collects tools in registration order
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub const fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool with its executor
    #[must_use]
    pub fn register(mut self, tool: Tool, executor: ToolExecutorFn) -> Self {
        self.tools.push(ToolDescriptor::new(tool, executor));
        self
    }

    /// Freeze the table
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if two tools share a name or a schema declares
    /// a field twice.
    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        for (index, descriptor) in self.tools.iter().enumerate() {
            if self.tools[..index]
                .iter()
                .any(|earlier| earlier.name() == descriptor.name())
            {
                return Err(RegistryError::DuplicateTool {
                    name: descriptor.name().to_string(),
                });
            }

            if let Some(field) = descriptor.schema().duplicate_field() {
                return Err(RegistryError::DuplicateField {
                    tool: descriptor.name().to_string(),
                    field: field.to_string(),
                });
            }
        }

        info!(count = self.tools.len(), "Tool registry built");

        Ok(ToolRegistry {
            tools: self.tools.into(),
        })
    }
}

/// Immutable, ordered tool table
///
/// ## Example
///
/// ```no_run
/// use rental_desk_tools::{BackendClient, BackendConfig, ToolRegistry};
/// use serde_json::json;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = BackendClient::new(&BackendConfig::from_env()?);
/// let registry = ToolRegistry::rental_desk(&backend)?;
///
/// let prices = registry
///     .execute("get_data", json!({"query": "car_prices"}).to_string())
///     .await?;
/// println!("{prices}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ToolRegistry {
    tools: Arc<[ToolDescriptor]>,
}

impl ToolRegistry {
    /// Start building a registry
    #[must_use]
    pub const fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// The rental desk tool set, all bound to one backend
    ///
    /// Order: `basic_info`, `finalize_prices`, `get_data`, `call_back`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the built-in definitions violate a registry
    /// invariant.
    pub fn rental_desk(backend: &BackendClient) -> Result<Self, RegistryError> {
        let (basic_info, basic_info_exec) = basic_info::basic_info_tool(backend.clone());
        let (finalize_prices, finalize_prices_exec) =
            finalize_prices::finalize_prices_tool(backend.clone());
        let (get_data, get_data_exec) = get_data::get_data_tool(backend.clone());
        let (call_back, call_back_exec) = call_back::call_back_tool(backend.clone());

        Self::builder()
            .register(basic_info, basic_info_exec)
            .register(finalize_prices, finalize_prices_exec)
            .register(get_data, get_data_exec)
            .register(call_back, call_back_exec)
            .build()
    }

    /// All registered tools, in registration order
    #[must_use]
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Capability descriptors for the model, in registration order
    #[must_use]
    pub fn get_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|descriptor| descriptor.tool().clone())
            .collect()
    }

    /// Look up a tool by exact name
    ///
    /// # Errors
    ///
    /// Returns `ToolError::NotFound` if no tool has this name.
    pub fn get_tool(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.tools
            .iter()
            .find(|descriptor| descriptor.name() == name)
            .ok_or_else(|| ToolError::NotFound {
                name: name.to_string(),
            })
    }

    /// Execute a tool by name with a JSON argument payload
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the tool is not found, the arguments do not
    /// match its schema, or the backend cannot be reached.
    #[tracing::instrument(skip_all, fields(tool = %name))]
    pub async fn execute(&self, name: &str, input: String) -> ToolResult {
        let descriptor = self.get_tool(name)?;
        let result = descriptor.invoke(input).await;

        match &result {
            Ok(output) => debug!(bytes = output.len(), "Tool completed"),
            Err(error) => debug!(%error, "Tool failed"),
        }

        result
    }

    /// Number of registered tools
    #[must_use]
    pub fn count(&self) -> usize {
        self.tools.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{offline_backend, sample_payload};
    use rental_desk_core::agent::bind_executor;
    use rental_desk_core::schema::ToolSchema;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::rental_desk(&offline_backend()).unwrap()
    }

    #[test]
    fn test_rental_desk_order() {
        let registry = registry();
        let names: Vec<&str> = registry.list_tools().iter().map(ToolDescriptor::name).collect();

        assert_eq!(
            names,
            ["basic_info", "finalize_prices", "get_data", "call_back"]
        );
        assert_eq!(registry.count(), 4);
    }

    #[test]
    fn test_list_tools_is_stable() {
        let registry = registry();
        let first: Vec<Tool> = registry.get_tools();
        let second: Vec<Tool> = registry.get_tools();
        assert_eq!(first, second);

        let shared = registry.clone();
        assert_eq!(shared.get_tools(), first);
    }

    #[test]
    fn test_get_tool() {
        let registry = registry();

        let tool = registry.get_tool("basic_info").unwrap();
        assert_eq!(tool.name(), "basic_info");

        let err = registry.get_tool("nonexistent").unwrap_err();
        assert_eq!(
            err,
            ToolError::NotFound {
                name: "nonexistent".to_string()
            }
        );
    }

    #[test]
    fn test_get_tool_is_exact() {
        let registry = registry();
        assert!(registry.get_tool("Basic_Info").is_err());
        assert!(registry.get_tool("basic").is_err());
        assert!(registry.get_tool("basic_info ").is_err());
    }

    #[test]
    fn test_every_schema_binds_its_sample() {
        for descriptor in registry().list_tools() {
            let schema = descriptor.schema();
            let payload: serde_json::Value =
                serde_json::from_str(&sample_payload(schema)).unwrap();
            assert!(schema.validate(&payload).is_ok(), "{}", descriptor.name());
        }
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let backend = offline_backend();
        let (first, first_exec) = crate::get_data::get_data_tool(backend.clone());
        let (second, second_exec) = crate::get_data::get_data_tool(backend);

        let err = ToolRegistry::builder()
            .register(first, first_exec)
            .register(second, second_exec)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateTool {
                name: "get_data".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = ToolSchema::new()
            .string("query", "first")
            .string("query", "second");
        let tool = Tool::new("twice", "Declares query twice", schema.clone());
        let executor = bind_executor(schema, |_args: serde_json::Value| async {
            Ok(String::new())
        });

        let err = ToolRegistry::builder()
            .register(tool, executor)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateField {
                tool: "twice".to_string(),
                field: "query".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::builder().build().unwrap();
        assert_eq!(registry.count(), 0);
        assert!(registry.get_tools().is_empty());
    }

    #[tokio::test]
    async fn test_execute_not_found() {
        let result = registry()
            .execute("nonexistent", json!({"query": "fleet"}).to_string())
            .await;

        assert!(matches!(result, Err(ToolError::NotFound { name }) if name == "nonexistent"));
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_arguments_before_calling_backend() {
        let result = registry()
            .execute(
                "finalize_prices",
                json!({"session_id": "s1", "car_group": "B"}).to_string(),
            )
            .await;

        assert_eq!(
            result,
            Err(ToolError::MissingArgument {
                field: "price".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_execute_custom_tool() {
        let schema = ToolSchema::new().string("text", "Text to echo");
        let tool = Tool::new("echo", "Echo text back", schema.clone());
        let executor = bind_executor(schema, |args: serde_json::Value| async move {
            Ok(args["text"].as_str().unwrap_or_default().to_string())
        });

        let registry = ToolRegistry::builder().register(tool, executor).build().unwrap();
        let output = registry
            .execute("echo", json!({"text": "hello"}).to_string())
            .await
            .unwrap();

        assert_eq!(output, "hello");
    }
}
