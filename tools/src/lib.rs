//! Backend tools for the rental desk sales agent
//!
//! Each tool performs exactly one HTTP request against the rental desk
//! backend and turns the answer into text the agent can relay:
//!
//! | Tool | Request | Output on 200 |
//! |---|---|---|
//! | `basic_info` | `POST /basic_info/{session_id}` (JSON) | fixed confirmation |
//! | `finalize_prices` | `POST /finalize_prices/{session_id}` (JSON) | fixed confirmation |
//! | `get_data` | `GET /get_{query}` | response body |
//! | `call_back` | `POST /call_back/{session_id}` (form) | response body |
//!
//! Any other status becomes a fixed, tool-specific message returned as a
//! normal result. Only transport failures surface as `Err`.
//!
//! ## Modules
//!
//! - `config`: backend endpoint configuration
//! - `backend`: HTTP client and result mapping shared by all tools
//! - `basic_info`, `call_back`, `finalize_prices`, `get_data`: the tools
//! - `registry`: immutable tool table with lookup and dispatch by name

pub mod backend;
pub mod basic_info;
pub mod call_back;
pub mod config;
pub mod finalize_prices;
pub mod get_data;
pub mod registry;

pub use rental_desk_core::agent::{Tool, ToolDescriptor, ToolError, ToolExecutorFn, ToolResult};

// Re-export commonly used types
pub use backend::BackendClient;
pub use config::{BackendConfig, ConfigError};
pub use registry::{RegistryError, ToolRegistry, ToolRegistryBuilder};

/// Description of the `session_id` argument shared by session-scoped tools
pub(crate) const SESSION_ID_DESCRIPTION: &str =
    "The current session id, stated at the beginning of the conversation by the system";

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{BackendClient, BackendConfig};
    use rental_desk_core::schema::{FieldType, ToolSchema};
    use serde_json::{json, Map, Value};

    /// Backend on a port nothing listens on
    pub fn offline_backend() -> BackendClient {
        BackendClient::new(&BackendConfig::new("http://127.0.0.1:9").unwrap())
    }

    /// Payload with every declared field: strings carry their own name,
    /// numbers are `1`, booleans are `true`
    pub fn sample_payload(schema: &ToolSchema) -> String {
        let object: Map<String, Value> = schema
            .fields()
            .iter()
            .map(|field| {
                let value = match field.field_type {
                    FieldType::String => json!(field.name),
                    FieldType::Number => json!(1),
                    FieldType::Boolean => json!(true),
                };
                (field.name.clone(), value)
            })
            .collect();

        Value::Object(object).to_string()
    }
}
