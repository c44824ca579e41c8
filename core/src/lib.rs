//! # Rental Desk Core
//!
//! Tool descriptors and argument binding for agent tools.
//!
//! An agent runtime sees each tool as a [`Tool`]: a name, a description and a
//! declarative [`ToolSchema`]. Invoking a tool hands its executor the raw JSON
//! arguments chosen by the model; the schema checks them before the tool body
//! runs.
//!
//! ## Modules
//!
//! - `agent`: `Tool`, `ToolDescriptor`, `ToolError` and the executor types
//! - `schema`: field specifications, JSON Schema export and argument binding

pub mod agent;
pub mod schema;

pub use agent::{
    bind_executor, Tool, ToolDescriptor, ToolError, ToolExecutorFn, ToolFuture, ToolResult,
};
pub use schema::{FieldSpec, FieldType, ToolSchema};
