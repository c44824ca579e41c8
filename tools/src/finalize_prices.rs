//! `finalize_prices`: record the negotiated price and generate the contract

use crate::backend::{BackendClient, Outcome};
use crate::SESSION_ID_DESCRIPTION;
use rental_desk_core::agent::{bind_executor, Tool, ToolExecutorFn, ToolResult};
use rental_desk_core::schema::ToolSchema;
use serde::{Deserialize, Serialize};

/// Tool name
pub const NAME: &str = "finalize_prices";

/// Arguments for `finalize_prices`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinalizePrices {
    /// Conversation session, routed into the URL
    #[serde(skip_serializing)]
    pub session_id: String,
    /// Negotiated car group
    pub car_group: String,
    /// Negotiated price for that group
    pub price: f64,
}

/// Argument schema
#[must_use]
pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .string("session_id", SESSION_ID_DESCRIPTION)
        .string("car_group", "The negotiated car group")
        .number("price", "The price of the negotiated car group")
}

/// Upload the negotiated price
///
/// # Errors
///
/// Returns `ToolError::Transport` if the backend cannot be reached.
pub async fn finalize_prices(backend: &BackendClient, args: &FinalizePrices) -> ToolResult {
    backend
        .post_json(
            &format!("finalize_prices/{}", args.session_id),
            args,
            Outcome::UPLOAD,
        )
        .await
}

/// Create the `finalize_prices` tool
#[must_use]
pub fn finalize_prices_tool(backend: BackendClient) -> (Tool, ToolExecutorFn) {
    let tool = Tool::new(
        NAME,
        "Upload the negotiated price to the server and generate the contract",
        schema(),
    );

    let executor = bind_executor(tool.schema.clone(), move |args: FinalizePrices| {
        let backend = backend.clone();
        async move { finalize_prices(&backend, &args).await }
    });

    (tool, executor)
}
