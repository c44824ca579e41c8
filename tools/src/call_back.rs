//! `call_back`: ask the sales team to call the customer back
//!
//! `POST {endpoint}/call_back/{session_id}` with a form-encoded body. The
//! backend's confirmation text is relayed verbatim.

use crate::backend::{BackendClient, Outcome};
use crate::SESSION_ID_DESCRIPTION;
use rental_desk_core::agent::{bind_executor, Tool, ToolExecutorFn, ToolResult};
use rental_desk_core::schema::ToolSchema;
use serde::{Deserialize, Serialize};

/// Tool name
pub const NAME: &str = "call_back";

/// Returned for any non-200 answer
pub const CALL_BACK_FAILED: &str = "There was an error requesting the callback.";

/// Arguments for `call_back`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallBack {
    /// Conversation session, routed into the URL
    #[serde(skip_serializing)]
    pub session_id: String,
    /// Full name
    pub name: String,
    /// Number to call
    pub phone_no: String,
    /// What the customer wants to ask
    pub question: String,
}

/// Argument schema
#[must_use]
pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .string("session_id", SESSION_ID_DESCRIPTION)
        .string("name", "The users full name (first and last name)")
        .string("phone_no", "The users phone number (work or personal)")
        .string("question", "The users question or query")
}

/// Request a call back on behalf of the customer
///
/// # Errors
///
/// Returns `ToolError::Transport` if the backend cannot be reached or its
/// answer cannot be read.
pub async fn call_back(backend: &BackendClient, args: &CallBack) -> ToolResult {
    backend
        .post_form(
            &format!("call_back/{}", args.session_id),
            args,
            Outcome::relay(CALL_BACK_FAILED),
        )
        .await
}

/// Create the `call_back` tool
#[must_use]
pub fn call_back_tool(backend: BackendClient) -> (Tool, ToolExecutorFn) {
    let tool = Tool::new(NAME, "Request a call back on behalf of the user", schema());

    let executor = bind_executor(tool.schema.clone(), move |args: CallBack| {
        let backend = backend.clone();
        async move { call_back(&backend, &args).await }
    });

    (tool, executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_payload;

    #[test]
    fn test_schema_matches_arguments() {
        let schema = schema();
        assert_eq!(schema.duplicate_field(), None);

        let args: CallBack = schema.bind(&sample_payload(&schema)).unwrap();
        assert_eq!(args.question, "question");
    }

    #[test]
    fn test_tool_definition() {
        let backend = crate::test_support::offline_backend();
        let (tool, _executor) = call_back_tool(backend);

        assert_eq!(tool.name, "call_back");
        assert_eq!(
            tool.schema.field_names().collect::<Vec<_>>(),
            ["session_id", "name", "phone_no", "question"]
        );
    }
}
