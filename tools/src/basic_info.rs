//! `basic_info`: upload the customer's contact details
//!
//! `POST {endpoint}/basic_info/{session_id}` with a JSON body of every
//! field except `session_id`. Returns a fixed confirmation on 200.

use crate::backend::{BackendClient, Outcome};
use crate::SESSION_ID_DESCRIPTION;
use rental_desk_core::agent::{bind_executor, Tool, ToolExecutorFn, ToolResult};
use rental_desk_core::schema::ToolSchema;
use serde::{Deserialize, Serialize};

/// Tool name
pub const NAME: &str = "basic_info";

/// Arguments for `basic_info`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasicInfo {
    /// Conversation session, routed into the URL
    #[serde(skip_serializing)]
    pub session_id: String,
    /// Company the customer works for
    pub company: String,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone_no: String,
    /// Consent to follow-up emails
    pub marketing_consent: bool,
    /// Honorific
    pub title: String,
    /// Whether the customer may sign contracts for their company
    pub authorized: bool,
}

/// Argument schema
#[must_use]
pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .string("session_id", SESSION_ID_DESCRIPTION)
        .string("company", "The company the user works for")
        .string("name", "The users full name (first and last name)")
        .string(
            "email",
            "The users email that they can be reached at (work or personal)",
        )
        .string("phone_no", "The users phone number (work or personal)")
        .boolean(
            "marketing_consent",
            "Whether the user consents to follow up emails or not",
        )
        .string("title", "The users title otherwise known as honorific")
        .boolean(
            "authorized",
            "Whether the user is authorized to sign contracts on behalf of their company",
        )
}

/// Upload the customer's basic information
///
/// # Errors
///
/// Returns `ToolError::Transport` if the backend cannot be reached.
pub async fn basic_info(backend: &BackendClient, args: &BasicInfo) -> ToolResult {
    backend
        .post_json(&format!("basic_info/{}", args.session_id), args, Outcome::UPLOAD)
        .await
}

/// Create the `basic_info` tool
#[must_use]
pub fn basic_info_tool(backend: BackendClient) -> (Tool, ToolExecutorFn) {
    let tool = Tool::new(
        NAME,
        "Upload the basic customer information to the server",
        schema(),
    );

    let executor = bind_executor(tool.schema.clone(), move |args: BasicInfo| {
        let backend = backend.clone();
        async move { basic_info(&backend, &args).await }
    });

    (tool, executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_payload;
    use serde_json::json;

    #[test]
    fn test_schema_matches_arguments() {
        let schema = schema();
        assert_eq!(schema.duplicate_field(), None);

        let args: BasicInfo = schema.bind(&sample_payload(&schema)).unwrap();
        assert_eq!(args.session_id, "session_id");
        assert!(args.marketing_consent);
    }

    #[test]
    fn test_body_excludes_session_id() {
        let args = BasicInfo {
            session_id: "s1".to_string(),
            company: "Acme".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@acme.com".to_string(),
            phone_no: "555-1234".to_string(),
            marketing_consent: true,
            title: "Ms.".to_string(),
            authorized: false,
        };

        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({
                "company": "Acme",
                "name": "Jane Doe",
                "email": "jane@acme.com",
                "phone_no": "555-1234",
                "marketing_consent": true,
                "title": "Ms.",
                "authorized": false
            })
        );
    }
}
