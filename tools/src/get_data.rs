//! `get_data`: read-only business data (car prices, locations, fleet)
//!
//! `GET {endpoint}/get_{query}`. The query is passed through as given; the
//! backend decides which values exist, and an unknown one comes back as the
//! fixed "are you sure your query was valid?" message.

use crate::backend::{BackendClient, Outcome};
use rental_desk_core::agent::{bind_executor, Tool, ToolExecutorFn, ToolResult};
use rental_desk_core::schema::ToolSchema;
use serde::{Deserialize, Serialize};

/// Tool name
pub const NAME: &str = "get_data";

/// Returned for any non-200 answer
pub const INVALID_QUERY: &str =
    "There was an error getting the information, are you sure your query was valid?";

/// Queries the backend is known to serve
pub const KNOWN_QUERIES: [&str; 3] = ["car_prices", "locations", "fleet"];

const QUERY_DESCRIPTION: &str = "The data you would like to get, options are ['car_prices', 'locations', 'fleet']\n\
'car_prices' returns the prices of all of the car groups.\n\
'locations' returns the main locations Avis operates in.\n\
'fleet' returns the fleet of Avis's cars.\n";

/// Arguments for `get_data`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetData {
    /// Which data set to fetch
    pub query: String,
}

/// Argument schema
#[must_use]
pub fn schema() -> ToolSchema {
    ToolSchema::new().string("query", QUERY_DESCRIPTION)
}

/// Fetch one data set and relay it verbatim
///
/// # Errors
///
/// Returns `ToolError::Transport` if the backend cannot be reached or its
/// answer cannot be read.
pub async fn get_data(backend: &BackendClient, args: &GetData) -> ToolResult {
    backend
        .get(&format!("get_{}", args.query), Outcome::relay(INVALID_QUERY))
        .await
}

/// Create the `get_data` tool
#[must_use]
pub fn get_data_tool(backend: BackendClient) -> (Tool, ToolExecutorFn) {
    let tool = Tool::new(
        NAME,
        "Get some data from the server about car prices, locations, and the fleet of cars",
        schema(),
    );

    let executor = bind_executor(tool.schema.clone(), move |args: GetData| {
        let backend = backend.clone();
        async move { get_data(&backend, &args).await }
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
        let args: GetData = schema.bind(&sample_payload(&schema)).unwrap();
        assert_eq!(args.query, "query");
    }

    #[test]
    fn test_description_lists_known_queries() {
        let schema = schema();
        let description = &schema.fields()[0].description;
        for query in KNOWN_QUERIES {
            assert!(description.contains(&format!("'{query}'")));
        }
    }

    #[test]
    fn test_unknown_query_is_not_rejected_locally() {
        let args: GetData = schema().bind(r#"{"query": "weather"}"#).unwrap();
        assert_eq!(args.query, "weather");
    }
}
