//! Lambda-style row fetch handler
//!
//! Gateway contract: input carries `pathParameters.id`, output is
//! `{statusCode, body}` with the body holding JSON row data or an error
//! object. Database failures are logged and mapped to a fixed 500 shape;
//! their semantics belong to the client library.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::error;

use crate::connection::{Client, Statement};

/// Incoming gateway event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub path_parameters: HashMap<String, String>,
}

impl GatewayEvent {
    /// Event with a single `id` path parameter
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut path_parameters = HashMap::new();
        path_parameters.insert("id".to_string(), id.into());
        GatewayEvent { path_parameters }
    }
}

/// Outgoing gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: String,
}

impl GatewayResponse {
    fn ok(body: &JsonValue) -> Self {
        GatewayResponse {
            status_code: 200,
            body: body.to_string(),
        }
    }

    fn error(status_code: u16, message: &str) -> Self {
        GatewayResponse {
            status_code,
            body: json!({ "error": message }).to_string(),
        }
    }
}

/// Fetch a single item by its `id` path parameter
///
/// Returns 200 with the row, 404 when no row matches, 400 when the event
/// carries no `id`, and 500 with a fixed error shape on database failures.
pub async fn get_item(client: &Client, event: &GatewayEvent) -> GatewayResponse {
    let id = match event.path_parameters.get("id") {
        Some(id) => id.as_str(),
        None => return GatewayResponse::error(400, "Missing path parameter: id"),
    };

    let stmt = Statement::new("SELECT * FROM items WHERE id = ?").arg(id);
    match client.query_first(&stmt).await {
        Ok(Some(row)) => GatewayResponse::ok(&JsonValue::Object(row)),
        Ok(None) => GatewayResponse::error(404, "Not Found"),
        Err(e) => {
            error!(error = %e, id, "item lookup failed");
            GatewayResponse::error(500, "Internal Server Error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionSettings;

    async fn seeded_client() -> Client {
        let client = Client::connect(&ConnectionSettings::new(":memory:"))
            .await
            .unwrap();
        client
            .execute(&Statement::new(
                "CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT)",
            ))
            .await
            .unwrap();
        client
            .execute(&Statement::new("INSERT INTO items (id, name) VALUES (1, 'widget')"))
            .await
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let client = seeded_client().await;
        let response = get_item(&client, &GatewayEvent::with_id("1")).await;

        assert_eq!(response.status_code, 200);
        let body: JsonValue = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "widget");
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let client = seeded_client().await;
        let response = get_item(&client, &GatewayEvent::with_id("999")).await;

        assert_eq!(response.status_code, 404);
        let body: JsonValue = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_get_item_missing_id() {
        let client = seeded_client().await;
        let response = get_item(&client, &GatewayEvent::default()).await;

        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_get_item_database_error() {
        // no items table at all
        let client = Client::connect(&ConnectionSettings::new(":memory:"))
            .await
            .unwrap();
        let response = get_item(&client, &GatewayEvent::with_id("1")).await;

        assert_eq!(response.status_code, 500);
        let body: JsonValue = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[test]
    fn test_event_deserializes_gateway_shape() {
        let event: GatewayEvent =
            serde_json::from_str(r#"{"pathParameters": {"id": "42"}}"#).unwrap();
        assert_eq!(event.path_parameters.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_response_serializes_gateway_shape() {
        let response = GatewayResponse::error(500, "Internal Server Error");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 500);
        assert!(json["body"].as_str().unwrap().contains("Internal Server Error"));
    }
}
