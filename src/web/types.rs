//! Payloads exchanged with the marketplace API.

use crate::table::{CellValue, TableRow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Error body returned by the API. `detail` is a string for handled errors
/// and a list for request validation errors.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    /// Parses the body and returns `detail` when it is a non-empty string.
    #[must_use]
    pub fn detail_message(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            Value::String(detail) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub exchange_items: Option<String>,
    #[serde(default)]
    pub allow_negotiation: bool,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub city: Option<String>,
}

fn optional_text(value: Option<&str>) -> CellValue {
    value.map_or(CellValue::Missing, CellValue::from)
}

impl TableRow for Post {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => CellValue::Number(self.id as f64),
            "title" => CellValue::from(self.title.as_str()),
            "description" => CellValue::from(self.description.as_str()),
            "price" => CellValue::from(self.price),
            "is_free" => CellValue::from(if self.is_free { "yes" } else { "no" }),
            "exchange_items" => optional_text(self.exchange_items.as_deref()),
            "allow_negotiation" => {
                CellValue::from(if self.allow_negotiation { "yes" } else { "no" })
            }
            "state" => optional_text(self.state.as_deref()),
            "city" => optional_text(self.city.as_deref()),
            _ => CellValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_message_reads_string_detail() {
        assert_eq!(
            ApiErrorBody::detail_message(r#"{"detail": "User already exists"}"#),
            Some("User already exists".to_string())
        );
    }

    #[test]
    fn detail_message_ignores_validation_lists_and_garbage() {
        assert_eq!(
            ApiErrorBody::detail_message(r#"{"detail": [{"msg": "field required"}]}"#),
            None
        );
        assert_eq!(ApiErrorBody::detail_message("<html>oops</html>"), None);
        assert_eq!(ApiErrorBody::detail_message(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn post_deserializes_with_optional_fields() -> Result<(), serde_json::Error> {
        let post: Post = serde_json::from_value(json!({
            "id": 4,
            "title": "Desk",
            "description": "Oak desk",
            "price": null,
            "city": "Lyon",
            "state": "published"
        }))?;
        assert_eq!(post.cell("price"), CellValue::Missing);
        assert_eq!(post.cell("city"), CellValue::Text("Lyon".to_string()));
        assert_eq!(post.cell("id"), CellValue::Number(4.0));
        assert_eq!(post.cell("exchange_items"), CellValue::Missing);
        Ok(())
    }
}
