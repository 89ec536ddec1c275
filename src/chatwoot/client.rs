/// Helpdesk REST API client
use crate::constants::API_TOKEN_HEADER;
use crate::error::RelayError;
use crate::models::{HelpdeskConfig, NewContact, NewConversation, NewMessage};
use reqwest::{Client, Method, header};
use serde_json::{Value, json};
use std::fmt;

/// Client for the account-scoped helpdesk API.
///
/// Stateless apart from reqwest's connection pool; one instance is shared
/// across all requests. Calls are not retried; a failure propagates to the
/// caller immediately.
pub struct ChatwootClient {
    client: Client,
    base_url: String,
    account_id: String,
    api_token: String,
}

impl ChatwootClient {
    pub fn new(config: &HelpdeskConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/v1/accounts/{}{}",
            self.base_url, self.account_id, path
        )
    }

    /// One call against the helpdesk API.
    ///
    /// The token travels in two headers: the API's own `api_access_token`
    /// and a standard Authorization scheme, because some ingress layers
    /// strip headers containing underscores. A response body that is not
    /// JSON is wrapped as `{"raw": <text>}` instead of failing; an empty
    /// body becomes `{}`. A non-success status fails with the parsed-or-raw
    /// body as the error message.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RelayError> {
        let url = self.endpoint(path);

        let mut request = self
            .client
            .request(method, &url)
            .header(API_TOKEN_HEADER, &self.api_token)
            .header(
                header::AUTHORIZATION,
                format!("Token token={}", self.api_token),
            );
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed = if text.is_empty() {
            json!({})
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }))
        };

        if !status.is_success() {
            return Err(RelayError::Helpdesk(parsed.to_string()));
        }

        Ok(parsed)
    }

    /// Creates or updates a contact. The response shape varies across API
    /// versions, so the raw value is returned for the caller to unpack.
    pub async fn create_contact(&self, contact: &NewContact<'_>) -> Result<Value, RelayError> {
        let body = serde_json::to_value(contact)
            .map_err(|e| RelayError::Helpdesk(format!("Failed to encode contact: {}", e)))?;
        self.call(Method::POST, "/contacts", Some(&body)).await
    }

    pub async fn create_conversation(
        &self,
        conversation: &NewConversation,
    ) -> Result<Value, RelayError> {
        let body = serde_json::to_value(conversation)
            .map_err(|e| RelayError::Helpdesk(format!("Failed to encode conversation: {}", e)))?;
        self.call(Method::POST, "/conversations", Some(&body)).await
    }

    pub async fn post_message(
        &self,
        conversation_id: i64,
        message: &NewMessage<'_>,
    ) -> Result<Value, RelayError> {
        let body = serde_json::to_value(message)
            .map_err(|e| RelayError::Helpdesk(format!("Failed to encode message: {}", e)))?;
        self.call(
            Method::POST,
            &format!("/conversations/{}/messages", conversation_id),
            Some(&body),
        )
        .await
    }

    pub async fn get_conversation(&self, conversation_id: i64) -> Result<Value, RelayError> {
        self.call(
            Method::GET,
            &format!("/conversations/{}", conversation_id),
            None,
        )
        .await
    }

    pub async fn get_contact(&self, contact_id: i64) -> Result<Value, RelayError> {
        self.call(Method::GET, &format!("/contacts/{}", contact_id), None)
            .await
    }
}

// The API token must never reach logs
impl fmt::Debug for ChatwootClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatwootClient")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::TEST_API_TOKEN;

    fn test_client() -> ChatwootClient {
        ChatwootClient::new(&HelpdeskConfig {
            base_url: "https://helpdesk.example.com".to_string(),
            account_id: "7".to_string(),
            inbox_id: None,
            api_token: TEST_API_TOKEN.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_is_account_scoped() {
        let client = test_client();
        assert_eq!(
            client.endpoint("/contacts"),
            "https://helpdesk.example.com/api/v1/accounts/7/contacts"
        );
        assert_eq!(
            client.endpoint("/conversations/42/messages"),
            "https://helpdesk.example.com/api/v1/accounts/7/conversations/42/messages"
        );
    }

    #[test]
    fn test_debug_omits_token() {
        let rendered = format!("{:?}", test_client());
        assert!(!rendered.contains(TEST_API_TOKEN));
        assert!(rendered.contains("helpdesk.example.com"));
    }

    #[test]
    fn test_call_unreachable_host_errors() {
        let client = ChatwootClient::new(&HelpdeskConfig {
            // Reserved port on localhost; the connection is refused
            base_url: "http://127.0.0.1:1".to_string(),
            account_id: "1".to_string(),
            inbox_id: None,
            api_token: TEST_API_TOKEN.to_string(),
        })
        .unwrap();

        let result = tokio_test::block_on(client.call(Method::GET, "/contacts/1", None));
        assert!(matches!(result, Err(RelayError::Helpdesk(_))));
    }
}
