//! SMS delivery through an HTTP gateway.
//!
//! [`HttpSmsGateway`] issues one GET per message with the api key, sender id,
//! recipient and text as query parameters. Delivery is attempted once.

use std::time::Duration;

use crate::SmsGateway;

/// HTTP request timeout for a single gateway call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMS delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("SMS gateway returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// SmsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender_id: String,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required |
    /// |-----------------|----------|
    /// | `SMS_API_URL`   | yes      |
    /// | `SMS_API_KEY`   | yes      |
    /// | `SMS_SENDER_ID` | yes      |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("SMS_API_URL").expect("SMS_API_URL must be set"),
            api_key: std::env::var("SMS_API_KEY").expect("SMS_API_KEY must be set"),
            sender_id: std::env::var("SMS_SENDER_ID").expect("SMS_SENDER_ID must be set"),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpSmsGateway
// ---------------------------------------------------------------------------

pub struct HttpSmsGateway {
    config: SmsConfig,
    client: reqwest::Client,
}

impl HttpSmsGateway {
    /// Create a gateway client with a pre-configured HTTP client.
    pub fn new(config: SmsConfig) -> Result<Self, SmsError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    fn request(&self, mobile: &str, message: &str) -> Result<reqwest::Request, SmsError> {
        let request = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("sender", self.config.sender_id.as_str()),
                ("mobile", mobile),
                ("message", message),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait::async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_sms(&self, mobile: &str, message: &str) -> Result<(), SmsError> {
        let request = self.request(mobile, message)?;
        let response = self.client.execute(request).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(mobile, status, "SMS gateway rejected message");
            return Err(SmsError::HttpStatus(status));
        }

        tracing::info!(mobile, "SMS sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> HttpSmsGateway {
        HttpSmsGateway::new(SmsConfig {
            api_url: "https://sms.example.com/send".into(),
            api_key: "key-123".into(),
            sender_id: "INFLUX".into(),
        })
        .unwrap()
    }

    #[test]
    fn request_carries_query_parameters() {
        let request = gateway().request("9876543210", "Your code is 123456").unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);

        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("apikey".into(), "key-123".into())));
        assert!(pairs.contains(&("sender".into(), "INFLUX".into())));
        assert!(pairs.contains(&("mobile".into(), "9876543210".into())));
        assert!(pairs.contains(&("message".into(), "Your code is 123456".into())));
    }

    #[test]
    fn sms_error_display_http_status() {
        let err = SmsError::HttpStatus(502);
        assert_eq!(err.to_string(), "SMS gateway returned HTTP 502");
    }

    #[test]
    fn invalid_url_is_a_request_error() {
        let gateway = HttpSmsGateway::new(SmsConfig {
            api_url: "://bad".into(),
            api_key: String::new(),
            sender_id: String::new(),
        })
        .unwrap();
        assert!(matches!(
            gateway.request("9876543210", "hi"),
            Err(SmsError::Request(_))
        ));
    }
}
