//! Client for the reminder service.
//!
//! Callers that render advisories should use
//! [`ReminderClient::advisory_or_fallback`]: the service is optional and any
//! failure degrades to [`Advisory::service_unavailable`].

use std::time::Duration;

use reqwest::Client;

use crate::{
    error::ClientError,
    model::{Advisory, Reading, ReminderRequest, ReminderResponse},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ReminderClient {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl ReminderClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/reminder", self.base_url)
    }

    /// POST the reading and decode the full response envelope.
    pub async fn fetch(
        &self,
        reading: &Reading,
        location: Option<&str>,
    ) -> Result<ReminderResponse, ClientError> {
        let body = ReminderRequest::from_reading(reading, location);

        let res = self
            .http
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }

    pub async fn advisory_or_fallback(
        &self,
        reading: &Reading,
        location: Option<&str>,
    ) -> Advisory {
        match self.fetch(reading, location).await {
            Ok(response) => {
                tracing::debug!(reminder = %response.reminder.message, "fetched reminder");
                response.reminder
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    timeout = err.is_timeout(),
                    url = %self.endpoint(),
                    "reminder service unavailable, using fallback advisory"
                );
                Advisory::service_unavailable()
            }
        }
    }
}
