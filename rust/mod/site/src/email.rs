//! Templated email delivery.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email transport: {0}")]
    Transport(String),
    #[error("email rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("email not configured")]
    NotConfigured,
}

/// Account identifiers for the email service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailSettings {
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedEmail {
    pub service_id: String,
    pub template_id: String,
    pub fields: BTreeMap<String, String>,
    pub public_key: String,
}

impl TemplatedEmail {
    pub fn new(settings: &EmailSettings, fields: BTreeMap<String, String>) -> Self {
        Self {
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            fields,
            public_key: settings.public_key.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &TemplatedEmail) -> Result<(), EmailError>;
}

/// Request body of the EmailJS REST API.
#[derive(Serialize)]
struct SendBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
}

pub struct EmailJsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl EmailJsClient {
    pub fn new() -> Self {
        Self::with_endpoint(EMAILJS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

impl Default for EmailJsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailJsClient {
    async fn send(&self, email: &TemplatedEmail) -> Result<(), EmailError> {
        if email.service_id.is_empty() || email.template_id.is_empty() || email.public_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }
        let body = SendBody {
            service_id: &email.service_id,
            template_id: &email.template_id,
            user_id: &email.public_key,
            template_params: &email.fields,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            debug!(template = %email.template_id, "email sent");
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        error!(status = status.as_u16(), body = %text, "email rejected");
        Err(EmailError::Rejected {
            status: status.as_u16(),
            body: text,
        })
    }
}
