//! Contact form submission
//!
//! The landing page form is posted to the site, checked, and forwarded as
//! JSON to an external webhook. There is no retry; the outcome is shown to
//! the visitor as a toast.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contact form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Invalid(String),

    #[error("Contact form is not configured")]
    NotConfigured,

    #[error("webhook answered with HTTP {status}")]
    Rejected { status: u16 },

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ContactForm {
    /// Trim every field
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self.company.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Check required fields and the email shape
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.is_empty() {
            return Err(ContactError::Invalid("Please enter your name".to_string()));
        }
        if !is_email(&self.email) {
            return Err(ContactError::Invalid(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.message.is_empty() {
            return Err(ContactError::Invalid(
                "Please tell us about your automation needs".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// Posts submissions to the configured webhook
#[derive(Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl ContactClient {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.filter(|url| !url.is_empty()),
        }
    }

    /// Validate and forward a submission
    pub async fn submit(&self, form: &ContactForm) -> Result<(), ContactError> {
        form.validate()?;

        let Some(url) = &self.webhook_url else {
            tracing::warn!("Contact form submitted but no webhook is configured");
            return Err(ContactError::NotConfigured);
        };

        let response = self.client.post(url).json(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Contact webhook rejected submission: {}", status);
            return Err(ContactError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!("Contact form forwarded to webhook");
        Ok(())
    }
}

/// Notification shown after a submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub success: bool,
}

impl Toast {
    pub fn from_result(result: &Result<(), ContactError>) -> Self {
        match result {
            Ok(()) => Self {
                title: "Message Sent!".to_string(),
                description: "We'll get back to you within 24 hours to discuss your automation needs.".to_string(),
                success: true,
            },
            Err(ContactError::Invalid(reason)) => Self {
                title: "Please check the form".to_string(),
                description: reason.clone(),
                success: false,
            },
            Err(e) => Self {
                title: "Message not sent".to_string(),
                description: match e {
                    ContactError::NotConfigured => e.to_string(),
                    _ => "Something went wrong while sending your message. Please try again.".to_string(),
                },
                success: false,
            },
        }
    }
}
