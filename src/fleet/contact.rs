use std::time::Duration;

use async_trait::async_trait;
use dioxus::logger::tracing::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONTACT_LATENCY: Duration = Duration::from_secs(2);
pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Thank you for your message! We will get back to you soon.";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ContactError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Failed to send message. Please try again.")]
    Delivery(String),
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<(), ContactError>;
}

/// Accepts every valid form after a fixed delay. Stands in for a real
/// delivery channel; nothing is sent anywhere.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_LATENCY)
    }
}

#[async_trait]
impl ContactSubmitter for SimulatedSubmitter {
    async fn submit(&self, form: &ContactForm) -> Result<(), ContactError> {
        if let Err(e) = form.validate() {
            warn!("[contact] rejected submission: {}", e);
            return Err(e);
        }
        tokio::time::sleep(self.latency).await;
        info!("[contact] accepted message from {}", form.email.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Jane Smith".into(),
            email: "jane@example.com".into(),
            subject: Some("Fleet demo".into()),
            message: "We run 40 EVs and want a demo.".into(),
        }
    }

    #[test]
    fn required_fields() {
        assert_eq!(form().validate(), Ok(()));

        let mut f = form();
        f.name = "   ".into();
        assert_eq!(f.validate(), Err(ContactError::MissingField("name")));
        assert_eq!(
            f.validate().unwrap_err().to_string(),
            "Please fill in the name field."
        );

        let mut f = form();
        f.message.clear();
        assert_eq!(f.validate(), Err(ContactError::MissingField("message")));

        let mut f = form();
        f.subject = None;
        assert_eq!(f.validate(), Ok(()));
    }

    #[test]
    fn email_shape() {
        for ok in ["a@b.co", "jane.smith@fleet.example.com", " jane@example.com "] {
            let mut f = form();
            f.email = ok.into();
            assert_eq!(f.validate(), Ok(()), "{ok}");
        }
        let bad_emails = [
            "jane",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@.com",
            "ja ne@x.com",
            "a@b@c.com",
            "a@b.com.",
        ];
        for bad in bad_emails {
            let mut f = form();
            f.email = bad.into();
            assert_eq!(f.validate(), Err(ContactError::InvalidEmail), "{bad}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submitter_waits_then_succeeds() {
        let submitter = SimulatedSubmitter::default();
        let started = tokio::time::Instant::now();
        assert_eq!(submitter.submit(&form()).await, Ok(()));
        assert!(started.elapsed() >= DEFAULT_CONTACT_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submitter_rejects_without_waiting() {
        let submitter = SimulatedSubmitter::default();
        let started = tokio::time::Instant::now();
        let mut f = form();
        f.email = "nope".into();
        assert_eq!(submitter.submit(&f).await, Err(ContactError::InvalidEmail));
        assert!(started.elapsed() < DEFAULT_CONTACT_LATENCY);
    }
}
