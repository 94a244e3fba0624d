//! Outbound Mail
//!
//! A [`Mailer`] delivers one [`Envelope`]. Two adapters exist:
//! [`LogMailer`] writes the message to the log (development, tests) and
//! [`HttpMailer`] posts it as JSON to a relay service.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail relay rejected the message with status {status}")]
    Rejected { status: u16 },
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError>;
}

/// Writes every message to the log instead of delivering it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        tracing::info!(
            from = %envelope.from,
            to = %envelope.to,
            subject = %envelope.subject,
            body = %envelope.body,
            "Mail not delivered (log transport)"
        );
        Ok(())
    }
}

/// Posts `{from, to, subject, body}` to a mail relay endpoint
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(to = %envelope.to, status = status.as_u16(), "Mail relay rejected message");
            return Err(MailError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(to = %envelope.to, "Mail handed to relay");
        Ok(())
    }
}

/// Mailer chosen at startup from configuration
#[derive(Debug, Clone)]
pub enum ConfiguredMailer {
    Log(LogMailer),
    Http(HttpMailer),
}

impl ConfiguredMailer {
    /// Relay when an endpoint is configured, log transport otherwise
    pub fn from_relay_url(relay_url: Option<String>) -> Self {
        match relay_url {
            Some(url) if !url.trim().is_empty() => Self::Http(HttpMailer::new(url)),
            _ => Self::Log(LogMailer),
        }
    }
}

impl Mailer for ConfiguredMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), MailError> {
        match self {
            Self::Log(mailer) => Mailer::send(mailer, envelope).await,
            Self::Http(mailer) => Mailer::send(mailer, envelope).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> Envelope {
        Envelope {
            from: "noreply@yamdb.local".to_string(),
            to: "reader@example.com".to_string(),
            subject: "Confirmation code".to_string(),
            body: "Your confirmation code is: abc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        assert!(Mailer::send(&LogMailer, &envelope()).await.is_ok());
    }

    #[test]
    fn test_relay_selection() {
        assert!(matches!(
            ConfiguredMailer::from_relay_url(None),
            ConfiguredMailer::Log(_)
        ));
        assert!(matches!(
            ConfiguredMailer::from_relay_url(Some("  ".to_string())),
            ConfiguredMailer::Log(_)
        ));
        match ConfiguredMailer::from_relay_url(Some("http://relay.local/send".to_string())) {
            ConfiguredMailer::Http(mailer) => assert_eq!(mailer.endpoint(), "http://relay.local/send"),
            other => panic!("expected relay mailer, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_wire_shape() {
        let json = serde_json::to_value(envelope()).unwrap();
        assert_eq!(json["to"], "reader@example.com");
        assert_eq!(json["subject"], "Confirmation code");
    }
}
