//! SMTP-backed notifier.
//!
//! Delivery runs over an implicit-TLS (SMTPS) connection using credentials
//! supplied through the environment. Each dispatch is handed to a short-lived
//! background thread; the caller never waits for, or learns about, the
//! delivery outcome.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::Notifier;

/// Failure to assemble the SMTP configuration from the environment.
#[derive(Debug, Error)]
pub enum SmtpConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("EMAIL_PORT is not a valid port number: {0}")]
    InvalidPort(String),

    #[error("SMTP relay setup failed: {0}")]
    Relay(#[from] lettre::transport::smtp::Error),
}

/// Mail-submission settings, read from the environment.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub sender: String,
    pub password: SecretString,
}

impl SmtpConfig {
    /// Load from `EMAIL_SERVER`, `EMAIL_PORT`, `SENDER_EMAIL` and
    /// `EMAIL_PASSWORD`, honoring a `.env` file when present.
    pub fn from_env() -> Result<Self, SmtpConfigError> {
        let _ = dotenvy::dotenv();

        let var = |name: &'static str| {
            std::env::var(name).map_err(|_| SmtpConfigError::MissingVar(name))
        };

        let port_raw = var("EMAIL_PORT")?;
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| SmtpConfigError::InvalidPort(port_raw))?;

        Ok(Self {
            server: var("EMAIL_SERVER")?,
            port,
            sender: var("SENDER_EMAIL")?,
            password: SecretString::from(var("EMAIL_PASSWORD")?),
        })
    }
}

/// Notifier delivering over SMTPS via lettre.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: SmtpTransport,
    sender: String,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, SmtpConfigError> {
        let credentials = Credentials::new(
            config.sender.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = SmtpTransport::relay(&config.server)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            sender: config.sender.clone(),
        })
    }

    fn build_message(&self, body: &str, recipient: &str) -> Option<Message> {
        let message = Message::builder()
            .from(self.sender.parse().ok()?)
            .to(recipient.parse().ok()?)
            .subject("Ordermill notification")
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string());

        match message {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::error!(error = %e, "failed to build notification message");
                None
            }
        }
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, message: &str, recipients: &[String]) {
        for recipient in recipients {
            let Some(mail) = self.build_message(message, recipient) else {
                tracing::error!(%recipient, "skipping undeliverable recipient");
                continue;
            };

            let mailer = self.mailer.clone();

            // Fire-and-forget: no retry, no cancellation, outcome only logged.
            std::thread::spawn(move || match mailer.send(&mail) {
                Ok(_) => tracing::info!("the message has been sent successfully"),
                Err(e) => tracing::error!(error = %e, "SMTP error"),
            });
        }
    }
}
