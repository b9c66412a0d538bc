//! HTTP mail relay client.
//!
//! Confirmation emails go out through a JSON relay endpoint rather
//! than raw SMTP, so the daemon only needs an HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use gibi_core::users::{ConfirmationMailer, User};
use gibi_core::{Error, Result};

use crate::config::MailRelayConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONFIRMATION_SUBJECT: &str = "Confirme seu cadastro";

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

pub struct RelayMailer {
    client: Client,
    relay_url: String,
    from_address: String,
}

impl RelayMailer {
    pub fn new(config: MailRelayConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            relay_url: config.relay_url.trim_end_matches('/').to_string(),
            from_address: config.from_address,
        }
    }

    fn confirmation_body(user: &User) -> String {
        format!(
            "Olá {},\n\nSeu cadastro ainda não foi confirmado. \
             Acesse o link enviado no seu primeiro email para ativar a conta.\n",
            user.name
        )
    }
}

#[async_trait]
impl ConfirmationMailer for RelayMailer {
    async fn send_confirmation(&self, user: &User) -> Result<()> {
        let message = MailMessage {
            from: &self.from_address,
            to: &user.email,
            subject: CONFIRMATION_SUBJECT,
            text: Self::confirmation_body(user),
        };

        let response = self
            .client
            .post(format!("{}/messages", self.relay_url))
            .json(&message)
            .send()
            .await
            .map_err(|e| Error::Mail(format!("relay request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Mail(format!(
                "relay returned HTTP {} for {}",
                response.status().as_u16(),
                user.email
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn message_payload_has_the_relay_shape() {
        let user = User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            is_activated: false,
            created_at: Utc::now(),
        };
        let message = MailMessage {
            from: "noreply@gibi.app",
            to: &user.email,
            subject: CONFIRMATION_SUBJECT,
            text: RelayMailer::confirmation_body(&user),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["from"], "noreply@gibi.app");
        assert_eq!(json["to"], "ana@example.com");
        assert_eq!(json["subject"], "Confirme seu cadastro");
        assert!(json["text"].as_str().unwrap().starts_with("Olá Ana,"));
    }

    #[test]
    fn relay_url_trailing_slash_is_trimmed() {
        let mailer = RelayMailer::new(MailRelayConfig {
            relay_url: "https://mail.internal/api/".to_string(),
            from_address: "noreply@gibi.app".to_string(),
        });
        assert_eq!(mailer.relay_url, "https://mail.internal/api");
    }
}
