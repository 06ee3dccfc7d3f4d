use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Address;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use super::templates::VerificationEmail;
use crate::account::errors::DeliveryError;
use crate::account::models::AccountName;
use crate::account::models::EmailAddress;
use crate::account::ports::VerificationMailer;
use crate::config::SmtpConfig;

/// Verification mailer delivering through an authenticated SMTP relay (STARTTLS).
///
/// One send per call; failures are returned, never retried.
pub struct SmtpVerificationMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    app_name: String,
}

impl SmtpVerificationMailer {
    /// Build a mailer from SMTP settings.
    ///
    /// The SMTP username doubles as the sender address, shown as
    /// `"{app_name}" <{username}>`. No connection is opened until the first send.
    ///
    /// # Errors
    /// * `InvalidAddress` - Username is not a valid mail address
    /// * `Transport` - Relay host could not be configured for TLS
    pub fn new(config: &SmtpConfig) -> Result<Self, DeliveryError> {
        let sender_address = config
            .username
            .parse::<Address>()
            .map_err(|e| DeliveryError::InvalidAddress(format!("{}: {}", config.username, e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: Mailbox::new(Some(config.app_name.clone()), sender_address),
            app_name: config.app_name.clone(),
        })
    }

    /// Open a connection to the relay and authenticate, without sending anything.
    ///
    /// # Errors
    /// * `Transport` - Relay unreachable, TLS negotiation or authentication failed
    pub async fn check_connection(&self) -> Result<(), DeliveryError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DeliveryError::Transport(
                "Relay did not answer NOOP".to_string(),
            )),
            Err(e) => Err(DeliveryError::Transport(e.to_string())),
        }
    }
}

#[async_trait]
impl VerificationMailer for SmtpVerificationMailer {
    async fn send_verification_email(
        &self,
        to: &EmailAddress,
        recipient_name: &AccountName,
        verification_link: &str,
    ) -> Result<(), DeliveryError> {
        let recipient = to
            .as_str()
            .parse::<Address>()
            .map_err(|e| DeliveryError::InvalidAddress(format!("{}: {}", to, e)))?;

        let email =
            VerificationEmail::render(&self.app_name, recipient_name.as_str(), verification_link);

        let message = Message::builder()
            .from(self.sender.clone())
            .to(Mailbox::new(Some(recipient_name.to_string()), recipient))
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))
            .map_err(|e| DeliveryError::MessageBuild(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        tracing::debug!(
            recipient = %to,
            code = %response.code(),
            "Verification email accepted by relay"
        );

        Ok(())
    }
}
