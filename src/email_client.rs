use crate::configuration::{SmtpSettings, TlsMode};
use crate::domain::Submission;
use crate::utils::error_chain_fmt;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::fmt::Formatter;

/// Relays contact submissions to a fixed recipient through an authenticated SMTP account.
///
/// Each send opens its own SMTP session (connect, optional STARTTLS, AUTH,
/// MAIL/RCPT/DATA) and closes it afterwards, whatever the outcome.
pub struct EmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

#[derive(thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Compose(#[from] lettre::error::Error),
    #[error(transparent)]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl std::fmt::Debug for DeliveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl EmailClient {
    pub fn new(
        settings: &SmtpSettings,
        sender: Mailbox,
        recipient: Mailbox,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = match settings.tls {
            TlsMode::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            TlsMode::Plaintext => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };
        let credentials = Credentials::new(
            settings.username.clone(),
            settings.password.expose_secret().clone(),
        );
        let transport = builder
            .port(settings.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender,
            recipient,
        })
    }

    pub fn compose(&self, submission: &Submission) -> Result<Message, DeliveryError> {
        let body = format!(
            "Name: {name}\nEmail: {email}\n\n{message}",
            name = submission.name,
            email = submission.email,
            message = submission.message,
        );
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(submission.subject.to_string())
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;
        Ok(message)
    }

    #[tracing::instrument(
        name = "Relaying a contact message over SMTP",
        skip(self, submission),
        fields(recipient = %self.recipient.email)
    )]
    pub async fn send_submission(&self, submission: &Submission) -> Result<(), DeliveryError> {
        let message = self.compose(submission)?;
        let response = self.transport.send(message).await?;
        tracing::info!(
            smtp.code = %response.code(),
            "Message accepted by the relay"
        );
        Ok(())
    }
}
