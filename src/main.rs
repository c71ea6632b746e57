use anyhow::Context;
use contact_relay::configuration::{get_configuration, TlsMode};
use contact_relay::email_client::EmailClient;
use contact_relay::startup::run;
use contact_relay::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("contact-relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration().context("Failed to read configuration")?;
    if config.application.uses_default_secret_key() {
        tracing::warn!("SECRET_KEY is not set, flash cookies are signed with the default key");
    }
    if config.smtp.tls != TlsMode::Starttls {
        tracing::warn!(
            smtp.host = %config.smtp.host,
            "SMTP session is not encrypted, credentials are sent in plaintext"
        );
    }

    let sender = config
        .smtp
        .sender()
        .context("Invalid sender address in configuration")?;
    let recipient = config
        .recipient()
        .context("Invalid recipient address in configuration")?;
    let email_client = EmailClient::new(&config.smtp, sender, recipient)
        .context("Failed to build the SMTP transport")?;

    let address = config.application.address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(
        %address,
        smtp.host = %config.smtp.host,
        smtp.port = config.smtp.port,
        "Contact form listening"
    );

    run(listener, email_client, config.application.secret_key)?.await?;
    Ok(())
}
