use lettre::address::AddressError;
use lettre::message::Mailbox;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Used to sign flash cookies when no `SECRET_KEY` is provided.
pub const DEFAULT_SECRET_KEY: &str = "default_secret_key";

const DEFAULT_APPLICATION_HOST: &str = "127.0.0.1";
const DEFAULT_APPLICATION_PORT: u16 = 5000;
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub smtp: SmtpSettings,
    pub recipient_email: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub secret_key: Secret<String>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    /// From address of outgoing mail, the relay account when unset.
    #[serde(default)]
    pub sender: Option<String>,
    pub tls: TlsMode,
}

/// How the SMTP session is secured before authenticating.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS; the upgrade must succeed.
    Starttls,
    /// No encryption. Only meant for local relays.
    Plaintext,
}

impl Settings {
    pub fn recipient(&self) -> Result<Mailbox, AddressError> {
        self.recipient_email.parse()
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{host}:{port}", host = self.host, port = self.port)
    }

    pub fn uses_default_secret_key(&self) -> bool {
        self.secret_key.expose_secret() == DEFAULT_SECRET_KEY
    }
}

impl SmtpSettings {
    pub fn sender(&self) -> Result<Mailbox, AddressError> {
        self.sender.as_deref().unwrap_or(&self.username).parse()
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // A missing .env file is fine, the real environment still applies
    dotenvy::dotenv().ok();

    let env = |key: &str| std::env::var(key).ok();

    let settings = config::Config::builder()
        .set_default("application.host", DEFAULT_APPLICATION_HOST)?
        .set_default("application.port", i64::from(DEFAULT_APPLICATION_PORT))?
        .set_default("application.secret_key", DEFAULT_SECRET_KEY)?
        .set_default("smtp.port", i64::from(DEFAULT_SMTP_PORT))?
        .set_default("smtp.tls", "starttls")?
        // Read config file
        .add_source(config::File::with_name("configuration").required(false))
        // e.g. `APP_SMTP__PORT=2525` sets `smtp.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("smtp.host", env("SMTP_SERVER"))?
        .set_override_option("smtp.port", env("SMTP_PORT"))?
        .set_override_option("smtp.username", env("SMTP_USERNAME"))?
        .set_override_option("smtp.password", env("SMTP_PASSWORD"))?
        .set_override_option("recipient_email", env("RECIPIENT_EMAIL"))?
        .set_override_option("application.secret_key", env("SECRET_KEY"))?
        .build()?;

    // Parse config into Settings struct
    settings.try_deserialize::<Settings>()
}
