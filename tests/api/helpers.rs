use crate::mock_relay::{MockRelay, RelayBehaviour};
use contact_relay::configuration::{get_configuration, TlsMode};
use contact_relay::email_client::EmailClient;
use contact_relay::startup::run;
use contact_relay::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::net::TcpListener;

pub const RECIPIENT: &str = "owner@example.com";

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub relay: MockRelay,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Sends an already encoded body, so fields can be left out entirely.
    pub async fn post_raw_contact(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_with_content_type(
        &self,
        content_type: Option<&'static str>,
        body: &'static str,
    ) -> reqwest::Response {
        let mut request = self.api_client.post(&format!("{}/", &self.address));
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }
        request
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contact_page(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contact_page_html(&self) -> String {
        self.get_contact_page().await.text().await.unwrap()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_relay(RelayBehaviour::Accept).await
}

pub async fn spawn_app_with_relay(behaviour: RelayBehaviour) -> TestApp {
    // The mock relay cannot negotiate TLS
    spawn_app_with_tls(behaviour, TlsMode::Plaintext).await
}

pub async fn spawn_app_with_tls(behaviour: RelayBehaviour, tls: TlsMode) -> TestApp {
    Lazy::force(&TRACING);

    let relay = MockRelay::start(behaviour).await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.smtp.host = "127.0.0.1".to_string();
        c.smtp.port = relay.port();
        c.smtp.username = MockRelay::USERNAME.to_string();
        c.smtp.password = Secret::new(MockRelay::PASSWORD.to_string());
        c.smtp.sender = None;
        c.smtp.tls = tls;
        c.recipient_email = RECIPIENT.to_string();
        c
    };

    let sender = configuration
        .smtp
        .sender()
        .expect("Invalid sender address in configuration");
    let recipient = configuration
        .recipient()
        .expect("Invalid recipient address in configuration");
    let email_client = EmailClient::new(&configuration.smtp, sender, recipient)
        .expect("Failed to build the SMTP transport");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // We retrieve the port assigned to us by the OS
    let port = listener.local_addr().unwrap().port();

    let server = run(listener, email_client, configuration.application.secret_key)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        relay,
        api_client,
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}
