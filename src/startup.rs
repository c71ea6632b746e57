use std::net::TcpListener;

use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha512};
use tracing_actix_web::TracingLogger;

use crate::email_client::EmailClient;
use crate::routes;

/// Stretches the configured secret to the 64 bytes the cookie `Key` needs.
pub fn cookie_signing_key(secret_key: &Secret<String>) -> Key {
    let digest = Sha512::digest(secret_key.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    secret_key: Secret<String>,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let message_store = CookieMessageStore::builder(cookie_signing_key(&secret_key)).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(TracingLogger::default())
            .route("/", web::get().to(routes::contact::contact_form))
            .route("/", web::post().to(routes::contact::submit_contact))
            .route("/health", web::get().to(routes::health_check::health_check))
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
