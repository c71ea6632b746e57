use crate::domain::Submission;
use crate::email_client::EmailClient;
use crate::utils::see_other;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

/// Absent fields deserialize as empty strings and fail validation like blank ones.
#[derive(serde::Deserialize, Default)]
pub struct FormData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    message: String,
}

#[tracing::instrument(
    name = "Submitting a contact message",
    skip(form, email_client),
    fields(
        sender_email = tracing::field::Empty,
        subject = tracing::field::Empty
    )
)]
pub async fn submit_contact(
    // A body that is not form-encoded counts as a form with every field empty
    form: Option<web::Form<FormData>>,
    email_client: web::Data<EmailClient>,
) -> HttpResponse {
    let FormData {
        name,
        email,
        subject,
        message,
    } = form.map(|form| form.0).unwrap_or_default();

    tracing::Span::current()
        .record("sender_email", &tracing::field::display(&email))
        .record("subject", &tracing::field::display(&subject));

    let submission = match Submission::parse(name, email, subject, message) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!(
                missing_fields = ?e.missing_fields,
                "Rejected an incomplete contact submission"
            );
            FlashMessage::error(e.to_string()).send();
            return see_other("/");
        }
    };

    match email_client.send_submission(&submission).await {
        Ok(()) => {
            FlashMessage::success("Email sent successfully!").send();
        }
        Err(e) => {
            tracing::error!(
                error.message = %e,
                error.cause_chain = ?e,
                "Failed to relay the contact message"
            );
            FlashMessage::error(format!("Error sending email: {}", e)).send();
        }
    }
    see_other("/")
}
