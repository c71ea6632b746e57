use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use std::fmt::Write;

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Success => "success",
        Level::Error => "error",
        Level::Warning => "warning",
        _ => "info",
    }
}

pub async fn contact_form(
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    let mut msg_html = String::new();
    for message in flash_messages.iter() {
        writeln!(
            msg_html,
            r#"<p class="{}"><i>{}</i></p>"#,
            level_class(message.level()),
            htmlescape::encode_minimal(message.content())
        )
        .unwrap();
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            r#"
            <!DOCTYPE html>
            <html lang="en">
            <head>
                <meta http-equiv="content-type" content="text/html; charset=utf-8">
                <title>Contact</title>
            </head>
            <body>
                {}
                <p>Send us a message:</p>
                <form action="/" method="post">
                    <label>Name
                        <br/>
                        <input
                            type="text"
                            placeholder="Your name"
                            name="name"
                        >
                    </label>
                    <br>
                    <label>Email
                        <br/>
                        <input
                            type="email"
                            placeholder="you@example.com"
                            name="email"
                        >
                    </label>
                    <br>
                    <label>Subject
                        <br/>
                        <input
                            type="text"
                            placeholder="Subject"
                            name="subject"
                        >
                    </label>
                    <br>
                    <label>Message
                        <br/>
                        <textarea
                            rows=10
                            cols=60
                            placeholder="Your message"
                            name="message"
                        ></textarea>
                    </label>
                    <br>
                    <button type="submit">Send</button>
                </form>
            </body>
            </html>
            "#,
            msg_html
        )))
}
