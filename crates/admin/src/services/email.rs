//! Email service for sending password reset codes.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use prism_core::ResetCode;

use crate::config::EmailConfig;

/// How long a reset code stays valid, in minutes.
pub const RESET_CODE_EXPIRY_MINUTES: i64 = 30;

/// HTML template for the reset code email.
#[derive(Template)]
#[template(path = "email/reset_code.html")]
struct ResetCodeEmailHtml<'a> {
    code: &'a str,
    expiry_minutes: i64,
}

/// Plain text template for the reset code email.
#[derive(Template)]
#[template(path = "email/reset_code.txt")]
struct ResetCodeEmailText<'a> {
    code: &'a str,
    expiry_minutes: i64,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a password reset code email.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_reset_code(&self, to: &str, code: &ResetCode) -> Result<(), EmailError> {
        let html = ResetCodeEmailHtml {
            code: code.as_str(),
            expiry_minutes: RESET_CODE_EXPIRY_MINUTES,
        }
        .render()?;
        let text = ResetCodeEmailText {
            code: code.as_str(),
            expiry_minutes: RESET_CODE_EXPIRY_MINUTES,
        }
        .render()?;

        self.send_multipart_email(to, "Your Prism Password Reset Code", &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

/// Generate a random 6-digit reset code.
#[must_use]
pub fn generate_reset_code() -> ResetCode {
    use rand::Rng;
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    ResetCode::parse(&code.to_string()).unwrap_or_else(|_| unreachable!("6-digit range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reset_code_format() {
        let code = generate_reset_code();
        assert_eq!(code.as_str().len(), 6);
        assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_reset_code_range() {
        for _ in 0..100 {
            let code: u32 = generate_reset_code()
                .as_str()
                .parse()
                .expect("valid number");
            assert!(code >= 100_000);
            assert!(code < 1_000_000);
        }
    }

    #[test]
    fn test_reset_code_templates_render() {
        let code = ResetCode::parse("123456").expect("valid code");
        let html = ResetCodeEmailHtml {
            code: code.as_str(),
            expiry_minutes: RESET_CODE_EXPIRY_MINUTES,
        }
        .render()
        .expect("html renders");
        assert!(html.contains("123456"));
        assert!(html.contains("30 minutes"));

        let text = ResetCodeEmailText {
            code: code.as_str(),
            expiry_minutes: RESET_CODE_EXPIRY_MINUTES,
        }
        .render()
        .expect("text renders");
        assert!(text.contains("123456"));
    }
}
