use crate::utils::error::AppError;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

/// Contact-form submission forwarded to the site owner's inbox
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ContactEmailRequest {
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
    #[serde(rename = "userMessage")]
    pub user_message: Option<String>,
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
}

/// Outbound SMTP sender. Credentials are injected at construction; each send
/// opens its own transport session.
#[derive(Clone)]
pub struct Mailer {
    smtp_host: String,
    username: String,
    password: String,
    receiver: String,
}

impl Mailer {
    pub fn new(
        smtp_host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            smtp_host: smtp_host.into(),
            username: username.into(),
            password: password.into(),
            receiver: receiver.into(),
        }
    }

    /// Build the contact email: from the submitting user, to the configured
    /// receiver, message as both plain text and html.
    fn build_message(&self, request: &ContactEmailRequest) -> Result<Message, AppError> {
        let receiver: Mailbox = self
            .receiver
            .parse()
            .map_err(|e| AppError::MailError(format!("Invalid receiver address: {}", e)))?;

        // Gmail rewrites the envelope sender anyway; fall back to the account
        // address when the submitted one does not parse
        let from = request
            .user_email
            .as_deref()
            .unwrap_or_default()
            .parse::<Mailbox>()
            .unwrap_or_else(|_| receiver.clone());

        let user_name = request.user_name.as_deref().unwrap_or_default();
        let user_email = request.user_email.as_deref().unwrap_or_default();
        let user_message = request.user_message.as_deref().unwrap_or_default();

        let subject = format!("tasKade new message from {} {}", user_name, user_email);

        Message::builder()
            .from(from)
            .to(receiver)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                user_message.to_string(),
                format!("<div><p>{}</p></div>", user_message),
            ))
            .map_err(|e| AppError::MailError(format!("Failed to build message: {}", e)))
    }

    pub async fn send_contact_email(&self, request: &ContactEmailRequest) -> Result<(), AppError> {
        let message = self.build_message(request)?;

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.smtp_host)
                .map_err(|e| AppError::MailError(format!("SMTP transport error: {}", e)))?
                .credentials(Credentials::new(
                    self.username.clone(),
                    self.password.clone(),
                ))
                .build();

        transport
            .send(message)
            .await
            .map_err(|e| AppError::MailError(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
