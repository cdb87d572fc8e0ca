//! Email notification for contact form submissions.
//!
//! Delivery is best-effort: when SMTP is not configured the notifier is a
//! no-op, and send failures are logged by the caller without affecting the
//! stored message.

use anyhow::Result;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::db::ContactMessage;

/// Sends an email to the site operator for each contact form submission.
pub struct ContactNotifier {
    config: SmtpConfig,
}

impl ContactNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Check if email sending is configured and enabled
    pub fn is_enabled(&self) -> bool {
        self.config.is_configured()
    }

    /// Send the notification email for a stored contact message.
    pub async fn notify(&self, msg: &ContactMessage) -> Result<()> {
        if !self.is_enabled() {
            tracing::debug!("SMTP not configured, skipping contact notification");
            return Ok(());
        }

        let subject = format!("New contact message: {}", msg.subject);
        let html_body = render_contact_html(msg);
        let text_body = render_contact_text(msg);

        self.send_email(&subject, &html_body, &text_body).await
    }

    /// Send an email with HTML and plain text versions
    async fn send_email(&self, subject: &str, html_body: &str, text_body: &str) -> Result<()> {
        let smtp_host = self
            .config
            .host
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("SMTP host not configured"))?;
        let from_address = self
            .config
            .from_address
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("From address not configured"))?;
        let notify_address = self
            .config
            .notify_address
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Notify address not configured"))?;

        let from_mailbox = format!("{} <{}>", self.config.from_name, from_address);
        let from: Mailbox = from_mailbox.parse()?;
        let to: Mailbox = notify_address.parse()?;

        let email = Message::builder()
            .from(from)
            .to(to)
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

        let mailer = if self.config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp_host)
        }
        .port(self.config.port);

        let mailer = if let (Some(username), Some(password)) =
            (&self.config.username, &self.config.password)
        {
            mailer.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer
        };

        mailer.build().send(email).await?;

        tracing::info!(subject = %subject, "Contact notification email sent");

        Ok(())
    }
}

/// Render the HTML version of the notification email
fn render_contact_html(msg: &ContactMessage) -> String {
    let phone = msg.phone.as_deref().unwrap_or("-");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>New Contact Message</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
            margin: 0;
            padding: 24px;
            background-color: #f5f5f5;
            color: #374151;
        }}
        .card {{
            max-width: 560px;
            margin: 0 auto;
            background-color: #ffffff;
            border-radius: 8px;
            padding: 24px;
        }}
        .row {{
            padding: 8px 0;
            border-bottom: 1px solid #e5e7eb;
        }}
        .label {{
            color: #6b7280;
            font-size: 13px;
        }}
        .message {{
            margin-top: 16px;
            white-space: pre-wrap;
        }}
    </style>
</head>
<body>
    <div class="card">
        <h2>{subject}</h2>
        <div class="row"><span class="label">From</span> {first_name} {last_name}</div>
        <div class="row"><span class="label">Email</span> {email}</div>
        <div class="row"><span class="label">Phone</span> {phone}</div>
        <div class="row"><span class="label">Received</span> {created_at}</div>
        <p class="message">{message}</p>
    </div>
</body>
</html>"#,
        subject = html_escape(&msg.subject),
        first_name = html_escape(&msg.first_name),
        last_name = html_escape(&msg.last_name),
        email = html_escape(&msg.email),
        phone = html_escape(phone),
        created_at = html_escape(&msg.created_at),
        message = html_escape(&msg.message),
    )
}

/// Render the plain text version of the notification email
fn render_contact_text(msg: &ContactMessage) -> String {
    format!(
        r#"New contact message

From: {first_name} {last_name}
Email: {email}
Phone: {phone}
Subject: {subject}
Received: {created_at}

{message}"#,
        first_name = msg.first_name,
        last_name = msg.last_name,
        email = msg.email,
        phone = msg.phone.as_deref().unwrap_or("-"),
        subject = msg.subject,
        created_at = msg.created_at,
        message = msg.message,
    )
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> ContactMessage {
        ContactMessage {
            id: "m1".to_string(),
            first_name: "Sara".to_string(),
            last_name: "Bekele".to_string(),
            email: "sara@example.com".to_string(),
            phone: None,
            subject: "Room availability".to_string(),
            message: "Do you have a double room free <next week>?".to_string(),
            is_read: 0,
            is_responded: 0,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_render_contact_text() {
        let text = render_contact_text(&sample_message());
        assert!(text.contains("Sara Bekele"));
        assert!(text.contains("sara@example.com"));
        assert!(text.contains("Phone: -"));
        assert!(text.contains("Room availability"));
    }

    #[test]
    fn test_render_contact_html_escapes_user_input() {
        let html = render_contact_html(&sample_message());
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("&lt;next week&gt;"));
        assert!(!html.contains("<next week>"));
    }

    #[test]
    fn test_unconfigured_notifier_is_disabled() {
        let notifier = ContactNotifier::new(SmtpConfig::default());
        assert!(!notifier.is_enabled());
    }

    #[tokio::test]
    async fn test_notify_without_smtp_is_noop() {
        let notifier = ContactNotifier::new(SmtpConfig::default());
        assert!(notifier.notify(&sample_message()).await.is_ok());
    }
}
