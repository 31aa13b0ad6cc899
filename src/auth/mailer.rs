// Reset-code mail dispatch

use crate::auth::error::AuthError;
use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

/// Outbound mail capability, kept behind a trait so tests can record
/// dispatches instead of talking to an SMTP relay.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), AuthError>;
}

/// SMTP mailer for reset-code delivery
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a relay transport with credentials from configuration
    pub fn new(
        smtp_host: &str,
        username: String,
        password: String,
        from: &str,
    ) -> Result<Self, AuthError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_host)
            .map_err(|e| AuthError::Mail(e.to_string()))?
            .credentials(Credentials::new(username, password))
            .build();
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Mail(format!("invalid sender address: {}", e)))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), AuthError> {
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Mail(format!("invalid recipient address: {}", e)))?;

        let body = format!(
            "Hi there!\n\nHere's your password reset code: {}\n\n\
             Please do not share this with anyone.\n\nThanks,\nVoxBiz Team",
            code
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject("Your VoxBiz Reset Code")
            .body(body)
            .map_err(|e| AuthError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthError::Mail(e.to_string()))?;

        tracing::info!("Sent reset code email to {}", to);
        Ok(())
    }
}

/// Test double that records dispatches and can simulate relay failure
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: std::sync::Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Last code handed to the mailer for an address
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), AuthError> {
        if self.fail {
            return Err(AuthError::Mail("simulated relay failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}
