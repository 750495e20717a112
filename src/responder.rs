use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

/// Context provided to responders for handling messages
pub struct ResponderContext {
    /// User ID of the message sender
    pub sender: String,
    /// The actual message text
    pub message_body: String,
}

/// Response from a responder
pub enum ResponderResult {
    /// Message was handled, optionally with a reply
    Handled(Option<String>),
    /// Message was not handled, pass to next responder
    NotHandled,
}

/// Core trait that all keyword-triggered responders must implement
#[async_trait]
pub trait Responder: Send + Sync {
    /// Returns the name of this responder
    fn name(&self) -> &str;

    /// Trigger pattern tested against the message text
    fn pattern(&self) -> &Regex;

    /// Check if this responder should handle the message
    /// This is called first as a fast filter before handle()
    fn matches(&self, context: &ResponderContext) -> bool {
        self.pattern().is_match(&context.message_body)
    }

    /// Handle the message and return a response
    /// Only called if matches() returns true
    async fn handle(&self, context: &ResponderContext) -> Result<ResponderResult>;
}
