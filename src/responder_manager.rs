use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::responder::{Responder, ResponderContext, ResponderResult};

/// Routes incoming messages through an ordered list of (pattern, responder) pairs
pub struct ResponderManager {
    responders: Vec<Arc<dyn Responder>>,
}

impl ResponderManager {
    /// Create a new empty responder manager
    pub fn new() -> Self {
        Self {
            responders: Vec::new(),
        }
    }

    /// Register a new responder
    /// Responders are evaluated in registration order
    pub fn register(&mut self, responder: Arc<dyn Responder>) {
        info!("Registering responder: {}", responder.name());
        self.responders.push(responder);
    }

    /// Process a message through all registered responders
    /// Returns the reply from the first responder whose pattern matches,
    /// or None if no responder handles it
    pub async fn process_message(&self, context: &ResponderContext) -> Result<Option<String>> {
        for responder in &self.responders {
            if !responder.matches(context) {
                continue;
            }

            debug!("Responder '{}' matched message", responder.name());

            match responder.handle(context).await? {
                ResponderResult::Handled(response) => return Ok(response),
                ResponderResult::NotHandled => continue,
            }
        }

        debug!("No responder matched the message");
        Ok(None)
    }

    /// Get the number of registered responders
    pub fn count(&self) -> usize {
        self.responders.len()
    }
}

impl Default for ResponderManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responders::PingPongResponder;

    fn context(body: &str) -> ResponderContext {
        ResponderContext {
            sender: "@user:example.org".to_string(),
            message_body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn routes_to_the_first_matching_responder() {
        let mut manager = ResponderManager::new();
        manager.register(Arc::new(PingPongResponder::new().unwrap()));
        assert_eq!(manager.count(), 1);

        let reply = manager.process_message(&context("ping")).await.unwrap();
        assert_eq!(reply, Some("pong".to_string()));
    }

    #[tokio::test]
    async fn unmatched_messages_get_no_reply() {
        let mut manager = ResponderManager::new();
        manager.register(Arc::new(PingPongResponder::new().unwrap()));

        let reply = manager.process_message(&context("hello")).await.unwrap();
        assert_eq!(reply, None);
    }
}
