use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

use crate::responder::{Responder, ResponderContext, ResponderResult};

/// Simple ping-pong responder for health checks
pub struct PingPongResponder {
    pattern: Regex,
}

impl PingPongResponder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"(?i)ping")?,
        })
    }
}

#[async_trait]
impl Responder for PingPongResponder {
    fn name(&self) -> &str {
        "PingPongResponder"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, _context: &ResponderContext) -> Result<ResponderResult> {
        Ok(ResponderResult::Handled(Some("pong".to_string())))
    }
}
