use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiError, ScheduleClient};
use crate::format::{
    availability_marker, duration_hours, fetch_failure_message, format_timestamp, INDENT,
};
use crate::responder::{Responder, ResponderContext, ResponderResult};
use crate::schedule::{RawSalmonEntry, SalmonRotation};

const TITLE: &str = "サーモンラン スケジュール";
const EMPTY_MESSAGE: &str = "サーモンラン情報がありませんでした。";

/// Salmon-run schedule responder backed by `/coop/schedule`
pub struct SalmonResponder {
    client: Arc<ScheduleClient>,
    pattern: Regex,
}

impl SalmonResponder {
    pub fn new(client: Arc<ScheduleClient>) -> Result<Self> {
        Ok(Self {
            client,
            pattern: Regex::new(r"(?i)salmon|syake|バイト|ばいと")?,
        })
    }
}

#[async_trait]
impl Responder for SalmonResponder {
    fn name(&self) -> &str {
        "SalmonResponder"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, context: &ResponderContext) -> Result<ResponderResult> {
        let entries = match self.client.coop_schedule().await {
            Ok(entries) => entries,
            Err(err) => {
                match &err {
                    ApiError::Status(code) => warn!(
                        feature = "salmon",
                        requester = %context.sender,
                        outcome = "failure",
                        status = *code,
                        "Salmon schedule fetch failed"
                    ),
                    _ => warn!(
                        feature = "salmon",
                        requester = %context.sender,
                        outcome = "failure",
                        detail = %err,
                        "Salmon schedule fetch failed"
                    ),
                }
                let reply = fetch_failure_message(err.status());
                return Ok(ResponderResult::Handled(Some(reply)));
            }
        };

        if entries.is_empty() {
            return Ok(ResponderResult::Handled(Some(EMPTY_MESSAGE.to_string())));
        }

        let reply = render_salmon_reply(entries, Utc::now().timestamp_millis());

        info!(
            feature = "salmon",
            requester = %context.sender,
            outcome = "success",
            "Salmon schedule sent"
        );

        Ok(ResponderResult::Handled(Some(reply)))
    }
}

/// Render the reply for the given rotations, one block per rotation
/// in the order the API returned them.
fn render_salmon_reply(entries: Vec<RawSalmonEntry>, now_ms: i64) -> String {
    let mut lines = vec![TITLE.to_string()];

    for entry in entries {
        let rotation = SalmonRotation::from(entry);
        lines.push(format!(
            "{} {} 〜 {} ({}時間)",
            availability_marker(rotation.start, now_ms),
            format_timestamp(rotation.start),
            format_timestamp(rotation.end),
            duration_hours(rotation.start, rotation.end),
        ));

        if let Some(stage) = &rotation.stage {
            lines.push(format!("{}ステージ: {}", INDENT, stage));
        }

        if let Some(weapons) = &rotation.weapons {
            for (index, weapon) in weapons.iter().enumerate() {
                let label = if index == 0 { "武器" } else { INDENT };
                lines.push(format!("{}{}: {}", INDENT, label, weapon));
            }
        }
    }

    lines.join("\n")
}
