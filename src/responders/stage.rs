use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{ApiError, ScheduleClient};
use crate::format::{fetch_failure_message, format_timestamp, fullwidth_pad};
use crate::responder::{Responder, ResponderContext, ResponderResult};
use crate::schedule::{RawBattleSchedule, ScheduleBucket};

const EMPTY_MESSAGE: &str = "ステージ情報がありませんでした。";

/// Versus-stage schedule responder backed by `/schedule`
pub struct StageResponder {
    client: Arc<ScheduleClient>,
    pattern: Regex,
}

impl StageResponder {
    pub fn new(client: Arc<ScheduleClient>) -> Result<Self> {
        Ok(Self {
            client,
            pattern: Regex::new(r"(?i)stage|ステージ|すてーじ")?,
        })
    }
}

#[async_trait]
impl Responder for StageResponder {
    fn name(&self) -> &str {
        "StageResponder"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    async fn handle(&self, context: &ResponderContext) -> Result<ResponderResult> {
        let bucket = match self.client.battle_schedule().await {
            Ok(bucket) => bucket,
            Err(err) => {
                match &err {
                    ApiError::Status(code) => warn!(
                        feature = "stage",
                        requester = %context.sender,
                        outcome = "failure",
                        status = *code,
                        "Stage schedule fetch failed"
                    ),
                    _ => warn!(
                        feature = "stage",
                        requester = %context.sender,
                        outcome = "failure",
                        detail = %err,
                        "Stage schedule fetch failed"
                    ),
                }
                let reply = fetch_failure_message(err.status());
                return Ok(ResponderResult::Handled(Some(reply)));
            }
        };

        let Some(reply) = render_stage_reply(&bucket) else {
            warn!(
                feature = "stage",
                requester = %context.sender,
                outcome = "failure",
                detail = "empty",
                "Stage schedule was empty"
            );
            return Ok(ResponderResult::Handled(Some(EMPTY_MESSAGE.to_string())));
        };

        info!(
            feature = "stage",
            requester = %context.sender,
            outcome = "success",
            "Stage schedule sent"
        );

        Ok(ResponderResult::Handled(Some(reply)))
    }
}

/// Rule name as displayed next to a bucket label.
/// The label already says which mode this is, so the mode words
/// embedded in the rule name are stripped.
fn display_rule(rule: &str) -> String {
    rule.replace("バトル", "").replace("ガチ", "")
}

fn bucket_label(name: &str, entry: &RawBattleSchedule, with_rule: bool) -> String {
    if with_rule {
        format!("{}《{}》", name, display_rule(&entry.rule))
    } else {
        name.to_string()
    }
}

/// Render the reply for the three buckets, one section per bucket
/// showing only its nearest rotation. Returns None when the regular
/// bucket is empty, which the API treats as "no data yet".
fn render_stage_reply(bucket: &ScheduleBucket) -> Option<String> {
    // regular[0] bounds the whole reply: all buckets rotate together
    let first = bucket.regular.first()?;
    let mut lines = vec![format!(
        "ステージ情報 ({}まで)",
        format_timestamp(first.end_t * 1000)
    )];

    let sections = [
        ("ナワバリ", &bucket.regular, false),
        ("ガチ", &bucket.gachi, true),
        ("リーグ", &bucket.league, true),
    ];

    for (name, entries, with_rule) in sections {
        let Some(entry) = entries.first() else {
            continue;
        };

        let label = bucket_label(name, entry, with_rule);
        let pad = fullwidth_pad(&label);
        for (index, map) in entry.maps.iter().enumerate() {
            let prefix = if index == 0 { &label } else { &pad };
            lines.push(format!("{}: {}", prefix, map));
        }
    }

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(start_t: i64, end_t: i64, rule: &str, maps: &[&str]) -> RawBattleSchedule {
        RawBattleSchedule {
            start_t,
            end_t,
            rule: rule.to_string(),
            maps: maps.iter().map(|map| map.to_string()).collect(),
        }
    }

    fn bucket() -> ScheduleBucket {
        ScheduleBucket {
            regular: vec![
                schedule(0, 7_200, "ナワバリバトル", &["MapA", "MapB"]),
                schedule(7_200, 14_400, "ナワバリバトル", &["MapX", "MapY"]),
            ],
            gachi: vec![schedule(0, 7_200, "ガチホコバトル", &["MapC", "MapD"])],
            league: vec![schedule(0, 7_200, "ガチエリア", &["MapE"])],
        }
    }

    #[test]
    fn matches_stage_keywords_case_insensitively() {
        let responder =
            StageResponder::new(Arc::new(ScheduleClient::new().unwrap())).unwrap();
        for text in ["stage", "STAGE?", "ステージ", "すてーじ"] {
            assert!(responder.pattern().is_match(text), "should match: {}", text);
        }
        assert!(!responder.pattern().is_match("salmon"));
    }

    #[test]
    fn mode_words_are_stripped_from_rule_names() {
        assert_eq!(display_rule("ガチホコバトル"), "ホコ");
        assert_eq!(display_rule("ガチエリア"), "エリア");
        assert_eq!(display_rule("ガチヤグラ"), "ヤグラ");
    }

    #[test]
    fn renders_only_the_first_entry_of_each_bucket() {
        let reply = render_stage_reply(&bucket()).unwrap();
        assert!(reply.contains("MapA"));
        assert!(reply.contains("MapB"));
        // the second regular rotation is ignored
        assert!(!reply.contains("MapX"));
        assert!(!reply.contains("MapY"));
    }

    #[test]
    fn header_carries_the_end_of_the_nearest_regular_rotation() {
        let reply = render_stage_reply(&bucket()).unwrap();
        let header = reply.lines().next().unwrap();
        assert!(header.starts_with("ステージ情報 ("));
        assert!(header.ends_with("まで)"));
    }

    #[test]
    fn labels_carry_stripped_rules_and_continuation_lines_align() {
        let reply = render_stage_reply(&bucket()).unwrap();
        let lines: Vec<&str> = reply.lines().collect();

        assert_eq!(lines[1], "ナワバリ: MapA");
        assert_eq!(lines[2], "\u{3000}\u{3000}\u{3000}\u{3000}: MapB");
        assert_eq!(lines[3], "ガチ《ホコ》: MapC");
        assert_eq!(lines[4], "\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}: MapD");
        assert_eq!(lines[5], "リーグ《エリア》: MapE");
        assert!(!reply.contains("バトル"));
    }

    #[test]
    fn empty_regular_bucket_means_no_reply_content() {
        let empty = ScheduleBucket {
            regular: vec![],
            gachi: vec![schedule(0, 7_200, "ガチホコバトル", &["MapC"])],
            league: vec![schedule(0, 7_200, "ガチエリア", &["MapE"])],
        };
        assert!(render_stage_reply(&empty).is_none());
    }

    #[test]
    fn empty_non_regular_buckets_are_skipped() {
        let partial = ScheduleBucket {
            regular: vec![schedule(0, 7_200, "ナワバリバトル", &["MapA"])],
            gachi: vec![],
            league: vec![],
        };
        let reply = render_stage_reply(&partial).unwrap();
        assert_eq!(reply.lines().count(), 2);
        assert!(!reply.contains("ガチ"));
        assert!(!reply.contains("リーグ"));
    }
}
