//! Engine: evaluates one alert outcome against every configured channel

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::evaluation::EvaluationOutcome;
use crate::notifier::{notifier_span, NotifierBase, Verdict};
use crate::state::NotificationRecord;

/// Wall-clock source
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The verdict for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub notifier_id: i64,
    pub notifier_name: String,
    pub notifier_type: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Holds the configured channels and decides which of them to notify
pub struct Engine {
    notifiers: Vec<NotifierBase>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("notifiers", &self.notifiers)
            .finish()
    }
}

impl Engine {
    pub fn new(notifiers: Vec<NotifierBase>, clock: Arc<dyn Clock>) -> Self {
        Self { notifiers, clock }
    }

    /// Build one notifier per channel definition, failing on unusable settings
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> crate::Result<Self> {
        let mut notifiers = Vec::with_capacity(config.notifiers.len());
        for model in &config.notifiers {
            tracing::debug!(
                "Creating notifier '{}' ({}, id {})",
                model.name,
                model.notifier_type,
                model.id
            );
            notifiers.push(NotifierBase::try_new(model, notifier_span(model))?);
        }
        Ok(Self::new(notifiers, clock))
    }

    pub fn notifiers(&self) -> &[NotifierBase] {
        &self.notifiers
    }

    /// Decide for every channel using the engine's clock
    pub fn evaluate(
        &self,
        outcome: &EvaluationOutcome,
        records: &HashMap<i64, NotificationRecord>,
    ) -> Vec<Decision> {
        self.evaluate_at(outcome, records, self.clock.now())
    }

    /// Decide for every channel at a fixed instant.
    ///
    /// Channels without a stored record are treated as never notified.
    pub fn evaluate_at(
        &self,
        outcome: &EvaluationOutcome,
        records: &HashMap<i64, NotificationRecord>,
        now: DateTime<Utc>,
    ) -> Vec<Decision> {
        let decisions: Vec<Decision> = self
            .notifiers
            .iter()
            .map(|notifier| {
                let record = records.get(&notifier.id()).copied().unwrap_or_default();
                Decision {
                    notifier_id: notifier.id(),
                    notifier_name: notifier.name().to_string(),
                    notifier_type: notifier.type_name().to_string(),
                    verdict: notifier.decide(outcome, &record, now),
                }
            })
            .collect();

        let dispatched = decisions.iter().filter(|d| d.verdict.is_notify()).count();
        tracing::info!(
            "Evaluated {} -> {}: {} of {} channels to notify",
            outcome.previous_alert_state,
            outcome.current_alert_state,
            dispatched,
            decisions.len()
        );

        decisions
    }

    /// Channels that should receive a notification now
    pub fn notifiers_to_dispatch(
        &self,
        outcome: &EvaluationOutcome,
        records: &HashMap<i64, NotificationRecord>,
    ) -> Vec<&NotifierBase> {
        let now = self.clock.now();
        self.notifiers
            .iter()
            .filter(|notifier| {
                let record = records.get(&notifier.id()).copied().unwrap_or_default();
                notifier.should_notify(outcome, &record, now)
            })
            .collect()
    }
}
