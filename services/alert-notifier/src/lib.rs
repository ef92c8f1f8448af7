//! Alert notifier - decides whether an alert evaluation should notify a channel
//!
//! Reads typed channel settings from an untyped key-value blob and applies the
//! suppression policy (reminders, debouncing, resolve suppression) per channel.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod notifier;
pub mod settings;
pub mod state;

pub use config::{load_config, load_evaluation, AlertNotification, Config, EvaluationSnapshot};
pub use engine::{Clock, Decision, Engine, SystemClock};
pub use error::{NotifierError, Result, SettingError};
pub use evaluation::{AlertState, EvaluationOutcome};
pub use notifier::{NotifierBase, SuppressReason, Verdict};
pub use settings::{Lookup, SettingValue, Settings};
pub use state::{NotificationRecord, NotificationState};

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Decide every channel in `config` for one evaluation snapshot.
///
/// Uses the system clock unless `now` is given.
pub fn run(
    config: &Config,
    snapshot: &EvaluationSnapshot,
    now: Option<DateTime<Utc>>,
) -> Result<Vec<Decision>> {
    let engine = Engine::from_config(config, Arc::new(SystemClock))?;

    let decisions = match now {
        Some(now) => engine.evaluate_at(&snapshot.outcome, &snapshot.records, now),
        None => engine.evaluate(&snapshot.outcome, &snapshot.records),
    };

    Ok(decisions)
}
