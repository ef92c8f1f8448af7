//! Configuration types for the alert notifier

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluationOutcome;
use crate::settings::Settings;
use crate::state::NotificationRecord;

/// Channel definitions file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifiers: Vec<AlertNotification>,
}

/// A persisted notification channel definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertNotification {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub notifier_type: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub send_reminder: bool,
    #[serde(default)]
    pub disable_resolve_message: bool,
    /// Minimum interval between reminders, e.g. `"15m"`
    #[serde(default, with = "humantime_serde")]
    pub frequency: Duration,
    #[serde(default)]
    pub settings: Settings,
}

/// One evaluation cycle plus the stored record of every channel, keyed by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSnapshot {
    #[serde(flatten)]
    pub outcome: EvaluationOutcome,
    #[serde(default)]
    pub records: HashMap<i64, NotificationRecord>,
}

fn read_file(path: &Path, what: &str) -> crate::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        crate::NotifierError::Config(format!("Failed to read {} file {:?}: {}", what, path, e))
    })
}

/// Load channel definitions from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = read_file(path, "config")?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load an evaluation snapshot from a JSON file
pub fn load_evaluation(path: &Path) -> crate::Result<EvaluationSnapshot> {
    let content = read_file(path, "evaluation")?;
    let snapshot: EvaluationSnapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}
