//! BDD test world for the alert notifier

use alert_notifier::{
    AlertNotification, EvaluationOutcome, NotificationRecord, SettingError, Settings, Verdict,
};
use cucumber::World;

#[derive(Debug, Default, World)]
pub struct NotifierWorld {
    // Settings lookups
    pub settings: Settings,
    pub setting_value: Option<String>,
    pub setting_error: Option<SettingError>,

    // Suppression decisions
    pub channel: Option<AlertNotification>,
    pub outcome: Option<EvaluationOutcome>,
    pub record: NotificationRecord,
    pub verdict: Option<Verdict>,
}
