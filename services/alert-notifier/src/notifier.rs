//! Per-channel notifier configuration and the notification suppression policy

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::Span;

use crate::config::AlertNotification;
use crate::error::SettingError;
use crate::evaluation::{AlertState, EvaluationOutcome};
use crate::state::NotificationRecord;

/// How long a pending record blocks another dispatch
pub const PENDING_DEBOUNCE_WINDOW: Duration = Duration::from_secs(60);

/// Why a notification was held back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// State did not change and reminders are off
    Unchanged,
    /// Reminder interval has not elapsed yet
    ReminderNotDue,
    /// No reminders while ok or pending
    ReminderInertState,
    /// Pending -> Ok, the rule never really alerted
    FirstResolve,
    /// Ok -> Pending
    OkToPending,
    /// A previous dispatch is still in flight
    PendingInFlight,
    /// Resolve messages are disabled for this channel
    ResolveDisabled,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SuppressReason::Unchanged => "state unchanged and reminders disabled",
            SuppressReason::ReminderNotDue => "reminder interval has not elapsed",
            SuppressReason::ReminderInertState => "no reminders for ok or pending",
            SuppressReason::FirstResolve => "first resolution from pending",
            SuppressReason::OkToPending => "ok to pending",
            SuppressReason::PendingInFlight => "pending notification updated within the last minute",
            SuppressReason::ResolveDisabled => "resolve messages disabled",
        };
        f.write_str(text)
    }
}

/// Outcome of the suppression policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Notify,
    Suppress(SuppressReason),
}

impl Verdict {
    pub fn is_notify(&self) -> bool {
        matches!(self, Verdict::Notify)
    }

    pub fn reason(&self) -> Option<SuppressReason> {
        match self {
            Verdict::Notify => None,
            Verdict::Suppress(reason) => Some(*reason),
        }
    }
}

/// Behaviour shared by every notification channel
#[derive(Debug, Clone)]
pub struct NotifierBase {
    id: i64,
    name: String,
    notifier_type: String,
    is_default: bool,
    upload_image: bool,
    send_reminder: bool,
    disable_resolve_message: bool,
    frequency: Duration,
    span: Span,
}

impl NotifierBase {
    /// Build from a channel definition, logging into `span`.
    ///
    /// An unreadable `uploadImage` setting falls back to `true`.
    pub fn new(model: &AlertNotification, span: Span) -> Self {
        let upload_image = {
            let _enter = span.enter();
            model.settings.bool("uploadImage", Some(true)).lenient()
        };
        Self::with_upload_image(model, upload_image, span)
    }

    /// Like [`new`](Self::new) but rejects an unreadable `uploadImage` setting
    pub fn try_new(model: &AlertNotification, span: Span) -> Result<Self, SettingError> {
        let upload_image = model.settings.bool("uploadImage", Some(true)).strict()?;
        Ok(Self::with_upload_image(model, upload_image, span))
    }

    /// Build with the default span
    pub fn from_model(model: &AlertNotification) -> Self {
        Self::new(model, notifier_span(model))
    }

    fn with_upload_image(model: &AlertNotification, upload_image: bool, span: Span) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            notifier_type: model.notifier_type.clone(),
            is_default: model.is_default,
            upload_image,
            send_reminder: model.send_reminder,
            disable_resolve_message: model.disable_resolve_message,
            frequency: model.frequency,
            span,
        }
    }

    /// Whether this evaluation should send a notification on this channel
    pub fn should_notify(
        &self,
        outcome: &EvaluationOutcome,
        record: &NotificationRecord,
        now: DateTime<Utc>,
    ) -> bool {
        self.decide(outcome, record, now).is_notify()
    }

    /// Like [`should_notify`](Self::should_notify), naming the guard that fired
    pub fn decide(
        &self,
        outcome: &EvaluationOutcome,
        record: &NotificationRecord,
        now: DateTime<Utc>,
    ) -> Verdict {
        let verdict = self.apply_guards(outcome, record, now);

        let _enter = self.span.enter();
        match verdict {
            Verdict::Notify => tracing::debug!(
                "Notifying {} -> {}",
                outcome.previous_alert_state,
                outcome.current_alert_state
            ),
            Verdict::Suppress(reason) => tracing::debug!(
                "Suppressing {} -> {}: {}",
                outcome.previous_alert_state,
                outcome.current_alert_state,
                reason
            ),
        }

        verdict
    }

    // Guard order is significant.
    fn apply_guards(
        &self,
        outcome: &EvaluationOutcome,
        record: &NotificationRecord,
        now: DateTime<Utc>,
    ) -> Verdict {
        let current = outcome.current_alert_state;

        if outcome.is_unchanged() {
            if !self.send_reminder {
                return Verdict::Suppress(SuppressReason::Unchanged);
            }

            if record.updated_at != 0 && record.updated_within(self.frequency_delta(), now) {
                return Verdict::Suppress(SuppressReason::ReminderNotDue);
            }

            if current.is_inert() {
                return Verdict::Suppress(SuppressReason::ReminderInertState);
            }
            // A due reminder still has to pass the remaining guards.
        }

        if outcome.is_transition(AlertState::Pending, AlertState::Ok) {
            return Verdict::Suppress(SuppressReason::FirstResolve);
        }

        if outcome.is_transition(AlertState::Ok, AlertState::Pending) {
            return Verdict::Suppress(SuppressReason::OkToPending);
        }

        if record.is_pending() && record.updated_within(pending_debounce_delta(), now) {
            return Verdict::Suppress(SuppressReason::PendingInFlight);
        }

        if current == AlertState::Ok && self.disable_resolve_message {
            return Verdict::Suppress(SuppressReason::ResolveDisabled);
        }

        Verdict::Notify
    }

    fn frequency_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.frequency).unwrap_or(TimeDelta::MAX)
    }

    pub fn type_name(&self) -> &str {
        &self.notifier_type
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn needs_image(&self) -> bool {
        self.upload_image
    }

    pub fn send_reminder(&self) -> bool {
        self.send_reminder
    }

    pub fn disable_resolve_message(&self) -> bool {
        self.disable_resolve_message
    }

    pub fn frequency(&self) -> Duration {
        self.frequency
    }
}

/// The `alerting.notifier` span for a channel
pub fn notifier_span(model: &AlertNotification) -> Span {
    tracing::info_span!("alerting.notifier", name = %model.name, id = model.id)
}

fn pending_debounce_delta() -> TimeDelta {
    TimeDelta::from_std(PENDING_DEBOUNCE_WINDOW).unwrap_or(TimeDelta::MAX)
}
