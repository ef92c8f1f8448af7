//! Alert states and the outcome of one rule evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of an alert rule after evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Ok,
    Pending,
    Alerting,
    NoData,
    Paused,
    Unknown,
}

impl AlertState {
    /// States that never produce a reminder
    pub fn is_inert(self) -> bool {
        matches!(self, AlertState::Ok | AlertState::Pending)
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertState::Ok => write!(f, "ok"),
            AlertState::Pending => write!(f, "pending"),
            AlertState::Alerting => write!(f, "alerting"),
            AlertState::NoData => write!(f, "no_data"),
            AlertState::Paused => write!(f, "paused"),
            AlertState::Unknown => write!(f, "unknown"),
        }
    }
}

/// Previous and current state of a rule for one evaluation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub previous_alert_state: AlertState,
    pub current_alert_state: AlertState,
}

impl EvaluationOutcome {
    pub fn new(previous: AlertState, current: AlertState) -> Self {
        Self {
            previous_alert_state: previous,
            current_alert_state: current,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.previous_alert_state == self.current_alert_state
    }

    pub fn is_transition(&self, from: AlertState, to: AlertState) -> bool {
        self.previous_alert_state == from && self.current_alert_state == to
    }
}
