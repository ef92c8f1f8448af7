//! Persisted bookkeeping of the last notification for a rule/channel pair

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of the last dispatch attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationState {
    /// A dispatch has been claimed and is in flight
    Pending,
    #[default]
    Completed,
}

/// Last known notification state, as stored by the persistence layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub state: NotificationState,
    /// Unix seconds of the last update, `0` when never updated
    #[serde(default)]
    pub updated_at: i64,
}

impl NotificationRecord {
    pub fn new(state: NotificationState, updated_at: i64) -> Self {
        Self { state, updated_at }
    }

    pub fn is_pending(&self) -> bool {
        self.state == NotificationState::Pending
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.updated_at, 0)
    }

    /// Whether `last_updated + window` lies strictly after `now`.
    ///
    /// Unrepresentable timestamps count as never updated; an overflowing
    /// window counts as not yet elapsed.
    pub fn updated_within(&self, window: TimeDelta, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_updated() else {
            return false;
        };
        match last.checked_add_signed(window) {
            Some(until) => until > now,
            None => true,
        }
    }
}
