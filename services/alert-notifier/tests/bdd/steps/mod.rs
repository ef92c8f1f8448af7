//! BDD step definitions for the alert notifier

pub mod settings_steps;
pub mod suppression_steps;
