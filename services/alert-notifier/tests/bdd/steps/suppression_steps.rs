//! BDD step definitions for the suppression feature

use std::time::Duration;

use chrono::DateTime;
use cucumber::{given, then, when};

use alert_notifier::{
    AlertNotification, AlertState, EvaluationOutcome, NotificationRecord, NotificationState,
    NotifierBase, Settings, SuppressReason,
};

use crate::world::NotifierWorld;

const NOW: i64 = 1_700_000_000;

fn parse_state(s: &str) -> AlertState {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .unwrap_or_else(|_| panic!("Unknown alert state: {}", s))
}

fn parse_reason(s: &str) -> SuppressReason {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .unwrap_or_else(|_| panic!("Unknown suppression reason: {}", s))
}

fn channel(world: &mut NotifierWorld) -> &mut AlertNotification {
    world.channel.as_mut().expect("channel not set")
}

#[given(expr = "a channel {string} of type {string}")]
fn a_channel(world: &mut NotifierWorld, name: String, notifier_type: String) {
    world.channel = Some(AlertNotification {
        id: 1,
        name,
        notifier_type,
        is_default: false,
        send_reminder: false,
        disable_resolve_message: false,
        frequency: Duration::ZERO,
        settings: Settings::new(),
    });
}

#[given(expr = "the channel sends reminders every {int} minutes")]
fn sends_reminders(world: &mut NotifierWorld, minutes: u64) {
    let channel = channel(world);
    channel.send_reminder = true;
    channel.frequency = Duration::from_secs(minutes * 60);
}

#[given("the channel has resolve messages disabled")]
fn resolve_disabled(world: &mut NotifierWorld) {
    channel(world).disable_resolve_message = true;
}

#[given(expr = "the alert went from {string} to {string}")]
fn alert_went(world: &mut NotifierWorld, previous: String, current: String) {
    world.outcome = Some(EvaluationOutcome::new(
        parse_state(&previous),
        parse_state(&current),
    ));
}

#[given(expr = "the last notification {word} {int} seconds ago")]
fn last_notification(world: &mut NotifierWorld, state: String, seconds: i64) {
    let state = match state.as_str() {
        "completed" => NotificationState::Completed,
        "pending" => NotificationState::Pending,
        other => panic!("Unknown notification state: {}", other),
    };
    world.record = NotificationRecord::new(state, NOW - seconds);
}

#[given("the channel has never been notified")]
fn never_notified(world: &mut NotifierWorld) {
    world.record = NotificationRecord::default();
}

#[when("the channel decides")]
fn channel_decides(world: &mut NotifierWorld) {
    let model = world.channel.as_ref().expect("channel not set");
    let outcome = world.outcome.expect("outcome not set");
    let notifier = NotifierBase::from_model(model);
    let now = DateTime::from_timestamp(NOW, 0).expect("valid timestamp");

    let verdict = notifier.decide(&outcome, &world.record, now);
    assert_eq!(
        verdict.is_notify(),
        notifier.should_notify(&outcome, &world.record, now),
        "decide and should_notify disagree"
    );
    world.verdict = Some(verdict);
}

#[then("a notification should be sent")]
fn notification_sent(world: &mut NotifierWorld) {
    let verdict = world.verdict.expect("no decision made");
    assert!(verdict.is_notify(), "Expected a notification, got {:?}", verdict);
}

#[then(expr = "no notification should be sent because of {string}")]
fn notification_suppressed(world: &mut NotifierWorld, reason: String) {
    let verdict = world.verdict.expect("no decision made");
    assert_eq!(
        verdict.reason(),
        Some(parse_reason(&reason)),
        "Expected suppression, got {:?}",
        verdict
    );
}
