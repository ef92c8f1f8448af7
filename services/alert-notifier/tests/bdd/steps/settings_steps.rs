//! BDD step definitions for the settings feature

use cucumber::{given, then, when};

use alert_notifier::{Lookup, Settings};

use crate::world::NotifierWorld;

fn record_lookup<T: ToString>(world: &mut NotifierWorld, lookup: Lookup<T>) {
    let (value, error) = lookup.into_parts();
    world.setting_value = Some(value.to_string());
    world.setting_error = error;
}

#[given("empty channel settings")]
fn empty_settings(world: &mut NotifierWorld) {
    world.settings = Settings::new();
}

#[given(expr = "channel settings {string}")]
fn settings_from_json(world: &mut NotifierWorld, json: String) {
    world.settings = serde_json::from_str(&json).expect("invalid settings JSON in feature");
}

#[when(expr = "I read boolean {string} with default {word}")]
fn read_bool_with_default(world: &mut NotifierWorld, key: String, default: String) {
    let default: bool = default.parse().expect("default must be true or false");
    let lookup = world.settings.bool(&key, Some(default));
    record_lookup(world, lookup);
}

#[when(expr = "I read boolean {string} without a default")]
fn read_bool(world: &mut NotifierWorld, key: String) {
    let lookup = world.settings.bool(&key, None);
    record_lookup(world, lookup);
}

#[when(expr = "I read string {string} without a default")]
fn read_string(world: &mut NotifierWorld, key: String) {
    let lookup = world.settings.string(&key, None);
    record_lookup(world, lookup);
}

#[when(expr = "I read integer {string} with default {int}")]
fn read_int_with_default(world: &mut NotifierWorld, key: String, default: i64) {
    let lookup = world.settings.int64(&key, Some(default));
    record_lookup(world, lookup);
}

#[when(expr = "I read integer {string} without a default")]
fn read_int(world: &mut NotifierWorld, key: String) {
    let lookup = world.settings.int64(&key, None);
    record_lookup(world, lookup);
}

#[then(expr = "the value should be {string}")]
fn value_should_be(world: &mut NotifierWorld, expected: String) {
    let value = world.setting_value.as_ref().expect("no setting was read");
    assert_eq!(value, &expected, "unexpected setting value");
}

#[then("there should be no setting error")]
fn no_setting_error(world: &mut NotifierWorld) {
    assert!(
        world.setting_error.is_none(),
        "Expected no error, got {:?}",
        world.setting_error
    );
}

#[then(expr = "the setting error should be {string}")]
fn setting_error_should_be(world: &mut NotifierWorld, expected: String) {
    let err = world
        .setting_error
        .as_ref()
        .expect("expected a setting error");
    assert_eq!(err.to_string(), expected);
}
