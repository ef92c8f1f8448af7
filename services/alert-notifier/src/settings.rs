//! Typed access to a channel's untyped settings blob
//!
//! Channel settings arrive as an opaque JSON object. Values are held as a
//! [`SettingValue`] and coerced on read into the type the caller asks for:
//!
//! | requested | accepted representations                             |
//! |-----------|------------------------------------------------------|
//! | `bool`    | bool, string (`true` iff non-empty), int (`!= 0`)    |
//! | `String`  | string                                               |
//! | `i64`     | int, string parsed as a base-10 signed integer       |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SettingError;

/// A single raw settings value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    String(String),
    /// Anything else: floats, arrays, objects, null
    Other(serde_json::Value),
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<serde_json::Value> for SettingValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => SettingValue::Bool(b),
            serde_json::Value::String(s) => SettingValue::String(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => SettingValue::Int(i),
                None => SettingValue::Other(serde_json::Value::Number(n)),
            },
            other => SettingValue::Other(other),
        }
    }
}

/// Conversion from a raw settings value into a requested type
pub trait FromSetting: Sized + Default {
    /// Returns `None` when no accepted representation matches
    fn from_setting(value: &SettingValue) -> Option<Self>;
}

impl FromSetting for bool {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::String(s) => Some(!s.is_empty()),
            SettingValue::Int(i) => Some(*i != 0),
            SettingValue::Other(_) => None,
        }
    }
}

impl FromSetting for String {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromSetting for i64 {
    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Int(i) => Some(*i),
            SettingValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Outcome of a settings lookup: always a usable value, plus the error if any
///
/// On failure `value` holds the caller's default, or the type's zero value
/// when no default was given, so lenient callers can carry on.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Lookup<T> {
    pub value: T,
    pub error: Option<SettingError>,
}

impl<T> Lookup<T> {
    fn found(value: T) -> Self {
        Self { value, error: None }
    }

    fn failed(value: T, error: SettingError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Fail on any lookup error
    pub fn strict(self) -> Result<T, SettingError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    pub fn into_parts(self) -> (T, Option<SettingError>) {
        (self.value, self.error)
    }
}

impl<T: std::fmt::Debug> Lookup<T> {
    /// Take the value regardless of errors, logging any error
    pub fn lenient(self) -> T {
        if let Some(err) = &self.error {
            tracing::warn!("{}, using {:?}", err, self.value);
        }
        self.value
    }
}

/// Untyped key-value settings of a notification channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, SettingValue>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read `key` as `T`.
    ///
    /// A missing key yields `default` without error when one is supplied,
    /// otherwise [`SettingError::Missing`]. A present key that cannot be
    /// coerced yields [`SettingError::Invalid`].
    pub fn get<T: FromSetting>(&self, key: &str, default: Option<T>) -> Lookup<T> {
        let Some(raw) = self.0.get(key) else {
            return match default {
                Some(value) => Lookup::found(value),
                None => Lookup::failed(T::default(), SettingError::Missing(key.to_string())),
            };
        };

        match T::from_setting(raw) {
            Some(value) => Lookup::found(value),
            None => Lookup::failed(
                default.unwrap_or_default(),
                SettingError::Invalid(key.to_string()),
            ),
        }
    }

    pub fn bool(&self, key: &str, default: Option<bool>) -> Lookup<bool> {
        self.get(key, default)
    }

    pub fn string(&self, key: &str, default: Option<&str>) -> Lookup<String> {
        self.get(key, default.map(str::to_string))
    }

    pub fn int64(&self, key: &str, default: Option<i64>) -> Lookup<i64> {
        self.get(key, default)
    }
}

impl FromIterator<(String, SettingValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
