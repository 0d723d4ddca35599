//! Inbound parameter map and the per-widget decoder.
//!
//! Decoding never touches widget state. It only turns untrusted strings
//! into typed values that an adapter then decides to apply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::keys::{FIELD_SEPARATOR, UI_ROOT};
use crate::lifecycle::DecodingError;
use crate::widget::WidgetId;

/// A parameter value: one string or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    fn all(&self) -> Vec<String> {
        match self {
            ParamValue::Single(value) => vec![value.clone()],
            ParamValue::Multiple(values) => values.clone(),
        }
    }
}

/// The flat key/value input of one request. Immutable during a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    values: HashMap<String, ParamValue>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a single value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into(), ParamValue::Single(value.into()));
    }

    pub fn insert_all(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.values.insert(key.into(), ParamValue::Multiple(values));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(ParamValue::first)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Display id the client addressed, if sent.
    pub fn ui_root(&self) -> Option<&str> {
        self.get(UI_ROOT)
    }

    /// Decoder scoped to one widget.
    pub fn scoped<'a>(&'a self, widget: &'a WidgetId) -> ParamDecoder<'a> {
        ParamDecoder {
            params: self,
            widget,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Typed, widget-scoped view of [`RequestParams`].
///
/// Field accessors look up `"<widgetId>.<field>"`. Every accessor returns
/// `None` when the field is absent.
#[derive(Debug, Clone, Copy)]
pub struct ParamDecoder<'a> {
    params: &'a RequestParams,
    widget: &'a WidgetId,
}

impl<'a> ParamDecoder<'a> {
    pub fn widget(&self) -> &WidgetId {
        self.widget
    }

    fn key(&self, field: &str) -> String {
        format!("{}{}{}", self.widget, FIELD_SEPARATOR, field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.params.contains(&self.key(field))
    }

    pub fn get_string(&self, field: &str) -> Option<&'a str> {
        self.params.get(&self.key(field))
    }

    pub fn get_int(&self, field: &str) -> Result<Option<i64>, DecodingError> {
        let key = self.key(field);
        let Some(raw) = self.params.get(&key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| DecodingError::InvalidInt {
                key,
                value: raw.to_string(),
            })
    }

    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, DecodingError> {
        let key = self.key(field);
        match self.params.get(&key) {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(raw) => Err(DecodingError::InvalidBool {
                key,
                value: raw.to_string(),
            }),
        }
    }

    /// Well-formed value of an integer field. Malformed counts as absent.
    pub fn valid_int(&self, field: &str) -> Option<i64> {
        self.get_int(field).ok().flatten()
    }

    /// [`get_int`](Self::get_int) for adapters applying fields one at a
    /// time: a malformed value is pushed onto `errors` and read as absent.
    pub fn read_int(&self, field: &str, errors: &mut Vec<DecodingError>) -> Option<i64> {
        self.get_int(field).unwrap_or_else(|err| {
            errors.push(err);
            None
        })
    }

    /// Boolean counterpart of [`read_int`](Self::read_int).
    pub fn read_bool(&self, field: &str, errors: &mut Vec<DecodingError>) -> Option<bool> {
        self.get_bool(field).unwrap_or_else(|err| {
            errors.push(err);
            None
        })
    }

    pub fn get_string_array(&self, field: &str) -> Option<Vec<String>> {
        self.params.values.get(&self.key(field)).map(ParamValue::all)
    }

    /// Whether the control key `event_key` names this widget as event source.
    pub fn is_event_source(&self, event_key: &str) -> bool {
        self.params.get(event_key) == Some(self.widget.as_str())
    }
}
