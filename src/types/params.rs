//! Query parameter values as they travel to the Frost API.
//!
//! Every request model serializes into a [`RequestParameters`] map whose values
//! are plain strings: lists are comma-joined, booleans are `"true"`/`"false"`,
//! and unset optional fields are simply absent.

use crate::error::ValidationError;
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A list-valued parameter such as station ids, element ids or durations.
///
/// Accepts either a single comma-delimited string or a native collection; both
/// end up as the same normalized list of trimmed, non-empty items.
///
/// ```
/// use frost_client::ListParam;
///
/// let from_str = ListParam::from("SN18700, SN50540");
/// let from_vec = ListParam::from(vec!["SN18700", "SN50540"]);
/// assert_eq!(from_str, from_vec);
/// assert_eq!(from_str.to_param().as_deref(), Some("SN18700,SN50540"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParam(Vec<String>);

impl ListParam {
    fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ListParam(
            items
                .into_iter()
                .flat_map(|item| {
                    item.as_ref()
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .collect(),
        )
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The comma-joined wire form, or `None` for an empty list.
    pub fn to_param(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

impl fmt::Display for ListParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl From<&str> for ListParam {
    fn from(value: &str) -> Self {
        ListParam::from_items([value])
    }
}

impl From<String> for ListParam {
    fn from(value: String) -> Self {
        ListParam::from_items([value])
    }
}

impl From<&String> for ListParam {
    fn from(value: &String) -> Self {
        ListParam::from_items([value])
    }
}

impl<T: ToString> From<Vec<T>> for ListParam {
    fn from(value: Vec<T>) -> Self {
        ListParam::from_items(value.iter().map(|v| v.to_string()))
    }
}

impl<T: ToString> From<&[T]> for ListParam {
    fn from(value: &[T]) -> Self {
        ListParam::from_items(value.iter().map(|v| v.to_string()))
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for ListParam {
    fn from(value: [T; N]) -> Self {
        ListParam::from_items(value.iter().map(|v| v.to_string()))
    }
}

/// Treats a blank optional string as unset.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Treats an optional list without items as unset.
pub(crate) fn non_empty_list(value: Option<ListParam>) -> Option<ListParam> {
    value.filter(|list| !list.is_empty())
}

/// The validated, string-only parameter map sent as the URL query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RequestParameters(BTreeMap<String, String>);

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Inserts `value` unless it is unset or blank.
    pub(crate) fn insert_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value.map(|v| v.to_string()) {
            if !value.trim().is_empty() {
                self.insert(key, value);
            }
        }
    }

    pub(crate) fn insert_list(&mut self, key: &str, value: Option<&ListParam>) {
        if let Some(joined) = value.and_then(ListParam::to_param) {
            self.insert(key, joined);
        }
    }

    pub(crate) fn insert_bool(&mut self, key: &str, value: bool) {
        self.insert(key, if value { "true" } else { "false" });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub(crate) fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(String::from)
    }

    pub(crate) fn get_list(&self, key: &str) -> Option<ListParam> {
        self.get(key).map(ListParam::from)
    }

    pub(crate) fn require(&self, key: &str) -> Result<&str, ValidationError> {
        self.get(key).ok_or_else(|| ValidationError::missing(key))
    }

    pub(crate) fn get_bool(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(ValidationError::new(
                key,
                format!("{key} must be 'true' or 'false', got '{other}'"),
            )),
        }
    }

    pub(crate) fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, ValidationError> {
        self.get(key)
            .map(|raw| {
                raw.trim().parse::<T>().map_err(|_| {
                    ValidationError::new(key, format!("{key} has an invalid value '{raw}'"))
                })
            })
            .transpose()
    }

    pub(crate) fn require_parsed<T: FromStr>(&self, key: &str) -> Result<T, ValidationError> {
        self.get_parsed(key)?
            .ok_or_else(|| ValidationError::missing(key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RequestParameters(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a RequestParameters {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
