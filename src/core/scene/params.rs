//=========================================================================
// Scene Parameters
//=========================================================================
//
// Ordered key/value bag handed to a scene when it is constructed.
//
// Requests own their parameters by value: the next and queued slots of
// the switcher never share a map.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

//=== ParamValue ==========================================================

/// A single scene initialization value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(value: Vec<ParamValue>) -> Self {
        Self::List(value)
    }
}

//=== SceneParams =========================================================

/// Initialization values attached to a switch request.
///
/// Keys iterate in sorted order so scene construction is deterministic
/// regardless of insertion order.
///
/// ```rust
/// # use fennex_scenes::core::scene::{ParamValue, SceneParams};
/// let params = SceneParams::new()
///     .with("Level", 3)
///     .with("Title", "Bonus");
///
/// assert_eq!(params.get_int("Level"), Some(3));
/// assert_eq!(params.get("Title"), Some(&ParamValue::Text("Bonus".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneParams {
    values: BTreeMap<String, ParamValue>,
}

impl SceneParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    //--- Typed Accessors --------------------------------------------------

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value; floats are not coerced.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            ParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float value; integers are widened.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            ParamValue::Float(value) => Some(*value),
            ParamValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ParamValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    //--- Collection -------------------------------------------------------

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for SceneParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
