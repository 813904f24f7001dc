//! Fallible item properties
//!
//! Every property read from a PIM store can be absent or can fail on its
//! own. A failed read degrades to the property's default and never aborts
//! the item or the traversal.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// A single property value as read from the store.
///
/// Serialized untagged: `null` is [`Field::Missing`], `{"$error": "..."}`
/// is [`Field::Failed`], anything else is [`Field::Value`]. A value that
/// does not parse as `T` deserializes as [`Field::Failed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field<T> {
    /// The store has no value for this property
    Missing,
    /// The accessor failed
    Failed {
        #[serde(rename = "$error")]
        error: String,
    },
    /// A readable value
    Value(T),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Wire<T> {
    Missing,
    Failed {
        #[serde(rename = "$error")]
        error: String,
    },
    Value(T),
    Unreadable(serde_json::Value),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Missing => Field::Missing,
            Wire::Failed { error } => Field::Failed { error },
            Wire::Value(value) => Field::Value(value),
            Wire::Unreadable(raw) => Field::Failed {
                error: format!("unreadable value {}", raw),
            },
        })
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl<T> Field<T> {
    /// Create a failed read
    pub fn failed(error: impl Into<String>) -> Self {
        Field::Failed {
            error: error.into(),
        }
    }

    /// Borrow the value, treating a failed read as absent
    pub fn read(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Missing => None,
            Field::Failed { error } => {
                debug!("Property read failed, using default: {}", error);
                None
            }
        }
    }
}

impl<T: Clone + Default> Field<T> {
    /// Read the value or substitute `T::default()`
    pub fn read_or_default(&self) -> T {
        self.read().cloned().unwrap_or_default()
    }
}
