//! Catalog data model: a perfume and its three note tiers.
//!
//! Scoring treats perfumes as immutable inputs; normalization produces a new
//! value rather than mutating in place.

use serde::{Deserialize, Serialize};

/// The note pyramid: top, middle, and base tiers in catalog order.
/// A missing tier deserializes to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTiers {
    #[serde(default)]
    pub top: Vec<String>,
    #[serde(default)]
    pub middle: Vec<String>,
    #[serde(default)]
    pub base: Vec<String>,
}

impl NoteTiers {
    /// Total number of notes across all three tiers.
    pub fn len(&self) -> usize {
        self.top.len() + self.middle.len() + self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A catalog perfume: identity, note tiers, and a coarse fragrance family
/// label (e.g. "Oriental").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perfume {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: NoteTiers,
    #[serde(default, rename = "fragranceFamily")]
    pub fragrance_family: String,
}

impl Perfume {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the fragrance family (builder style).
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.fragrance_family = family.into();
        self
    }

    pub fn top(mut self, notes: &[&str]) -> Self {
        self.notes.top = notes.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn middle(mut self, notes: &[&str]) -> Self {
        self.notes.middle = notes.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn base(mut self, notes: &[&str]) -> Self {
        self.notes.base = notes.iter().map(|n| n.to_string()).collect();
        self
    }
}
