use std::collections::BTreeMap;

use super::normalize::DEFAULT_ATTRIBUTE_VALUE;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub age: u32,
    pub position: String,
    pub club: String,
    pub division: String,
    pub nationality: String,
    pub height: u32,        // cm, 0 when unknown
    pub weight: u32,        // kg, 0 when unknown
    pub preferred_foot: String,
    pub attributes: BTreeMap<String, u32>,
}

impl PlayerRecord {
    /// Attribute value, or `None` when the sheet did not carry it
    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    /// Attribute value with the missing-attribute default applied
    pub fn attribute_or_default(&self, name: &str) -> u32 {
        self.attribute(name).unwrap_or(DEFAULT_ATTRIBUTE_VALUE)
    }
}
