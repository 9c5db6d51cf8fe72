//! Clan entity

use crate::value_objects::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clan {
    pub tag: Tag,
    pub name: String,
    /// Display order among the community's clans
    pub index: i32,
}

impl Clan {
    pub fn new(tag: Tag, name: impl Into<String>, index: i32) -> Self {
        Self {
            tag,
            name: name.into(),
            index,
        }
    }
}
