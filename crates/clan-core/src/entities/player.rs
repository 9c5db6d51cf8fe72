//! Player entity - a game account, optionally linked to a chat account

use crate::value_objects::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub tag: Tag,
    pub name: String,
    /// Linked chat-platform account id
    pub discord_id: Option<String>,
}

impl Player {
    pub fn new(tag: Tag, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
            discord_id: None,
        }
    }

    pub fn with_discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = Some(discord_id.into());
        self
    }

    /// Check if the player is linked to a chat account
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.discord_id.is_some()
    }

    /// Account ids are numeric snowflakes
    pub fn is_valid_discord_id(id: &str) -> bool {
        !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
    }
}
