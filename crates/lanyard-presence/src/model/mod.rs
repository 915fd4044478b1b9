//! Presence data model.
//!
//! The service's JSON is decoded into the private types in [`wire`] and
//! converted into these types, which is where music activities are split
//! out of the generic activity list.

mod wire;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use lanyard_common::PresenceError;

use crate::assets;

pub(crate) use wire::LanyardPresence;

/// Activity type tag Discord uses for "Listening to ...".
pub const MUSIC_ACTIVITY_TYPE: u8 = 2;

/// Online status as reported by Discord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Online,
    Idle,
    #[serde(rename = "dnd")]
    DoNotDisturb,
    #[default]
    Offline,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Idle => "idle",
            Status::DoNotDisturb => "dnd",
            Status::Offline => "offline",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start/end of an activity, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
}

/// The Discord account behind a presence record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    pub global_name: Option<String>,
    pub discriminator: String,
    /// Avatar hash, if the user has a custom avatar.
    pub avatar: Option<String>,
}

impl DiscordUser {
    /// Global display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.global_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_deref()
            .map(|hash| assets::avatar_url(&self.id, hash))
    }
}

/// A running application or rich presence entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub name: String,
    pub type_tag: u8,
    pub details: Option<String>,
    pub state: Option<String>,
    pub application_id: Option<String>,
    /// Opaque large image reference, see [`assets::resolve_asset_url`].
    pub large_image: Option<String>,
    /// Hover text for the large image.
    pub large_text: Option<String>,
    pub timestamps: Option<Timestamps>,
}

impl Activity {
    /// Resolve the large image reference to a URL.
    pub fn large_image_url(&self) -> Option<String> {
        let reference = self.large_image.as_deref()?;
        assets::resolve_asset_url(reference, self.application_id.as_deref())
    }
}

/// What the user is listening to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MusicActivity {
    pub track: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: String,
    pub track_id: Option<String>,
    pub timestamps: Option<Timestamps>,
}

/// Snapshot of one user's presence.
///
/// Records are never merged: each one the service sends replaces the
/// previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresenceRecord {
    pub user_id: String,
    pub user: DiscordUser,
    pub status: Status,
    /// Non-music activities in the order the service reported them.
    pub activities: Vec<Activity>,
    pub music: Option<MusicActivity>,
    pub active_on_desktop: bool,
    pub active_on_mobile: bool,
    pub active_on_web: bool,
}

impl PresenceRecord {
    /// Decode a record from the service's presence object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PresenceError> {
        let wire: LanyardPresence = serde_json::from_value(value)
            .map_err(|e| PresenceError::Protocol(format!("invalid presence payload: {e}")))?;
        Ok(wire.into())
    }
}
