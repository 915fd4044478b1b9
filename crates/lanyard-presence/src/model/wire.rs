//! Service-side JSON shapes and their conversion into the domain model.

use serde::Deserialize;

use super::{
    Activity, DiscordUser, MusicActivity, PresenceRecord, Status, Timestamps, MUSIC_ACTIVITY_TYPE,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LanyardPresence {
    pub discord_user: WireUser,
    pub discord_status: Status,
    pub activities: Vec<WireActivity>,
    pub spotify: Option<WireSpotify>,
    pub active_on_discord_desktop: bool,
    pub active_on_discord_mobile: bool,
    pub active_on_discord_web: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireUser {
    pub id: String,
    pub username: String,
    pub global_name: Option<String>,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireActivity {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: u8,
    pub details: Option<String>,
    pub state: Option<String>,
    pub application_id: Option<String>,
    pub assets: Option<WireAssets>,
    pub timestamps: Option<Timestamps>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireAssets {
    pub large_image: Option<String>,
    pub large_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireSpotify {
    pub track_id: Option<String>,
    pub song: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: Option<String>,
    pub timestamps: Option<Timestamps>,
}

impl From<WireUser> for DiscordUser {
    fn from(user: WireUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            global_name: user.global_name,
            discriminator: user.discriminator.unwrap_or_else(|| "0".into()),
            avatar: user.avatar,
        }
    }
}

impl From<WireActivity> for Activity {
    fn from(activity: WireActivity) -> Self {
        let (large_image, large_text) = match activity.assets {
            Some(assets) => (assets.large_image, assets.large_text),
            None => (None, None),
        };
        Self {
            name: activity.name,
            type_tag: activity.type_tag,
            details: activity.details,
            state: activity.state,
            application_id: activity.application_id,
            large_image,
            large_text,
            timestamps: activity.timestamps,
        }
    }
}

impl From<WireSpotify> for MusicActivity {
    fn from(spotify: WireSpotify) -> Self {
        Self {
            track: spotify.song,
            artist: spotify.artist,
            album: spotify.album,
            album_art_url: spotify.album_art_url.unwrap_or_default(),
            track_id: spotify.track_id,
            timestamps: spotify.timestamps,
        }
    }
}

impl From<LanyardPresence> for PresenceRecord {
    fn from(presence: LanyardPresence) -> Self {
        let user = DiscordUser::from(presence.discord_user);
        let activities = presence
            .activities
            .into_iter()
            .filter(|a| a.type_tag != MUSIC_ACTIVITY_TYPE)
            .map(Activity::from)
            .collect();
        Self {
            user_id: user.id.clone(),
            user,
            status: presence.discord_status,
            activities,
            music: presence.spotify.map(MusicActivity::from),
            active_on_desktop: presence.active_on_discord_desktop,
            active_on_mobile: presence.active_on_discord_mobile,
            active_on_web: presence.active_on_discord_web,
        }
    }
}
