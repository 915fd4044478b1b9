//! Discord CDN URL construction for avatars and activity images.

/// Prefix marking an image proxied from an external URL.
pub const EXTERNAL_MEDIA_PREFIX: &str = "mp:external/";

pub const EXTERNAL_MEDIA_BASE: &str = "https://media.discordapp.net/external/";
pub const APP_ASSET_BASE: &str = "https://cdn.discordapp.com/app-assets";
pub const AVATAR_BASE: &str = "https://cdn.discordapp.com/avatars";

/// Resolve an activity image reference to a URL.
///
/// `mp:external/...` references point at Discord's media proxy. Anything
/// else is an asset id scoped to the activity's application, so there is
/// no URL without an `application_id`.
pub fn resolve_asset_url(reference: &str, application_id: Option<&str>) -> Option<String> {
    if let Some(rest) = reference.strip_prefix(EXTERNAL_MEDIA_PREFIX) {
        return Some(format!("{EXTERNAL_MEDIA_BASE}{rest}"));
    }
    let application_id = application_id.filter(|id| !id.is_empty())?;
    Some(format!("{APP_ASSET_BASE}/{application_id}/{reference}.png"))
}

pub fn avatar_url(user_id: &str, avatar_hash: &str) -> String {
    format!("{AVATAR_BASE}/{user_id}/{avatar_hash}.png?size=128")
}
