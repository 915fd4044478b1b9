//! Presence payloads shared by the unit tests.

use serde_json::{json, Value};

/// A presence object shaped like the service's, listening to music and
/// running one game.
pub(crate) fn presence_json(status: &str) -> Value {
    json!({
        "discord_user": {
            "id": "94490510688792576",
            "username": "phin",
            "global_name": "Phineas",
            "discriminator": "0",
            "avatar": "a_1b2c3d"
        },
        "discord_status": status,
        "active_on_discord_desktop": true,
        "active_on_discord_mobile": false,
        "active_on_discord_web": false,
        "listening_to_spotify": true,
        "spotify": {
            "track_id": "4uLU6hMCjMI75M1A2tKUQC",
            "song": "Never Gonna Give You Up",
            "artist": "Rick Astley",
            "album": "Whenever You Need Somebody",
            "album_art_url": "https://i.scdn.co/image/ab67616d0000b273",
            "timestamps": { "start": 1700000000000i64, "end": 1700000213000i64 }
        },
        "activities": [
            {
                "type": 2,
                "name": "Spotify",
                "details": "Never Gonna Give You Up",
                "state": "Rick Astley",
                "assets": { "large_image": "spotify:ab67616d0000b273" }
            },
            {
                "type": 0,
                "name": "Visual Studio Code",
                "details": "Editing lib.rs",
                "state": "Workspace: lanyard",
                "application_id": "383226320970055681",
                "assets": {
                    "large_image": "565944799046533130",
                    "large_text": "Editing a RUST file"
                },
                "timestamps": { "start": 1700000000000i64 }
            }
        ],
        "kv": {}
    })
}

/// A minimal presence object with no activities.
pub(crate) fn bare_presence_json(status: &str) -> Value {
    json!({
        "discord_user": { "id": "94490510688792576", "username": "phin" },
        "discord_status": status,
        "activities": [],
        "spotify": null
    })
}
