use super::*;
use crate::fixtures::{bare_presence_json, presence_json};

#[test]
fn decodes_full_presence() {
    let record = PresenceRecord::from_value(presence_json("online")).unwrap();
    assert_eq!(record.user_id, "94490510688792576");
    assert_eq!(record.status, Status::Online);
    assert_eq!(record.user.display_name(), "Phineas");
    assert!(record.active_on_desktop);
    assert!(!record.active_on_mobile);
}

#[test]
fn music_activity_is_split_out() {
    let record = PresenceRecord::from_value(presence_json("online")).unwrap();
    assert!(record
        .activities
        .iter()
        .all(|a| a.type_tag != MUSIC_ACTIVITY_TYPE));
    assert_eq!(record.activities.len(), 1);
    assert_eq!(record.activities[0].name, "Visual Studio Code");

    let music = record.music.expect("music activity");
    assert_eq!(music.track, "Never Gonna Give You Up");
    assert_eq!(music.artist, "Rick Astley");
    assert_eq!(music.album, "Whenever You Need Somebody");
    assert_eq!(
        music.album_art_url,
        "https://i.scdn.co/image/ab67616d0000b273"
    );
    assert_eq!(music.timestamps.and_then(|t| t.end), Some(1700000213000));
}

#[test]
fn music_type_without_payload_is_still_filtered() {
    let mut value = presence_json("idle");
    value["spotify"] = serde_json::Value::Null;
    let record = PresenceRecord::from_value(value).unwrap();
    assert!(record.music.is_none());
    assert_eq!(record.activities.len(), 1);
}

#[test]
fn activity_order_is_preserved() {
    let mut value = bare_presence_json("online");
    value["activities"] = serde_json::json!([
        { "type": 0, "name": "first" },
        { "type": 2, "name": "Spotify" },
        { "type": 3, "name": "second" },
        { "type": 4, "name": "third", "state": "coding" }
    ]);
    let record = PresenceRecord::from_value(value).unwrap();
    let names: Vec<_> = record.activities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
    assert_eq!(record.activities[2].state.as_deref(), Some("coding"));
}

#[test]
fn dnd_maps_to_do_not_disturb() {
    let record = PresenceRecord::from_value(bare_presence_json("dnd")).unwrap();
    assert_eq!(record.status, Status::DoNotDisturb);
    assert_eq!(record.status.to_string(), "dnd");
}

#[test]
fn missing_fields_take_defaults() {
    let record = PresenceRecord::from_value(serde_json::json!({})).unwrap();
    assert_eq!(record.status, Status::Offline);
    assert!(record.activities.is_empty());
    assert!(record.music.is_none());
    assert_eq!(record.user.discriminator, "0");
}

#[test]
fn unknown_status_is_a_protocol_error() {
    let err = PresenceRecord::from_value(bare_presence_json("invisible")).unwrap_err();
    assert!(matches!(err, PresenceError::Protocol(_)));
}

#[test]
fn display_name_falls_back_to_username() {
    let record = PresenceRecord::from_value(bare_presence_json("online")).unwrap();
    assert_eq!(record.user.display_name(), "phin");
    assert_eq!(record.user.avatar_url(), None);
}

#[test]
fn avatar_url_uses_user_id_and_hash() {
    let record = PresenceRecord::from_value(presence_json("online")).unwrap();
    assert_eq!(
        record.user.avatar_url().as_deref(),
        Some("https://cdn.discordapp.com/avatars/94490510688792576/a_1b2c3d.png?size=128")
    );
}

#[test]
fn activity_resolves_large_image() {
    let record = PresenceRecord::from_value(presence_json("online")).unwrap();
    assert_eq!(
        record.activities[0].large_image_url().as_deref(),
        Some("https://cdn.discordapp.com/app-assets/383226320970055681/565944799046533130.png")
    );
    assert_eq!(
        record.activities[0].large_text.as_deref(),
        Some("Editing a RUST file")
    );
}
