//! Plain-text presence card.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use lanyard_presence::{Activity, ClientState, MusicActivity, PresenceRecord, PresenceSnapshot};

/// Render the loading text, the error reason, or the card.
pub fn render_snapshot(snapshot: &PresenceSnapshot, now: DateTime<Utc>) -> String {
    match (&snapshot.state, &snapshot.record) {
        (ClientState::Loading, _) => "Loading presence...\n".to_string(),
        (ClientState::Error(reason), None) => format!("{reason}\n"),
        (ClientState::Error(reason), Some(record)) => {
            format!("{}(stale: {reason})\n", render_record(record, now))
        }
        (ClientState::Ready, Some(record)) => render_record(record, now),
        (ClientState::Ready, None) => String::new(),
    }
}

pub fn render_record(record: &PresenceRecord, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let user = &record.user;

    let handle = if user.discriminator == "0" || user.discriminator.is_empty() {
        format!("@{}", user.username)
    } else {
        format!("{}#{}", user.username, user.discriminator)
    };
    let _ = writeln!(out, "{} ({handle})", user.display_name());

    let mut platforms = Vec::new();
    if record.active_on_desktop {
        platforms.push("desktop");
    }
    if record.active_on_mobile {
        platforms.push("mobile");
    }
    if record.active_on_web {
        platforms.push("web");
    }
    if platforms.is_empty() {
        let _ = writeln!(out, "  status: {}", record.status);
    } else {
        let _ = writeln!(
            out,
            "  status: {} on {}",
            record.status,
            platforms.join(", ")
        );
    }
    if let Some(avatar) = user.avatar_url() {
        let _ = writeln!(out, "  avatar: {avatar}");
    }

    if let Some(music) = &record.music {
        render_music(&mut out, music);
    }
    for activity in &record.activities {
        render_activity(&mut out, activity, now);
    }
    out
}

fn render_music(out: &mut String, music: &MusicActivity) {
    let _ = writeln!(out, "  Listening to Spotify");
    let _ = writeln!(out, "    {}", music.track);
    let _ = writeln!(out, "    {}", music.artist);
    let _ = writeln!(out, "    {}", music.album);
    if !music.album_art_url.is_empty() {
        let _ = writeln!(out, "    art: {}", music.album_art_url);
    }
}

fn render_activity(out: &mut String, activity: &Activity, now: DateTime<Utc>) {
    let _ = writeln!(out, "  {}", activity.name);
    if let Some(details) = &activity.details {
        let _ = writeln!(out, "    {details}");
    }
    if let Some(state) = &activity.state {
        let _ = writeln!(out, "    {state}");
    }
    if let Some(elapsed) = activity
        .timestamps
        .and_then(|t| t.start)
        .and_then(|start| elapsed_since(start, now))
    {
        let _ = writeln!(out, "    {elapsed} elapsed");
    }
    if let Some(url) = activity.large_image_url() {
        match &activity.large_text {
            Some(text) => {
                let _ = writeln!(out, "    image: {url} ({text})");
            }
            None => {
                let _ = writeln!(out, "    image: {url}");
            }
        }
    }
}

/// `HH:MM:SS` since `start_ms`, or `None` for a start in the future.
fn elapsed_since(start_ms: i64, now: DateTime<Utc>) -> Option<String> {
    let start = DateTime::from_timestamp_millis(start_ms)?;
    let secs = now.signed_duration_since(start).num_seconds();
    if secs < 0 {
        return None;
    }
    Some(format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    ))
}
