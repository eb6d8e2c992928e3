//! Announcement formatting for published releases.
use crate::{
    config::{AnnouncementConfig, Config},
    event::{Channel, ReleaseEvent},
};

/// Release page linked from an announcement for the given channel.
pub fn release_link(config: &AnnouncementConfig, channel: Channel) -> &str {
    match channel {
        Channel::Preview => &config.preview_release_link,
        Channel::Stable => &config.stable_release_link,
    }
}

/// Build the announcement message for a release: a markdown sentence linking
/// the release page followed by the release notes, truncated to the
/// configured maximum length.
pub fn format_announcement(config: &Config, event: &ReleaseEvent) -> String {
    let link = release_link(&config.announcement, event.channel());

    let message = format!(
        "📣 {} [{}](<{}>) was just released!\n{}",
        config.product_name, event.tag_name, link, event.body
    );

    truncate(
        &message,
        config.announcement.max_length,
        &config.announcement.truncation_marker,
    )
}

/// Truncate `value` to at most `max_length` characters. When truncation
/// occurs the result ends with `marker` and is exactly `max_length`
/// characters long. Lengths are counted in chars, not bytes.
pub fn truncate(value: &str, max_length: usize, marker: &str) -> String {
    if value.chars().count() <= max_length {
        return value.to_string();
    }

    let keep = max_length.saturating_sub(marker.chars().count());

    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str(marker);
    truncated
}
