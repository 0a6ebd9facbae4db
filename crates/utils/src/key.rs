use crate::filename::{extension_of, sanitize_or_generate};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Extension given to every transcoded image.
pub const TRANSCODED_EXTENSION: &str = ".webp";

/// Compact, sortable rendering of an instant: `YYYYMMDDHHmmssSSS` (UTC).
pub fn render_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d%H%M%S%3f").to_string()
}

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Current instant, never earlier than one previously returned by this function.
///
/// Guards key ordering against the wall clock stepping backwards.
pub fn monotonic_now() -> DateTime<Utc> {
    let now = Utc::now().timestamp_millis();
    let previous = LAST_MILLIS.fetch_max(now, Ordering::SeqCst);
    let millis = previous.max(now);
    Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
}

/// Builds `{folder}/{sanitized}-{timestamp}{extension}` for the current instant.
pub fn build_key(folder: &str, original_name: &str, is_image: bool) -> String {
    build_key_at(folder, original_name, is_image, monotonic_now())
}

/// Same as [`build_key`] with an explicit instant.
pub fn build_key_at(
    folder: &str,
    original_name: &str,
    is_image: bool,
    instant: DateTime<Utc>,
) -> String {
    let folder = folder.trim_end_matches('/');
    let name = sanitize_or_generate(original_name);
    let timestamp = render_timestamp(instant);
    let extension = if is_image {
        TRANSCODED_EXTENSION.to_string()
    } else {
        extension_of(original_name)
    };

    if folder.is_empty() {
        format!("{}-{}{}", name, timestamp, extension)
    } else {
        format!("{}/{}-{}{}", folder, name, timestamp, extension)
    }
}
