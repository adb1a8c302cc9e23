//! Media resolution and queue building
//!
//! Turns a human-supplied media name into a concrete catalog item, then
//! asks the server to materialize a play queue from it.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{PlexError, PlexResult};
use crate::server::{MediaItem, MediaServer, PlaybackQueue};

/// Catalog media types, matching Plex's type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Show,
    Season,
    Episode,
    Artist,
    Album,
    Track,
}

impl MediaType {
    /// Numeric type id used by the search endpoint's `type=` filter
    pub fn type_id(&self) -> u32 {
        match self {
            MediaType::Movie => 1,
            MediaType::Show => 2,
            MediaType::Season => 3,
            MediaType::Episode => 4,
            MediaType::Artist => 8,
            MediaType::Album => 9,
            MediaType::Track => 10,
        }
    }

    /// Case-insensitive parse. An unrecognized string means "no filter",
    /// never an error — callers pass the result straight through.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movie" => Some(MediaType::Movie),
            "show" => Some(MediaType::Show),
            "season" => Some(MediaType::Season),
            "episode" => Some(MediaType::Episode),
            "artist" => Some(MediaType::Artist),
            "album" => Some(MediaType::Album),
            "track" => Some(MediaType::Track),
            _ => None,
        }
    }

    /// Whether items of this type play on the video or audio surface
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaType::Movie | MediaType::Show | MediaType::Season | MediaType::Episode => {
                MediaKind::Video
            }
            MediaType::Artist | MediaType::Album | MediaType::Track => MediaKind::Audio,
        }
    }
}

/// Playback surface a queue is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Wire value for queue and playMedia requests
    pub fn queue_type(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "music",
        }
    }
}

/// Classify a resolved item's type string. Anything that isn't one of the
/// video types (including types we don't know) queues as audio.
pub fn classify(media_type: &str) -> MediaKind {
    match MediaType::parse(media_type) {
        Some(t) => t.kind(),
        None => MediaKind::Audio,
    }
}

/// Resolve a free-text name to a single best-match catalog item.
///
/// The type filter is pushed into the catalog query rather than applied
/// client-side; the first result is the best match (the catalog's own
/// ordering, no re-ranking here).
pub async fn resolve_media(
    server: &dyn MediaServer,
    name: &str,
    type_filter: Option<MediaType>,
) -> PlexResult<MediaItem> {
    let matches = server.search(name, type_filter).await?;

    match matches.into_iter().next() {
        Some(item) => {
            info!("🎯 Media found for '{}': {} [{}]", name, item.title, item.media_type);
            Ok(item)
        }
        None => {
            debug!("No matching media found for '{}' [{:?}]", name, type_filter);
            Err(PlexError::MediaNotFound(name.to_string()))
        }
    }
}

/// Build a server-side play queue from exactly one resolved item.
///
/// A queue with zero items is "nothing playable", same as a failed lookup.
pub async fn build_queue(
    server: &dyn MediaServer,
    config: &Config,
    item: &MediaItem,
    shuffle: bool,
) -> PlexResult<PlaybackQueue> {
    let kind = classify(&item.media_type);

    let queue = server
        .create_queue(&config.server_machine_id, item, kind, shuffle)
        .await?;

    match queue {
        Some(queue) => {
            info!(
                "📜 Enqueued {} items. playQueueID is {}, selected item is {}",
                queue.size, queue.queue_id, queue.selected_item_id
            );
            Ok(queue)
        }
        None => {
            debug!("Queue is empty. Nothing came back for key {}.", item.rating_key);
            Err(PlexError::QueueBuildFailed(item.title.clone()))
        }
    }
}
