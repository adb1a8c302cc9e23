use async_trait::async_trait;

use crate::error::PlexResult;
use crate::media::{MediaKind, MediaType};

pub mod models;
pub mod plex;

pub use models::{Ack, Device, MediaItem, PlaybackQueue, ServerInfo};

/// The external media-catalog/transport collaborator.
///
/// One implementation talks HTTP to a real Plex server; tests substitute a
/// scripted fake. Every call is a fresh, read-only snapshot — nothing here
/// caches or retries.
#[async_trait]
pub trait MediaServer: Send + Sync {
    /// List the playback devices currently known to the server
    async fn list_devices(&self) -> PlexResult<Vec<Device>>;

    /// List the media servers associated with the account (setup aid)
    async fn list_servers(&self) -> PlexResult<Vec<ServerInfo>>;

    /// Search the catalog, optionally restricted to one media type
    async fn search(
        &self,
        query: &str,
        type_filter: Option<MediaType>,
    ) -> PlexResult<Vec<MediaItem>>;

    /// Materialize a server-side play queue from a single item.
    /// `Ok(None)` means the queue came back with zero items.
    async fn create_queue(
        &self,
        server_machine_id: &str,
        item: &MediaItem,
        kind: MediaKind,
        shuffle: bool,
    ) -> PlexResult<Option<PlaybackQueue>>;

    /// Issue a bare transport command (pause, stop, skipNext, ...) to a device
    async fn send_playback_command(&self, device: &Device, verb: &str) -> PlexResult<Ack>;

    /// Tell a device to start playing a previously built queue
    async fn send_play_queue_command(
        &self,
        device: &Device,
        queue: &PlaybackQueue,
    ) -> PlexResult<Ack>;
}
