//! Data models for Plex API responses
//!
//! Everything Plex sends back arrives wrapped in a `MediaContainer`
//! envelope; each endpoint gets its own container type so serde can pick
//! out the fields we care about.

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

/// An addressable playback device, as listed by `GET /clients`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Device {
    #[serde(rename = "machineIdentifier")]
    pub machine_identifier: String,
    pub name: String,
}

/// A media server associated with the account, from `GET /servers/`
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    #[serde(rename = "machineIdentifier")]
    pub machine_identifier: String,
}

/// A catalog item returned by `GET /search`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Unique key of this item within the catalog
    #[serde(rename = "ratingKey")]
    pub rating_key: String,
    /// Catalog type string: movie, show, season, episode, artist, album, track
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default)]
    pub title: String,
}

/// A server-side play queue, freshly created per play request
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackQueue {
    pub queue_id: u64,
    pub selected_item_id: u64,
    pub size: u64,
    pub kind: MediaKind,
}

/// Opaque success payload from a transport command
pub type Ack = serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct DeviceContainer {
    #[serde(rename = "MediaContainer")]
    pub container: DeviceList,
}

#[derive(Deserialize, Debug)]
pub struct DeviceList {
    #[serde(rename = "Server", default)]
    pub devices: Vec<Device>,
}

#[derive(Deserialize, Debug)]
pub struct ServerContainer {
    #[serde(rename = "MediaContainer")]
    pub container: ServerList,
}

#[derive(Deserialize, Debug)]
pub struct ServerList {
    #[serde(rename = "Server", default)]
    pub servers: Vec<ServerInfo>,
}

#[derive(Deserialize, Debug)]
pub struct SearchContainer {
    #[serde(rename = "MediaContainer")]
    pub container: SearchResults,
}

#[derive(Deserialize, Debug)]
pub struct SearchResults {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<MediaItem>,
}

#[derive(Deserialize, Debug)]
pub struct QueueContainer {
    #[serde(rename = "MediaContainer")]
    pub container: QueueDetails,
}

#[derive(Deserialize, Debug)]
pub struct QueueDetails {
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "playQueueID", default)]
    pub play_queue_id: Option<u64>,
    #[serde(rename = "playQueueSelectedItemID", default)]
    pub play_queue_selected_item_id: Option<u64>,
}
