//! Shared test harness: a scripted, call-recording MediaServer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use plexvoice::config::Config;
use plexvoice::error::{PlexError, PlexResult};
use plexvoice::media::{MediaKind, MediaType};
use plexvoice::server::{Ack, Device, MediaItem, MediaServer, PlaybackQueue, ServerInfo};

pub fn device(id: &str, name: &str) -> Device {
    Device {
        machine_identifier: id.to_string(),
        name: name.to_string(),
    }
}

pub fn item(key: &str, media_type: &str, title: &str) -> MediaItem {
    MediaItem {
        rating_key: key.to_string(),
        media_type: media_type.to_string(),
        title: title.to_string(),
    }
}

/// Config with no default device and a fixed server id
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server_machine_id = "srv-1".to_string();
    config
}

/// Scripted fake server. Responses are fixed up front; every trait method
/// bumps a counter so tests can assert which external calls were (not) made.
pub struct FakeServer {
    pub devices: Vec<Device>,
    pub catalog: Vec<MediaItem>,
    /// Queue ids handed out by create_queue; None scripts an empty queue
    pub queue_ids: Option<(u64, u64, u64)>,
    /// Fail list_devices with a transport error
    pub devices_unreachable: bool,

    pub list_devices_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub create_queue_calls: AtomicUsize,
    pub playback_command_calls: AtomicUsize,
    pub play_queue_command_calls: AtomicUsize,

    /// (device id, verb) of the last bare transport command
    pub last_command: Mutex<Option<(String, String)>>,
    /// (media key, kind, shuffle) of the last queue request
    pub last_queue_request: Mutex<Option<(String, MediaKind, bool)>>,
}

impl FakeServer {
    pub fn new(devices: Vec<Device>, catalog: Vec<MediaItem>) -> Self {
        Self {
            devices,
            catalog,
            queue_ids: Some((5533, 9001, 3)),
            devices_unreachable: false,
            list_devices_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            create_queue_calls: AtomicUsize::new(0),
            playback_command_calls: AtomicUsize::new(0),
            play_queue_command_calls: AtomicUsize::new(0),
            last_command: Mutex::new(None),
            last_queue_request: Mutex::new(None),
        }
    }

    pub fn external_calls(&self) -> usize {
        self.list_devices_calls.load(Ordering::SeqCst)
            + self.search_calls.load(Ordering::SeqCst)
            + self.create_queue_calls.load(Ordering::SeqCst)
            + self.playback_command_calls.load(Ordering::SeqCst)
            + self.play_queue_command_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaServer for FakeServer {
    async fn list_devices(&self) -> PlexResult<Vec<Device>> {
        self.list_devices_calls.fetch_add(1, Ordering::SeqCst);
        if self.devices_unreachable {
            return Err(PlexError::Transport("connection refused".to_string()));
        }
        Ok(self.devices.clone())
    }

    async fn list_servers(&self) -> PlexResult<Vec<ServerInfo>> {
        Ok(vec![ServerInfo {
            name: "Test Server".to_string(),
            machine_identifier: "srv-1".to_string(),
        }])
    }

    async fn search(
        &self,
        query: &str,
        type_filter: Option<MediaType>,
    ) -> PlexResult<Vec<MediaItem>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let query = query.to_lowercase();

        // Emulates the real server: name match plus server-side type filter
        Ok(self
            .catalog
            .iter()
            .filter(|i| i.title.to_lowercase().contains(&query))
            .filter(|i| match type_filter {
                Some(t) => MediaType::parse(&i.media_type) == Some(t),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn create_queue(
        &self,
        _server_machine_id: &str,
        item: &MediaItem,
        kind: MediaKind,
        shuffle: bool,
    ) -> PlexResult<Option<PlaybackQueue>> {
        self.create_queue_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_queue_request.lock().unwrap() =
            Some((item.rating_key.clone(), kind, shuffle));

        Ok(self
            .queue_ids
            .map(|(queue_id, selected_item_id, size)| PlaybackQueue {
                queue_id,
                selected_item_id,
                size,
                kind,
            }))
    }

    async fn send_playback_command(&self, device: &Device, verb: &str) -> PlexResult<Ack> {
        self.playback_command_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_command.lock().unwrap() =
            Some((device.machine_identifier.clone(), verb.to_string()));
        Ok(serde_json::json!({ "code": 200, "status": "OK" }))
    }

    async fn send_play_queue_command(
        &self,
        device: &Device,
        queue: &PlaybackQueue,
    ) -> PlexResult<Ack> {
        self.play_queue_command_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_command.lock().unwrap() = Some((
            device.machine_identifier.clone(),
            format!("playMedia:{}", queue.queue_id),
        ));
        Ok(serde_json::json!({ "code": 200, "status": "OK" }))
    }
}
