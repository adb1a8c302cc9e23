//! Plex HTTP client
//!
//! Talks to the Plex control API over reqwest. Responses are requested as
//! JSON and decoded into the MediaContainer models; transport failures are
//! surfaced as-is, with no retries.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{PlexError, PlexResult};
use crate::media::{MediaKind, MediaType};
use crate::server::models::{
    Ack, Device, DeviceContainer, MediaItem, PlaybackQueue, QueueContainer, SearchContainer,
    ServerContainer, ServerInfo,
};
use crate::server::MediaServer;

/// Header used to address a specific playback device
const TARGET_CLIENT_HEADER: &str = "X-Plex-Target-Client-Identifier";

pub struct PlexClient {
    client: Client,
    base_url: String,
    hostname: String,
    port: u16,
    access_token: String,
    client_identifier: String,
    server_machine_id: String,
}

impl PlexClient {
    pub fn new(config: &Config) -> Self {
        let base_url = format!("http://{}:{}", config.hostname, config.port);
        Self {
            client: Client::new(),
            base_url,
            hostname: config.hostname.clone(),
            port: config.port,
            access_token: config.access_token.clone(),
            client_identifier: config.client_identifier.clone(),
            server_machine_id: config.server_machine_id.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, path_and_query: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("Plex request: {} {}", method, url);
        self.client
            .request(method, url)
            .header("Accept", "application/json")
            .header("X-Plex-Token", &self.access_token)
            .header("X-Plex-Client-Identifier", &self.client_identifier)
            .header("X-Plex-Product", &self.client_identifier)
    }

    async fn query<T: serde::de::DeserializeOwned>(&self, path_and_query: &str) -> PlexResult<T> {
        let response = self
            .request(reqwest::Method::GET, path_and_query)
            .send()
            .await?;

        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post_query<T: serde::de::DeserializeOwned>(
        &self,
        path_and_query: &str,
        target_device: Option<&Device>,
    ) -> PlexResult<T> {
        let mut builder = self.request(reqwest::Method::POST, path_and_query);
        if let Some(device) = target_device {
            builder = builder.header(TARGET_CLIENT_HEADER, &device.machine_identifier);
        }

        let response = builder.send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl MediaServer for PlexClient {
    async fn list_devices(&self) -> PlexResult<Vec<Device>> {
        let result: DeviceContainer = self.query("/clients").await?;
        Ok(result.container.devices)
    }

    async fn list_servers(&self) -> PlexResult<Vec<ServerInfo>> {
        let result: ServerContainer = self.query("/servers/").await?;
        Ok(result.container.servers)
    }

    async fn search(
        &self,
        query: &str,
        type_filter: Option<MediaType>,
    ) -> PlexResult<Vec<MediaItem>> {
        let mut endpoint = format!("/search?query={}", urlencoding::encode(query));
        if let Some(media_type) = type_filter {
            endpoint.push_str(&format!("&type={}", media_type.type_id()));
        }

        let result: SearchContainer = self.query(&endpoint).await?;
        Ok(result.container.metadata)
    }

    async fn create_queue(
        &self,
        server_machine_id: &str,
        item: &MediaItem,
        kind: MediaKind,
        shuffle: bool,
    ) -> PlexResult<Option<PlaybackQueue>> {
        let endpoint = format!(
            "/playQueues?type={}&shuffle={}&repeat=0&continuous=1&own=1\
             &uri=server://{}/com.plexapp.plugins.library/library/metadata/{}",
            kind.queue_type(),
            if shuffle { 1 } else { 0 },
            server_machine_id,
            item.rating_key
        );

        let result: QueueContainer = self.post_query(&endpoint, None).await?;
        let queue = result.container;

        if queue.size == 0 {
            return Ok(None);
        }
        match (queue.play_queue_id, queue.play_queue_selected_item_id) {
            (Some(queue_id), Some(selected_item_id)) => Ok(Some(PlaybackQueue {
                queue_id,
                selected_item_id,
                size: queue.size,
                kind,
            })),
            _ => Ok(None),
        }
    }

    async fn send_playback_command(&self, device: &Device, verb: &str) -> PlexResult<Ack> {
        let endpoint = format!(
            "/player/playback/{}?protocol=http&address={}&port={}&type=video\
             &commandID=1&machineIdentifier={}",
            verb, self.hostname, self.port, self.server_machine_id
        );

        self.post_query(&endpoint, Some(device)).await
    }

    async fn send_play_queue_command(
        &self,
        device: &Device,
        queue: &PlaybackQueue,
    ) -> PlexResult<Ack> {
        if self.access_token.is_empty() {
            return Err(PlexError::Config(
                "access token is required to start playback".to_string(),
            ));
        }

        let endpoint = format!(
            "/player/playback/playMedia?protocol=http&address={}&port={}\
             &containerKey=/playQueues/{}&key=/library/metadata/{}&offset=0\
             &type={}&commandID=1&machineIdentifier={}&token={}",
            self.hostname,
            self.port,
            queue.queue_id,
            queue.selected_item_id,
            queue.kind.queue_type(),
            self.server_machine_id,
            self.access_token
        );

        self.post_query(&endpoint, Some(device)).await
    }
}
