//! Action dispatch
//!
//! The public entry point: maps an intent verb to an orchestration of
//! device resolution, media resolution, queue building, and transport
//! commands. One linear pass per request, no state kept between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::devices::resolve_device;
use crate::error::{PlexError, PlexResult};
use crate::media::{build_queue, resolve_media, MediaType};
use crate::server::{Ack, Device, MediaItem, MediaServer, PlaybackQueue};

/// Supported intent verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Query media by name, build a queue, play it
    Play,
    /// Same as play, with the queue shuffled
    Shuffle,
    /// Continue whatever the device was playing
    Resume,
    Pause,
    Stop,
    SkipNext,
    SkipPrevious,
    /// Jump forward within the current item
    StepForward,
    /// Jump back within the current item
    StepBack,
}

impl std::str::FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Action::Play),
            "shuffle" => Ok(Action::Shuffle),
            "resume" => Ok(Action::Resume),
            "pause" => Ok(Action::Pause),
            "stop" => Ok(Action::Stop),
            "skipNext" => Ok(Action::SkipNext),
            "skipPrevious" => Ok(Action::SkipPrevious),
            "stepForward" => Ok(Action::StepForward),
            "stepBack" => Ok(Action::StepBack),
            _ => Err(()),
        }
    }
}

impl Action {
    /// Parse from string (convenience)
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// The verb string as accepted by `parse`
    pub fn name(&self) -> &'static str {
        match self {
            Action::Play => "play",
            Action::Shuffle => "shuffle",
            Action::Resume => "resume",
            Action::Pause => "pause",
            Action::Stop => "stop",
            Action::SkipNext => "skipNext",
            Action::SkipPrevious => "skipPrevious",
            Action::StepForward => "stepForward",
            Action::StepBack => "stepBack",
        }
    }

    /// The transport command this verb issues. Resume has no verb of its
    /// own on the wire; it is the plain `play` command without a payload.
    pub fn transport_verb(&self) -> &'static str {
        match self {
            Action::Play | Action::Shuffle | Action::Resume => "play",
            Action::Pause => "pause",
            Action::Stop => "stop",
            Action::SkipNext => "skipNext",
            Action::SkipPrevious => "skipPrevious",
            Action::StepForward => "stepForward",
            Action::StepBack => "stepBack",
        }
    }

    /// All supported verbs
    pub fn all() -> Vec<Action> {
        vec![
            Action::Play,
            Action::Shuffle,
            Action::Resume,
            Action::Pause,
            Action::Stop,
            Action::SkipNext,
            Action::SkipPrevious,
            Action::StepForward,
            Action::StepBack,
        ]
    }
}

/// One dispatch request. Immutable per invocation; resolution results go
/// into the outcome, never back into this struct or shared config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Intent verb, e.g. "play", "shuffle", "pause"
    pub action: String,
    /// Explicit playback device name
    #[serde(default)]
    pub device_name: Option<String>,
    /// Free-text name of the media to play
    #[serde(default)]
    pub media_name: Option<String>,
    /// Optional media type filter ("show", "movie", "track", ...)
    #[serde(default)]
    pub media_type: Option<String>,
    /// Shuffle the queue even for a plain play
    #[serde(default)]
    pub shuffle: bool,
}

/// What a dispatch resolved and did: the enrichment record for one request
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub device: Device,
    pub media: Option<MediaItem>,
    pub queue: Option<PlaybackQueue>,
    pub ack: Ack,
}

/// Dispatch one action request. Each stage short-circuits on failure; a
/// playback command is never issued without a fully resolved device, and a
/// play-queue command never without a fully built queue.
pub async fn dispatch(
    server: &dyn MediaServer,
    config: &Config,
    request: &ActionRequest,
) -> PlexResult<DispatchOutcome> {
    let Some(action) = Action::parse(&request.action) else {
        debug!("No such action: '{}'", request.action);
        return Err(PlexError::UnrecognizedAction(request.action.clone()));
    };

    match action {
        Action::Play | Action::Shuffle => {
            let device = resolve_device(server, config, request.device_name.as_deref()).await?;
            info!("🎯 Targeting device {} [{}]", device.name, device.machine_identifier);

            let name = request
                .media_name
                .as_deref()
                .ok_or_else(|| PlexError::MediaNotFound("no media name given".to_string()))?;

            // Normalized once here; downstream only ever sees the enum.
            let type_filter = request.media_type.as_deref().and_then(MediaType::parse);

            let media = resolve_media(server, name, type_filter).await?;
            let shuffle = request.shuffle || action == Action::Shuffle;
            let queue = build_queue(server, config, &media, shuffle).await?;

            let ack = server.send_play_queue_command(&device, &queue).await?;
            Ok(DispatchOutcome {
                device,
                media: Some(media),
                queue: Some(queue),
                ack,
            })
        }
        Action::Resume
        | Action::Pause
        | Action::Stop
        | Action::SkipNext
        | Action::SkipPrevious
        | Action::StepForward
        | Action::StepBack => {
            let device = resolve_device(server, config, request.device_name.as_deref()).await?;
            info!("🎯 Targeting device {} [{}]", device.name, device.machine_identifier);

            let ack = server
                .send_playback_command(&device, action.transport_verb())
                .await?;
            Ok(DispatchOutcome {
                device,
                media: None,
                queue: None,
                ack,
            })
        }
    }
}
