//! Device resolution
//!
//! Picks the playback device a command should target. An explicitly named
//! device always wins or fails; otherwise the configured default, then a
//! lone listed device, in that order.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PlexError, PlexResult};
use crate::server::{Device, MediaServer};

/// Resolve the target playback device.
///
/// Policy, in order:
/// 1. Explicit name: exact match in the current device list, or NotFound.
///    An explicit request is never redirected to a default.
/// 2. Configured default device id, if it appears in the current list.
/// 3. Exactly one device listed: take it.
/// 4. Otherwise NotFound; the full device list is logged so an operator
///    can pick a default.
pub async fn resolve_device(
    server: &dyn MediaServer,
    config: &Config,
    requested: Option<&str>,
) -> PlexResult<Device> {
    let devices = server.list_devices().await?;

    if let Some(name) = requested {
        debug!("A device name was targeted, checking to see if it exists...");
        return match devices.into_iter().find(|d| d.name == name) {
            Some(device) => Ok(device),
            None => {
                debug!("Device name match for '{}' wasn't found", name);
                Err(PlexError::DeviceNotFound(name.to_string()))
            }
        };
    }

    if !config.default_device_id.is_empty() {
        if let Some(device) = devices
            .iter()
            .find(|d| d.machine_identifier == config.default_device_id)
        {
            info!("No target was specified. Defaulting to device ID {}", device.machine_identifier);
            return Ok(device.clone());
        }
    }

    if let [device] = devices.as_slice() {
        warn!(
            "No device targeted and no default set. Found exactly one device: {}",
            device.name
        );
        return Ok(device.clone());
    }

    // Zero or multiple candidates with nothing to disambiguate them.
    warn!("No device was targeted and no default device could be found.");
    warn!("Consider setting a default device from one of the devices below:");
    for device in &devices {
        warn!("  [{}] {}", device.machine_identifier, device.name);
    }

    Err(PlexError::DeviceNotFound(format!(
        "{} candidate devices, none selectable",
        devices.len()
    )))
}
