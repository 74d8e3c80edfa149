// SPDX-License-Identifier: GPL-3.0-only

//! Camera discovery through the GStreamer device monitor

use super::types::{CameraDevice, CameraLocation};
use crate::errors::CameraError;
use gstreamer::prelude::*;
use tracing::{debug, info};

/// Device properties that carry a stable path, in preference order
const PATH_PROPERTIES: &[&str] = &["object.path", "api.v4l2.path", "device.path"];

/// Device properties that describe the mounting location
const LOCATION_PROPERTIES: &[&str] = &["api.libcamera.location", "camera.location"];

/// List every video source GStreamer can see
///
/// The same physical camera is often reported by more than one provider
/// (PipeWire and V4L2); only the first report of each name is kept.
pub fn enumerate_cameras() -> Result<Vec<CameraDevice>, CameraError> {
    gstreamer::init().map_err(|e| CameraError::GStreamerInit(e.to_string()))?;

    let monitor = gstreamer::DeviceMonitor::new();
    monitor.add_filter(Some("Video/Source"), None);
    monitor.start()?;
    let devices = monitor.devices();
    monitor.stop();

    let mut cameras: Vec<CameraDevice> = Vec::new();
    for device in devices {
        let camera = describe_device(device);
        if cameras.iter().any(|c| c.name == camera.name) {
            debug!(name = %camera.name, "Skipping duplicate camera");
            continue;
        }
        debug!(name = %camera.name, path = %camera.path, location = %camera.location, "Found camera");
        cameras.push(camera);
    }

    info!(count = cameras.len(), "Camera enumeration complete");
    Ok(cameras)
}

fn describe_device(device: gstreamer::Device) -> CameraDevice {
    let name = device.display_name().to_string();
    let properties = device.properties();

    let lookup = |keys: &[&str]| -> Option<String> {
        let props = properties.as_ref()?;
        keys.iter()
            .find_map(|key| props.get::<String>(*key).ok())
    };

    let path = lookup(PATH_PROPERTIES).unwrap_or_else(|| name.clone());
    let location = lookup(LOCATION_PROPERTIES)
        .map(|value| CameraLocation::from_property(&value))
        .unwrap_or_default();

    CameraDevice {
        name,
        path,
        location,
        device: Some(device),
    }
}

/// Pick the camera to open
///
/// A front-facing camera wins, then the one remembered in the config, then
/// the first one listed.
pub fn select_camera<'a>(
    cameras: &'a [CameraDevice],
    remembered_path: Option<&str>,
) -> Option<&'a CameraDevice> {
    cameras
        .iter()
        .find(|c| c.location.is_front())
        .or_else(|| {
            remembered_path.and_then(|path| cameras.iter().find(|c| c.path == path))
        })
        .or_else(|| cameras.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cameras() -> Vec<CameraDevice> {
        vec![
            CameraDevice::new("USB Webcam", "/dev/video2", CameraLocation::External),
            CameraDevice::new("Integrated", "/dev/video0", CameraLocation::Unknown),
        ]
    }

    #[test]
    fn test_select_prefers_front() {
        let mut list = cameras();
        list.push(CameraDevice::new("Selfie", "/dev/video4", CameraLocation::Front));
        let chosen = select_camera(&list, Some("/dev/video0")).unwrap();
        assert_eq!(chosen.name, "Selfie");
    }

    #[test]
    fn test_select_falls_back_to_remembered() {
        let list = cameras();
        let chosen = select_camera(&list, Some("/dev/video0")).unwrap();
        assert_eq!(chosen.name, "Integrated");
    }

    #[test]
    fn test_select_falls_back_to_first() {
        let list = cameras();
        assert_eq!(select_camera(&list, Some("/dev/gone")).unwrap().name, "USB Webcam");
        assert_eq!(select_camera(&list, None).unwrap().name, "USB Webcam");
    }

    #[test]
    fn test_select_empty() {
        assert!(select_camera(&[], None).is_none());
    }
}
