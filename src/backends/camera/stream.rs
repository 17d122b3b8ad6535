// SPDX-License-Identifier: GPL-3.0-only

//! Preview stream on a dedicated capture thread
//!
//! The thread opens the V4L2 node, negotiates a format, and keeps the most
//! recent decoded frame in a shared slot. The first decoded frame produces
//! [`CameraEvent::Ready`]; failing to open or stream the device produces
//! [`CameraEvent::MountError`].

use super::convert::to_rgb;
use super::device::preferred_format;
use super::format::select_frame_size;
use super::types::{CameraEvent, PreviewFrame};
use crate::constants::{AspectRatio, CAPTURE_BUFFER_COUNT};
use futures::channel::mpsc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;

/// Camera event sender type
pub type CameraEventSender = mpsc::Sender<CameraEvent>;

/// Camera event receiver type
pub type CameraEventReceiver = mpsc::Receiver<CameraEvent>;

type FrameSlot = Arc<Mutex<Option<PreviewFrame>>>;

/// Running preview stream
pub struct PreviewStream {
    device_path: String,
    running: Arc<AtomicBool>,
    latest: FrameSlot,
    thread_handle: Option<std::thread::JoinHandle<()>>,
}

impl PreviewStream {
    /// Spawn the capture thread for `device_path`
    pub fn start(device_path: &str, ratio: Option<AspectRatio>, events: CameraEventSender) -> Self {
        info!(device_path, ratio = ?ratio, "Starting preview stream");

        let running = Arc::new(AtomicBool::new(true));
        let latest: FrameSlot = Arc::new(Mutex::new(None));

        let running_clone = Arc::clone(&running);
        let latest_clone = Arc::clone(&latest);
        let path_clone = device_path.to_string();
        let thread_handle = std::thread::spawn(move || {
            let mut events = events;
            if let Err(e) = capture_loop(
                &path_clone,
                ratio,
                &latest_clone,
                &mut events,
                &running_clone,
            ) {
                error!(device_path = %path_clone, error = %e, "Capture loop failed");
                let _ = events.try_send(CameraEvent::MountError(e));
            }
        });

        Self {
            device_path: device_path.to_string(),
            running,
            latest,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Most recent decoded frame
    pub fn latest_frame(&self) -> Option<PreviewFrame> {
        match self.latest.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stop the capture thread and wait for it
    pub fn stop(mut self) {
        info!(device_path = %self.device_path, "Stopping preview stream");
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.thread_handle.take()
            && handle.join().is_err()
        {
            warn!("Capture thread panicked");
        }
    }
}

impl Drop for PreviewStream {
    fn drop(&mut self) {
        // Don't wait for the thread here; it exits on the next dequeued buffer
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Main capture loop running in a separate thread
fn capture_loop(
    device_path: &str,
    ratio: Option<AspectRatio>,
    latest: &FrameSlot,
    events: &mut CameraEventSender,
    running: &AtomicBool,
) -> Result<(), String> {
    static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

    let mut dev = Device::with_path(device_path)
        .map_err(|e| format!("Failed to open {}: {}", device_path, e))?;

    let (fourcc, sizes) = preferred_format(&dev)
        .map_err(|e| format!("Failed to query formats: {}", e))?
        .ok_or_else(|| format!("{} offers no MJPG, YUYV or RGB3 format", device_path))?;

    let mut format = dev
        .format()
        .map_err(|e| format!("Failed to get format: {}", e))?;
    format.fourcc = fourcc;
    if let Some((width, height)) = select_frame_size(&sizes, ratio) {
        format.width = width;
        format.height = height;
    }

    let format = dev
        .set_format(&format)
        .map_err(|e| format!("Failed to set format: {}", e))?;
    info!(
        width = format.width,
        height = format.height,
        fourcc = ?format.fourcc,
        "Set V4L2 format"
    );

    let mut stream = MmapStream::with_buffers(&mut dev, Type::VideoCapture, CAPTURE_BUFFER_COUNT)
        .map_err(|e| format!("Failed to create buffer stream: {}", e))?;

    let mut announced = false;

    while running.load(Ordering::SeqCst) {
        let (buf, meta) = stream
            .next()
            .map_err(|e| format!("Failed to dequeue buffer: {}", e))?;
        let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

        let used = meta.bytesused as usize;
        let payload = if used > 0 && used <= buf.len() {
            &buf[..used]
        } else {
            buf
        };

        match to_rgb(
            format.fourcc.repr,
            format.width,
            format.height,
            format.stride,
            payload,
        ) {
            Ok((rgb, width, height)) => {
                let frame = PreviewFrame {
                    width,
                    height,
                    data: Arc::from(rgb),
                    sequence: meta.sequence,
                };
                match latest.lock() {
                    Ok(mut slot) => *slot = Some(frame),
                    Err(poisoned) => *poisoned.into_inner() = Some(frame),
                }

                if !announced {
                    announced = true;
                    debug!(frame = frame_num, "First frame decoded");
                    let _ = events.try_send(CameraEvent::Ready);
                }
            }
            Err(e) => {
                // Corrupt MJPEG frames are common right after stream start
                if frame_num % 30 == 0 {
                    warn!(frame = frame_num, error = %e, "Dropping undecodable frame");
                }
            }
        }
    }

    debug!(device_path, "Capture loop exited");
    Ok(())
}
