// SPDX-License-Identifier: GPL-3.0-only

//! Flash LED control via Linux sysfs
//!
//! Discovers flash LEDs exposed at `/sys/class/leds/*:flash` and drives them
//! in torch mode (brightness file) around a still capture. Webcams rarely
//! have one; when nothing writable is found, flash requests are ignored.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default sysfs LED class directory
pub const SYSFS_LEDS: &str = "/sys/class/leds";

/// A writable flash LED
#[derive(Debug, Clone)]
pub struct FlashLed {
    dir: PathBuf,
    full: u32,
    label: String,
}

impl FlashLed {
    /// Probe one LED class entry; `None` unless it is a usable `*:flash` LED
    fn probe(dir: PathBuf) -> Option<Self> {
        let label = dir.file_name()?.to_str()?.to_string();
        if !label.ends_with(":flash") {
            return None;
        }

        let full = std::fs::read_to_string(dir.join("max_brightness"))
            .ok()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&max| max > 0);
        let Some(full) = full else {
            warn!(led = %label, "Skipping flash LED without usable max_brightness");
            return None;
        };

        // Torch mode needs write access to the brightness attribute
        if let Err(e) = std::fs::OpenOptions::new()
            .write(true)
            .open(dir.join("brightness"))
        {
            warn!(led = %label, error = %e, "Skipping read-only flash LED");
            return None;
        }

        Some(Self { dir, full, label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn write_level(&self, level: u32) -> io::Result<()> {
        std::fs::write(self.dir.join("brightness"), level.min(self.full).to_string())
    }
}

/// All controllable flash LEDs of the machine
#[derive(Debug, Clone, Default)]
pub struct FlashLeds {
    leds: Vec<FlashLed>,
}

impl FlashLeds {
    /// Scan the system LED class directory
    pub fn discover() -> Self {
        Self::discover_in(Path::new(SYSFS_LEDS))
    }

    /// Collect the usable flash LEDs below `class_dir`
    pub fn discover_in(class_dir: &Path) -> Self {
        let entries = match std::fs::read_dir(class_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %class_dir.display(), error = %e, "Flash unavailable");
                return Self::default();
            }
        };

        let mut leds: Vec<FlashLed> = entries
            .flatten()
            .filter_map(|entry| FlashLed::probe(entry.path()))
            .collect();
        leds.sort_by(|a, b| a.label.cmp(&b.label));

        for led in &leds {
            info!(led = %led.label, max = led.full, "Flash LED available");
        }
        Self { leds }
    }

    /// Whether any controllable LED was found
    pub fn is_available(&self) -> bool {
        !self.leds.is_empty()
    }

    /// Light every LED at full brightness
    pub fn all_on(&self) {
        self.set_all(u32::MAX);
    }

    /// Turn every LED off
    pub fn all_off(&self) {
        self.set_all(0);
    }

    fn set_all(&self, level: u32) {
        for led in &self.leds {
            if let Err(e) = led.write_level(level) {
                warn!(led = %led.label, level, error = %e, "Flash LED write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_led(root: &Path, name: &str, max: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("max_brightness"), max).unwrap();
        std::fs::write(dir.join("brightness"), "0").unwrap();
        dir
    }

    #[test]
    fn test_discover_and_toggle() {
        let root = std::env::temp_dir().join(format!("leds-{}", uuid::Uuid::new_v4()));
        let flash = fake_led(&root, "white:flash", "255\n");
        fake_led(&root, "white:torch", "255");
        fake_led(&root, "yellow:flash", "zero");

        let leds = FlashLeds::discover_in(&root);
        assert!(leds.is_available());
        assert_eq!(leds.leds.len(), 1);
        assert_eq!(leds.leds[0].label(), "white:flash");

        leds.all_on();
        assert_eq!(std::fs::read_to_string(flash.join("brightness")).unwrap(), "255");
        leds.all_off();
        assert_eq!(std::fs::read_to_string(flash.join("brightness")).unwrap(), "0");

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_led_dir() {
        let leds = FlashLeds::discover_in(Path::new("/nonexistent/leds"));
        assert!(!leds.is_available());
    }
}
