/*
 * Render Parameters Module
 *
 * This module defines the RenderParams struct holding the material settings
 * shared by every particle batch. The values are edited through the UI and
 * any edit rebuilds all batches from scratch, so change detection only has
 * to answer "did anything change this frame".
 */

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

// Parameters for drawing the point clouds that can be adjusted via UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub size: f32,
    pub transparent: bool,
    pub opacity: f32,
    pub color: [u8; 3],
    pub size_attenuation: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: 10.0,
            transparent: true,
            opacity: 0.6,
            color: [0xff, 0xff, 0xff],
            size_attenuation: true,
        }
    }
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSnapshot(RenderParams);

impl RenderParams {
    pub const SIZE_STEP: f32 = 0.1;
    pub const OPACITY_STEP: f32 = 0.05;

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&self) -> ParamSnapshot {
        ParamSnapshot(self.clone())
    }

    // Check if any parameter has changed since the snapshot was taken
    pub fn detect_changes(&self, snapshot: &ParamSnapshot) -> bool {
        *self != snapshot.0
    }

    // Round slider values onto their step grid, staying inside the slider range
    pub fn snap_size(&mut self) {
        self.size = snap_to_step(self.size, Self::SIZE_STEP, Self::get_size_range());
    }

    pub fn snap_opacity(&mut self) {
        self.opacity = snap_to_step(self.opacity, Self::OPACITY_STEP, Self::get_opacity_range());
    }

    // Build from a packed 0xRRGGBB color
    pub fn with_hex_color(mut self, hex: u32) -> Self {
        self.color = [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8];
        self
    }

    pub fn hex_color(&self) -> u32 {
        let [r, g, b] = self.color;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    // Get parameter ranges for UI sliders
    pub fn get_size_range() -> RangeInclusive<f32> {
        0.1..=20.0
    }

    pub fn get_opacity_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }
}

// Round to the nearest multiple of `step` and clamp into `range`
pub fn snap_to_step(value: f32, step: f32, range: RangeInclusive<f32>) -> f32 {
    ((value / step).round() * step).clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sketch() {
        let params = RenderParams::default();
        assert_eq!(params.size, 10.0);
        assert!(params.transparent);
        assert_eq!(params.opacity, 0.6);
        assert_eq!(params.hex_color(), 0xffffff);
        assert!(params.size_attenuation);
    }

    #[test]
    fn snapshot_detects_any_field_edit() {
        let mut params = RenderParams::default();
        let snapshot = params.take_snapshot();
        assert!(!params.detect_changes(&snapshot));

        params.size_attenuation = false;
        assert!(params.detect_changes(&snapshot));

        let snapshot = params.take_snapshot();
        params.color[1] = 0x80;
        assert!(params.detect_changes(&snapshot));
    }

    #[test]
    fn slider_values_snap_to_steps() {
        let mut params = RenderParams {
            size: 7.34,
            opacity: 0.62,
            ..RenderParams::default()
        };
        params.snap_size();
        params.snap_opacity();
        assert!((params.size - 7.3).abs() < 1e-5);
        assert!((params.opacity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn snapping_is_stable_and_stays_in_range() {
        let once = snap_to_step(13.37, 0.1, RenderParams::get_size_range());
        assert_eq!(snap_to_step(once, 0.1, RenderParams::get_size_range()), once);

        assert_eq!(snap_to_step(0.01, 0.1, RenderParams::get_size_range()), 0.1);
        assert_eq!(snap_to_step(1.04, 0.05, RenderParams::get_opacity_range()), 1.0);
    }

    #[test]
    fn default_values_already_on_grid() {
        let mut params = RenderParams::default();
        let snapshot = params.take_snapshot();
        params.snap_size();
        params.snap_opacity();
        assert!(!params.detect_changes(&snapshot));
    }

    #[test]
    fn hex_color_packs_and_unpacks() {
        let params = RenderParams::default().with_hex_color(0x12ab9f);
        assert_eq!(params.color, [0x12, 0xab, 0x9f]);
        assert_eq!(params.hex_color(), 0x12ab9f);
    }
}
