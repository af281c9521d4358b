/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that feeds the frame-rate
 * overlay: current FPS, frame time and the lowest/highest FPS seen this
 * session.
 */

use std::time::Duration;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub min_fps: Option<f32>,
    pub max_fps: Option<f32>,
    pub particles: usize,
}

impl DebugInfo {
    // Record one frame. Non-positive FPS readings (before the host has a
    // measurement) are shown but kept out of min/max.
    pub fn record_frame(&mut self, fps: f32, frame_time: Duration) {
        self.fps = fps;
        self.frame_time = frame_time;

        if fps > 0.0 && fps.is_finite() {
            self.min_fps = Some(self.min_fps.map_or(fps, |min| min.min(fps)));
            self.max_fps = Some(self.max_fps.map_or(fps, |max| max.max(fps)));
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time.as_secs_f64() * 1000.0
    }
}
