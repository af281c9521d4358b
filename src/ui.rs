/*
 * UI Module
 *
 * This module contains the parameter panel built with nannou_egui and the
 * stats overlay drawn in the top-left corner. Every panel field maps to a
 * RenderParams field; the caller rebuilds the scene when anything changed.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::RenderParams;

// Update the panel and return whether any parameter changed this frame
pub fn update_ui(egui: &mut Egui, params: &mut RenderParams) -> bool {
    let snapshot = params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Controls")
        .default_pos([10.0, 90.0])
        .show(&ctx, |ui| {
            // Slider has no step option, so values are snapped after each edit
            if ui
                .add(
                    egui::Slider::new(&mut params.size, RenderParams::get_size_range())
                        .fixed_decimals(1)
                        .text("size"),
                )
                .changed()
            {
                params.snap_size();
            }
            ui.checkbox(&mut params.transparent, "transparent");
            if ui
                .add(
                    egui::Slider::new(&mut params.opacity, RenderParams::get_opacity_range())
                        .fixed_decimals(2)
                        .text("opacity"),
                )
                .changed()
            {
                params.snap_opacity();
            }
            ui.horizontal(|ui| {
                ui.color_edit_button_srgb(&mut params.color);
                ui.label("color");
            });
            ui.checkbox(&mut params.size_attenuation, "sizeAttenuation");
        });

    params.detect_changes(&snapshot)
}

// Lines shown in the stats overlay
pub fn stats_lines(debug_info: &DebugInfo) -> Vec<String> {
    let range = match (debug_info.min_fps, debug_info.max_fps) {
        (Some(min), Some(max)) => format!("{:.0}-{:.0}", min, max),
        _ => "--".to_string(),
    };
    vec![
        format!("{:.0} FPS ({})", debug_info.fps, range),
        format!("Frame time: {:.2} ms", debug_info.frame_time_ms()),
        format!("Particles: {}", debug_info.particles),
    ]
}

// Draw the frame-rate overlay anchored to the top-left corner
pub fn draw_stats(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 10.0;
    let line_height = 18.0;
    let panel_width = 170.0;
    let lines = stats_lines(debug_info);
    let panel_height = line_height * lines.len() as f32 + margin;

    draw.rect()
        .x_y(window_rect.left() + panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.13, 0.8));

    let text_top = window_rect.top() - margin;
    for (i, text) in lines.iter().enumerate() {
        let y = text_top - (i as f32 * line_height);
        draw.text(text)
            .x_y(window_rect.left() + panel_width / 2.0, y)
            .w(panel_width - margin * 2.0)
            .left_justify()
            .color(nannou::color::rgb(0.0, 1.0, 1.0))
            .font_size(12);
    }
}
