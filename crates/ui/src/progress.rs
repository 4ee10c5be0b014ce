use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// What the overlay shows. Written by whoever owns the generation state.
#[derive(Resource, Debug, Default)]
pub struct ProgressReadout {
    /// `None` hides the percentage line.
    pub fraction: Option<f32>,
    pub status: String,
    pub rebuild_key: Option<KeyCode>,
}

pub fn format_progress(fraction: f32) -> String {
    let percent = if fraction.is_nan() {
        0.0
    } else {
        (fraction * 100.0).clamp(0.0, 100.0)
    };
    format!("{:.0}%", percent)
}

/// Short label for a key: `KeyR` becomes `R`, `Digit3` becomes `3`.
pub fn format_key(key: KeyCode) -> String {
    let name = format!("{key:?}");
    ["Key", "Digit"]
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .map_or_else(|| name.clone(), str::to_string)
}

pub fn progress_overlay_system(mut contexts: EguiContexts, readout: Res<ProgressReadout>) {
    let ctx = match contexts.ctx_mut() {
        Ok(ctx) => ctx,
        Err(_) => return,
    };

    let margin = 10.0;
    let info_width = 220.0;

    egui::Area::new("terrain_progress".into())
        .fixed_pos(egui::pos2(margin, margin))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(35, 35, 35))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 90, 90)))
                .corner_radius(6)
                .show(ui, |ui| {
                    ui.set_min_width(info_width);

                    if !readout.status.is_empty() {
                        ui.label(&readout.status);
                    }
                    if let Some(fraction) = readout.fraction {
                        ui.label(format!("Progress: {}", format_progress(fraction)));
                        ui.add(egui::ProgressBar::new(fraction.clamp(0.0, 1.0)));
                    }
                    if let Some(key) = readout.rebuild_key {
                        ui.label(format!("{}: Rebuild terrain", format_key(key)));
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_a_rounded_percentage() {
        assert_eq!(format_progress(0.0), "0%");
        assert_eq!(format_progress(0.424), "42%");
        assert_eq!(format_progress(1.0), "100%");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(format_progress(-0.5), "0%");
        assert_eq!(format_progress(3.0), "100%");
        assert_eq!(format_progress(f32::NAN), "0%");
    }

    #[test]
    fn keys_drop_their_prefix() {
        assert_eq!(format_key(KeyCode::KeyR), "R");
        assert_eq!(format_key(KeyCode::Digit3), "3");
        assert_eq!(format_key(KeyCode::Space), "Space");
    }
}
