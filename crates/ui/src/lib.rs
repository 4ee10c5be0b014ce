pub mod progress;

pub use progress::{ProgressReadout, format_key, format_progress, progress_overlay_system};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProgressReadout>()
            .add_systems(EguiPrimaryContextPass, progress_overlay_system);
    }
}
