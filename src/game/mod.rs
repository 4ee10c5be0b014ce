pub mod camera;
pub mod input;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::PathBuf;

use terrain as terrain_crate;
use ui as ui_crate;

pub struct GamePlugin {
    pub config_path: PathBuf,
}

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        // DefaultPlugins first so the log subscriber exists while the config loads.
        app.add_plugins(DefaultPlugins)
            .add_plugins(EguiPlugin::default());

        let config = match terrain_crate::TerrainConfig::load_from_ron_file(&self.config_path) {
            Ok(config) => {
                info!("loaded terrain config from {}", self.config_path.display());
                config
            }
            Err(e) => {
                warn!("{e}; using default terrain config");
                terrain_crate::TerrainConfig::default()
            }
        };

        app.insert_resource(camera::OrbitCameraSettings::framing(&config))
            .insert_resource(camera::UiInputCaptureRes::default())
            .add_plugins(terrain_crate::TerrainPlugin { config })
            .add_plugins(ui_crate::UiPlugin)
            .add_systems(
                Startup,
                (camera::setup_viewer, input::setup_readout).chain(),
            )
            .add_systems(
                Update,
                (
                    camera::update_ui_input_capture,
                    camera::orbit_camera_input,
                    camera::update_orbit_camera,
                    input::request_rebuild_on_key,
                    input::sync_progress_readout,
                )
                    .chain(),
            );
    }
}
