use bevy::prelude::*;
use terrain::{GenerationState, RebuildTerrain, TerrainSessionRes};
use ui::ProgressReadout;

use crate::game::camera::UiInputCaptureRes;

pub const REBUILD_KEY: KeyCode = KeyCode::KeyR;

pub(crate) fn setup_readout(mut readout: ResMut<ProgressReadout>) {
    readout.rebuild_key = Some(REBUILD_KEY);
}

pub(crate) fn request_rebuild_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    ui_capture: Res<UiInputCaptureRes>,
    mut rebuild: MessageWriter<RebuildTerrain>,
) {
    if ui_capture.keyboard {
        return;
    }
    if keys.just_pressed(REBUILD_KEY) {
        rebuild.write(RebuildTerrain);
    }
}

pub(crate) fn sync_progress_readout(
    session: Res<TerrainSessionRes>,
    mut readout: ResMut<ProgressReadout>,
) {
    let (fraction, status) = match session.0.state() {
        GenerationState::Idle => (None, ""),
        GenerationState::Running { .. } => (Some(session.0.progress()), "Generating terrain"),
        GenerationState::Complete => (Some(1.0), "Terrain ready"),
    };

    // Only touch the resource when something changed so change detection stays quiet.
    if readout.fraction != fraction || readout.status != status {
        readout.fraction = fraction;
        readout.status = status.to_string();
    }
}
