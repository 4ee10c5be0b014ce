use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use terrain::TerrainConfig;

#[derive(Resource, Default, Clone, Copy, Debug)]
pub(crate) struct UiInputCaptureRes {
    /// True when egui wants to consume mouse/pointer input.
    pub(crate) pointer: bool,
    /// True when egui wants to consume keyboard input.
    pub(crate) keyboard: bool,
}

pub(crate) fn update_ui_input_capture(
    mut contexts: EguiContexts,
    mut capture: ResMut<UiInputCaptureRes>,
) {
    // Without an egui context nothing can claim input.
    *capture = contexts
        .ctx_mut()
        .map(|ctx| UiInputCaptureRes {
            pointer: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
            keyboard: ctx.wants_keyboard_input(),
        })
        .unwrap_or_default();
}

#[derive(Component)]
pub struct OrbitCamera;

#[derive(Resource, Clone)]
pub struct OrbitCameraSettings {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCameraSettings {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.8,
            pitch: 0.9,
            distance: 80.0,
            min_distance: 5.0,
            max_distance: 1_000.0,
            rotate_speed: 1.8,
            zoom_speed: 0.12,
        }
    }
}

impl OrbitCameraSettings {
    /// Centers the orbit on the terrain footprint, far enough back to see all of it.
    pub fn framing(config: &TerrainConfig) -> Self {
        let extent = config.width.max(config.depth) as f32;
        let defaults = Self::default();
        Self {
            focus: config.center(),
            distance: (extent * 1.4).clamp(defaults.min_distance, defaults.max_distance),
            ..defaults
        }
    }
}

/// Camera orbiting the terrain, plus a sun angled so relief casts visible shading.
pub fn setup_viewer(mut commands: Commands, settings: Res<OrbitCameraSettings>) {
    commands.spawn((
        OrbitCamera,
        Camera3d::default(),
        Transform::from_translation(settings.focus + Vec3::new(0.0, settings.distance, 0.0))
            .looking_at(settings.focus, Vec3::Z),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 15_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-1.0, 2.0, -0.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub(crate) fn orbit_camera_input(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut settings: ResMut<OrbitCameraSettings>,
    ui_capture: Res<UiInputCaptureRes>,
) {
    if !ui_capture.keyboard {
        if keys.pressed(KeyCode::KeyQ) {
            settings.yaw += settings.rotate_speed * time.delta_secs();
        }
        if keys.pressed(KeyCode::KeyE) {
            settings.yaw -= settings.rotate_speed * time.delta_secs();
        }
    }

    let mut scroll: f32 = 0.0;
    for ev in mouse_wheel.read() {
        scroll += ev.y;
    }
    if !ui_capture.pointer && scroll.abs() > 0.0 {
        let factor = (1.0 - scroll * settings.zoom_speed).clamp(0.2, 5.0);
        settings.distance =
            (settings.distance * factor).clamp(settings.min_distance, settings.max_distance);
    }
}

pub fn update_orbit_camera(
    settings: Res<OrbitCameraSettings>,
    mut q_cam: Query<&mut Transform, With<OrbitCamera>>,
) {
    let mut cam = match q_cam.single_mut() {
        Ok(c) => c,
        Err(_) => return,
    };

    let rot = Quat::from_euler(EulerRot::YXZ, settings.yaw, settings.pitch, 0.0);
    let offset = rot * Vec3::new(0.0, 0.0, -settings.distance);
    cam.translation = settings.focus + offset;
    cam.look_at(settings.focus, Vec3::Y);
}
