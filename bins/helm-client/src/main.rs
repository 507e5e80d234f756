use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use avian3d::collision::CollisionDiagnostics;
use avian3d::dynamics::solver::SolverDiagnostics;
use avian3d::picking::PhysicsPickingDiagnostics;
use avian3d::prelude::*;
use avian3d::spatial_query::SpatialQueryDiagnostics;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{Backends, RenderCreation, WgpuSettings};
use bevy::scene::ScenePlugin;
use helm_core::FlightTuning;
use helm_game::{
    FlightController, FlightTelemetry, HelmFlightPlugin, ShipSpawnConfig, spawn_piloted_ship,
};

/// Tuning the local ship is spawned with.
#[derive(Debug, Resource, Clone, Copy)]
struct ClientTuning(FlightTuning);

#[derive(Component)]
struct HudText;

fn main() {
    let headless = std::env::var("HELM_CLIENT_HEADLESS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let tuning = match load_tuning(|key| std::env::var(key).ok()) {
        Ok(tuning) => tuning,
        Err(err) => {
            eprintln!("invalid flight tuning: {err:#}");
            std::process::exit(2);
        }
    };

    let mut app = App::new();
    if headless {
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::log::LogPlugin::default());
        add_headless_support(&mut app);
    } else {
        app.add_plugins(DefaultPlugins.set(RenderPlugin {
            render_creation: RenderCreation::Automatic(WgpuSettings {
                backends: Some(preferred_backends()),
                ..Default::default()
            }),
            ..Default::default()
        }));
    }
    configure_flight(&mut app, tuning, headless);
    app.run();
}

/// What `DefaultPlugins` would otherwise provide for avian's collider and
/// diagnostics systems.
fn add_headless_support(app: &mut App) {
    app.add_plugins(AssetPlugin::default());
    app.add_plugins(ScenePlugin);
    app.add_message::<bevy::asset::AssetEvent<Mesh>>();
    app.init_asset::<Mesh>();
    app.insert_resource(CollisionDiagnostics::default());
    app.insert_resource(SolverDiagnostics::default());
    app.insert_resource(SpatialQueryDiagnostics::default());
    app.insert_resource(PhysicsPickingDiagnostics::default());
}

fn configure_flight(app: &mut App, tuning: FlightTuning, headless: bool) {
    app.add_plugins(PhysicsPlugins::default().with_length_unit(1.0));
    app.insert_resource(Gravity(Vec3::ZERO)); // No gravity in space
    app.add_plugins(HelmFlightPlugin);
    app.insert_resource(ClientTuning(tuning));
    app.add_systems(Startup, spawn_local_ship);

    if headless {
        app.add_systems(Update, log_telemetry_system);
        app.add_systems(Startup, || {
            info!("helm-client headless mode");
        });
    } else {
        app.add_systems(Startup, spawn_world_scene.after(spawn_local_ship));
        app.add_systems(Update, update_hud_system);
    }
}

/// Defaults, then the JSON file named by `HELM_TUNING_FILE`, then `HELM_*` overrides.
fn load_tuning<F>(lookup: F) -> anyhow::Result<FlightTuning>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match lookup("HELM_TUNING_FILE").filter(|path| !path.trim().is_empty()) {
        Some(path) => read_tuning_file(Path::new(path.trim()))?,
        None => FlightTuning::default(),
    };
    base.overlay(lookup).context("applying HELM_* overrides")
}

fn read_tuning_file(path: &Path) -> anyhow::Result<FlightTuning> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    FlightTuning::from_json_str(&raw)
        .with_context(|| format!("parsing tuning file {}", path.display()))
}

fn spawn_local_ship(mut commands: Commands<'_, '_>, tuning: Res<'_, ClientTuning>) {
    let config = ShipSpawnConfig {
        display_name: Some("Helm Skiff".to_string()),
        tuning: tuning.0,
        ..Default::default()
    };
    let ship = spawn_piloted_ship(&mut commands, &config);
    match serde_json::to_string(&tuning.0) {
        Ok(json) => info!(entity = ?ship, tuning = %json, "spawned piloted ship"),
        Err(err) => warn!(entity = ?ship, "spawned piloted ship; tuning not serializable: {err}"),
    }
}

fn spawn_world_scene(
    mut commands: Commands<'_, '_>,
    mut meshes: ResMut<'_, Assets<Mesh>>,
    mut materials: ResMut<'_, Assets<StandardMaterial>>,
    ships: Query<'_, '_, Entity, With<FlightController>>,
) {
    let hull = ShipSpawnConfig::default().hull_size_m;
    let hull_mesh = meshes.add(Cuboid::new(hull.x, hull.y, hull.z));
    let hull_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.6, 0.7),
        ..default()
    });

    for ship in &ships {
        commands
            .entity(ship)
            .insert((Mesh3d(hull_mesh.clone()), MeshMaterial3d(hull_material.clone())))
            .with_children(|parent| {
                // Chase camera
                parent.spawn((
                    Camera3d::default(),
                    Transform::from_xyz(0.0, 1.5, 6.0).looking_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y),
                ));
            });
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 30.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    // Reference markers so motion is visible against an empty sky.
    let marker_mesh = meshes.add(Sphere::new(0.3));
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.8, 0.4),
        emissive: LinearRgba::rgb(0.6, 0.5, 0.2),
        ..default()
    });
    for x in -4..=4 {
        for z in -4..=4 {
            commands.spawn((
                Mesh3d(marker_mesh.clone()),
                MeshMaterial3d(marker_material.clone()),
                Transform::from_xyz(x as f32 * 20.0, -5.0, z as f32 * 20.0),
            ));
        }
    }

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: px(12),
            top: px(12),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.95, 0.9)),
        HudText,
    ));
}

fn update_hud_system(
    ship_query: Query<'_, '_, (&Transform, &FlightTelemetry), With<FlightController>>,
    mut hud_query: Query<'_, '_, &mut Text, With<HudText>>,
) {
    let Ok((transform, telemetry)) = ship_query.single() else {
        return;
    };
    let Ok(mut text) = hud_query.single_mut() else {
        return;
    };
    hud_text(transform.translation, telemetry).clone_into(&mut **text);
}

fn log_telemetry_system(
    time: Res<'_, Time>,
    mut timer: Local<'_, Option<Timer>>,
    ship_query: Query<'_, '_, &FlightTelemetry, With<FlightController>>,
) {
    let timer =
        timer.get_or_insert_with(|| Timer::new(Duration::from_secs(1), TimerMode::Repeating));
    if !timer.tick(time.delta()).just_finished() {
        return;
    }
    for telemetry in &ship_query {
        info!(
            throttle = telemetry.throttle,
            speed_mps = telemetry.speed_mps,
            flight_assist = telemetry.flight_assist,
            impulse_ready = telemetry.impulse_ready,
            "flight telemetry"
        );
    }
}

fn hud_text(position: Vec3, telemetry: &FlightTelemetry) -> String {
    let impulse = match (telemetry.impulse_mode, telemetry.impulse_ready) {
        (false, _) => "off",
        (true, true) => "ready",
        (true, false) => "cooling",
    };
    format!(
        "HELM\nCoords: [{:.2}, {:.2}, {:.2}] | speed {:.2} m/s\nPitch {:+.2}  Yaw {:+.2}  Roll {:+.2}\nThrust [{:+.2}, {:+.2}, {:+.2}] | throttle {:.2}\nFlight assist: {} | impulse: {}\nControls: mouse steer, W/S/A/D thrust, Space/Shift vertical, Q/E roll, +/- throttle, CapsLock assist",
        position.x,
        position.y,
        position.z,
        telemetry.speed_mps,
        telemetry.pitch,
        telemetry.yaw,
        telemetry.roll,
        telemetry.thrust.x,
        telemetry.thrust.y,
        telemetry.thrust.z,
        telemetry.throttle,
        if telemetry.flight_assist { "on" } else { "off" },
        impulse,
    )
}

fn preferred_backends() -> Backends {
    Backends::VULKAN | Backends::GL
}
