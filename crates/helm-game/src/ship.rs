// Piloted Ship Bundle
// Rigid body plus the full flight controller component set.

use avian3d::prelude::*;
use bevy::prelude::*;
use helm_core::FlightTuning;
use serde::{Deserialize, Serialize};

use crate::components::{FlightController, FlightControllerBundle};

#[derive(Bundle, Debug, Clone)]
pub struct ShipBundle {
    pub name: Name,
    pub transform: Transform,

    // Physical properties
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub mass: Mass,
    pub linear_damping: LinearDamping,
    pub angular_damping: AngularDamping,

    pub controller: FlightControllerBundle,
}

/// Configuration for spawning a ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipSpawnConfig {
    /// Display name (defaults to "Skiff" if None)
    pub display_name: Option<String>,
    pub position: Vec3,
    pub mass_kg: f32,
    /// Hull box size in meters (width, height, length).
    pub hull_size_m: Vec3,
    pub tuning: FlightTuning,
}

impl Default for ShipSpawnConfig {
    fn default() -> Self {
        Self {
            display_name: None,
            position: Vec3::ZERO,
            mass_kg: 1.0,
            hull_size_m: Vec3::new(1.0, 0.5, 2.0),
            tuning: FlightTuning::default(),
        }
    }
}

impl ShipBundle {
    pub fn new(config: &ShipSpawnConfig) -> Self {
        Self {
            name: Name::new(
                config
                    .display_name
                    .clone()
                    .unwrap_or_else(|| "Skiff".to_string()),
            ),
            transform: Transform::from_translation(config.position),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::cuboid(
                config.hull_size_m.x,
                config.hull_size_m.y,
                config.hull_size_m.z,
            ),
            mass: Mass(config.mass_kg.max(f32::EPSILON)),
            // Flight assist is the only drag.
            linear_damping: LinearDamping(0.0),
            angular_damping: AngularDamping(0.0),
            controller: FlightControllerBundle::new(config.tuning),
        }
    }
}

/// Spawns a ship steered by the local pilot.
pub fn spawn_piloted_ship(commands: &mut Commands, config: &ShipSpawnConfig) -> Entity {
    commands
        .spawn((ShipBundle::new(config), FlightController))
        .id()
}
