//! Movement domain: settings loading and player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::Path;

use crate::movement::loader::load_profile;
use crate::movement::{
    GameLayer, MOVEMENT_CONFIG_PATH, MovementController, MovementProfile, MovementSettings, Mover,
    MoverAnimation, MoverSprite, Player, ProbeLayout,
};

const PLAYER_SIZE: Vec2 = Vec2::new(0.9, 1.6);

/// Load the movement profile and derive it against the running physics world.
/// Falls back to the built-in profile when the file is missing or malformed.
pub(crate) fn load_movement_settings(
    mut commands: Commands,
    gravity: Res<Gravity>,
    fixed_time: Res<Time<Fixed>>,
) -> Result {
    let fixed_hz = 1.0 / fixed_time.timestep().as_secs_f32();

    let (profile, source) = match load_profile(Path::new(MOVEMENT_CONFIG_PATH)) {
        Ok(profile) => (profile, MOVEMENT_CONFIG_PATH.to_string()),
        Err(e) => {
            warn!("{}; using built-in movement profile", e);
            (MovementProfile::default(), "built-in".to_string())
        }
    };

    let config = profile.derive(gravity.0.y, fixed_hz)?;

    info!(
        "Movement settings from {}: jump_force={:.2}, gravity_scale={:.2}, dashes={}",
        source, config.jump_force, config.gravity_scale, config.dash_amount
    );

    commands.insert_resource(MovementSettings { config, source });
    Ok(())
}

pub(crate) fn spawn_player(
    mut commands: Commands,
    settings: Res<MovementSettings>,
    existing_player: Query<Entity, With<Player>>,
) -> Result {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return Ok(());
    }

    let controller = MovementController::new(settings.config.clone())?;

    let player = commands
        .spawn((
            // Identity & Movement
            (
                Player,
                Mover::new(controller),
                ProbeLayout::for_body(PLAYER_SIZE),
                MoverAnimation::default(),
            ),
            Transform::from_xyz(0.0, 2.0, 0.0),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(1.0),
                Mass(1.0),
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
            ),
        ))
        .id();

    // Rendering lives on a child so tilt and mirroring never touch the body.
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            MoverSprite {
                owner: player,
                max_tilt: 0.2,
                tilt_speed: 0.2,
                current_tilt: 0.0,
            },
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::default(),
        ));
    });

    info!("Spawning player {:?} from {}", player, settings.source);
    Ok(())
}
