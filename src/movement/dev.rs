//! Movement domain: debug-only test room for tuning the controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

#[derive(Clone, Copy)]
enum Block {
    Ground,
    Wall,
}

fn spawn_block(commands: &mut Commands, kind: Block, center: Vec2, size: Vec2, color: Color) {
    let layer = match kind {
        Block::Ground => GameLayer::Ground,
        Block::Wall => GameLayer::Wall,
    };

    let mut entity = commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Friction::new(0.0),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));

    match kind {
        Block::Ground => entity.insert(Ground),
        Block::Wall => entity.insert(Wall),
    };
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Floor
    spawn_block(
        &mut commands,
        Block::Ground,
        Vec2::new(0.0, -6.0),
        Vec2::new(26.0, 1.0),
        ground_color,
    );

    // Outer walls
    for x in [-13.5, 13.5] {
        spawn_block(
            &mut commands,
            Block::Wall,
            Vec2::new(x, 1.5),
            Vec2::new(1.0, 16.0),
            wall_color,
        );
    }

    // Platforms
    for (center, width) in [
        (Vec2::new(-8.0, -2.0), 4.5),
        (Vec2::new(8.0, 1.0), 4.5),
        (Vec2::new(0.0, 4.5), 4.0),
    ] {
        spawn_block(
            &mut commands,
            Block::Ground,
            center,
            Vec2::new(width, 0.6),
            platform_color,
        );
    }

    // Wall-jump chimney: two pillars close enough to bounce between
    for x in [-3.0, 3.0] {
        spawn_block(
            &mut commands,
            Block::Wall,
            Vec2::new(x, -1.5),
            Vec2::new(0.8, 7.0),
            wall_color,
        );
    }
}
