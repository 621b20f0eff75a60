//! Demo scene spawning and player rig movement.
use avian3d::prelude::*;
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::Plane3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    chest::components::LidHinge,
    core::settings::InteractionSettings,
    kicker::components::BallKicker,
    physics::components::{layer_mask, HoldPoint, PropTag},
    player::components::{Player, PlayerInteraction, PlayerLook, PlayerView},
};

const GROUND_SIZE: f32 = 60.0;
const GROUND_THICKNESS: f32 = 0.2;
const PLAYER_START: Vec3 = Vec3::new(0.0, 1.0, 6.0);
const EYE_HEIGHT: f32 = 0.6;
const HOLD_OFFSET: Vec3 = Vec3::new(0.4, -0.35, -0.9);
const BALL_RADIUS: f32 = 0.25;
const PROP_LAYER: u32 = 1;
const PITCH_LIMIT: f32 = 1.54;

/// Spawns ground, light, the player rig, a chest, balls, a sword, and crates.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<InteractionSettings>,
) {
    let ground = settings.physics.ground_height;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_xyz(0.0, ground, 0.0),
    ));
    // Slab whose top face is flush with the visible plane.
    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(GROUND_SIZE, GROUND_THICKNESS, GROUND_SIZE),
        Transform::from_xyz(0.0, ground - GROUND_THICKNESS * 0.5, 0.0),
        Name::new("Ground"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 15_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_player_rig(&mut commands, &settings);
    spawn_chest(&mut commands, &mut meshes, &mut materials, &settings);

    let physics = &settings.physics;
    let prop_layers = CollisionLayers::new(layer_mask([PROP_LAYER]), LayerMask::ALL);
    let ball_mesh = meshes.add(Sphere::new(BALL_RADIUS));
    let ball_material = materials.add(Color::srgb(0.95, 0.95, 0.9));
    for (index, x) in [-2.0_f32, 0.0, 2.0].into_iter().enumerate() {
        commands.spawn((
            Mesh3d(ball_mesh.clone()),
            MeshMaterial3d(ball_material.clone()),
            Transform::from_xyz(x, ground + BALL_RADIUS, 3.0),
            RigidBody::Dynamic,
            Collider::sphere(BALL_RADIUS),
            Mass(0.45),
            Restitution::new(physics.restitution),
            LinearDamping(physics.linear_damping),
            PropTag::Ball,
            prop_layers,
            Name::new(format!("Ball {}", index + 1)),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.08, 1.0, 0.08))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.78, 0.82),
            metallic: 0.8,
            perceptual_roughness: 0.3,
            ..default()
        })),
        Transform::from_xyz(-3.0, ground + 0.5, 3.5),
        RigidBody::Dynamic,
        // Wider than the blade so the pickup ray can find it.
        Collider::cuboid(0.2, 1.0, 0.2),
        Mass(1.5),
        PropTag::PickUp,
        prop_layers,
        Name::new("Sword"),
    ));

    let crate_mesh = meshes.add(Cuboid::new(0.8, 0.8, 0.8));
    let crate_material = materials.add(Color::srgb_u8(150, 105, 60));
    for (index, x) in [-4.0_f32, -2.5].into_iter().enumerate() {
        commands.spawn((
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_xyz(x, ground + 0.4, 0.0),
            RigidBody::Dynamic,
            Collider::cuboid(0.8, 0.8, 0.8),
            Mass(4.0),
            LinearDamping(physics.linear_damping),
            PropTag::Attackable,
            Name::new(format!("Crate {}", index + 1)),
        ));
    }
}

fn spawn_player_rig(commands: &mut Commands, settings: &InteractionSettings) {
    let player = commands
        .spawn((
            Transform::from_translation(PLAYER_START),
            Visibility::default(),
            Player,
            PlayerInteraction::default(),
            PlayerLook::new(0.0, 0.0),
            Name::new("Player"),
        ))
        .id();

    let view = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
            Visibility::default(),
            PlayerView,
            ChildOf(player),
        ))
        .id();

    commands.spawn((
        Transform::from_translation(HOLD_OFFSET),
        Visibility::default(),
        HoldPoint,
        ChildOf(view),
    ));

    commands.entity(player).insert(
        BallKicker::new(settings.kicker.params, settings.kicker.kick_key).with_view(view),
    );
}

fn spawn_chest(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    settings: &InteractionSettings,
) {
    let wood = materials.add(Color::srgb_u8(120, 80, 45));

    let chest = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.2, 0.6, 0.8))),
            MeshMaterial3d(wood.clone()),
            Transform::from_xyz(3.0, settings.physics.ground_height + 0.3, 0.0),
            RigidBody::Static,
            Collider::cuboid(1.2, 0.6, 0.8),
            Name::new("Chest"),
        ))
        .id();

    // The pivot sits on the back top edge so the lid swings up around it.
    let pivot = Transform::from_xyz(0.0, 0.3, 0.4);
    let lid = settings.chest.clone();
    commands
        .spawn((
            pivot,
            Visibility::default(),
            LidHinge::new(pivot.rotation, lid.open_angle, lid.speed, lid.toggle_key),
            Name::new("Chest Lid"),
            ChildOf(chest),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.25, 0.12, 0.85))),
                MeshMaterial3d(wood),
                Transform::from_xyz(0.0, 0.06, -0.425),
            ));
        });
}

/// Toggles cursor grab while the right mouse button is held for looking.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Yaws the player body and pitches the eye camera while the right mouse button is held.
pub fn player_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut players: Query<(&mut PlayerLook, &mut Transform), With<Player>>,
    mut views: Query<&mut Transform, (With<PlayerView>, Without<Player>)>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if !mouse_buttons.pressed(MouseButton::Right) || cumulative_delta == Vec2::ZERO {
        return;
    }

    let Ok((mut look, mut body)) = players.single_mut() else {
        return;
    };
    look.yaw -= cumulative_delta.x * look.look_sensitivity * time.delta_secs();
    look.pitch -= cumulative_delta.y * look.look_sensitivity * time.delta_secs();
    look.pitch = look.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

    body.rotation = Quat::from_axis_angle(Vec3::Y, look.yaw);
    if let Ok(mut view) = views.single_mut() {
        view.rotation = Quat::from_axis_angle(Vec3::X, look.pitch);
    }
}

/// Walks the player on the ground plane with WASD (Ctrl to sprint).
pub fn player_walk(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut players: Query<(&PlayerLook, &mut Transform), With<Player>>,
) {
    let Ok((look, mut transform)) = players.single_mut() else {
        return;
    };

    let forward = {
        let f = transform.forward().as_vec3();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    };
    let right = {
        let r = transform.right().as_vec3();
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    };

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }

    if direction.length_squared() > 0.0 {
        let modifier = if keyboard.pressed(KeyCode::ControlLeft) {
            2.0
        } else {
            1.0
        };
        transform.translation +=
            direction.normalize() * look.move_speed * modifier * time.delta_secs();
    }
}
