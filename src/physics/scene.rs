//! [`PhysicsBackend`] over avian's spatial queries and the live ECS hierarchy.
use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::math::Ray3d;
use bevy::prelude::*;

use super::{
    backend::{OverlapHit, PhysicsBackend, RayHit},
    components::{HoldPoint, PropTag},
};

type PropData = (
    &'static mut Transform,
    &'static GlobalTransform,
    &'static PropTag,
    Option<&'static RigidBody>,
    Option<&'static mut LinearVelocity>,
    Option<&'static Mass>,
    Option<&'static Name>,
);

fn can_move(body: Option<&RigidBody>) -> bool {
    body.is_some_and(|body| !body.is_static())
}

/// Tagged props and the hold point, mutated for pickup, release, and impulses.
///
/// Body-type switches and reparenting go through `Commands` and land at the end of
/// the system. Impulses write `LinearVelocity` straight away, so a prop released
/// earlier in the same system still receives one.
#[derive(SystemParam)]
pub struct SceneBodies<'w, 's> {
    commands: Commands<'w, 's>,
    props: Query<'w, 's, PropData>,
    hold_points: Query<'w, 's, Entity, With<HoldPoint>>,
}

impl SceneBodies<'_, '_> {
    pub fn set_carried(&mut self, body: Entity, carried: bool) {
        if !self.props.contains(body) {
            return;
        }
        let mut entity = self.commands.entity(body);
        if carried {
            entity.insert((
                RigidBody::Kinematic,
                GravityScale(0.0),
                LinearVelocity::ZERO,
                AngularVelocity::ZERO,
                ColliderDisabled,
            ));
        } else {
            entity
                .insert((RigidBody::Dynamic, GravityScale(1.0)))
                .remove::<ColliderDisabled>();
        }
    }

    pub fn apply_impulse(&mut self, body: Entity, impulse: Vec3) {
        let Ok((_, _, _, rigid_body, Some(mut velocity), mass, _)) = self.props.get_mut(body)
        else {
            return;
        };
        if rigid_body.is_some_and(|rigid_body| rigid_body.is_static()) {
            return;
        }
        let mass = mass.map_or(1.0, |mass| mass.0).max(f32::EPSILON);
        velocity.0 += impulse / mass;
    }

    pub fn attach(&mut self, body: Entity) -> bool {
        let Some(hold_point) = self.hold_points.iter().next() else {
            return false;
        };
        let Ok((mut transform, ..)) = self.props.get_mut(body) else {
            return false;
        };
        transform.translation = Vec3::ZERO;
        transform.rotation = Quat::IDENTITY;
        self.commands.entity(body).insert(ChildOf(hold_point));
        true
    }

    pub fn detach(&mut self, body: Entity) {
        if let Ok((mut transform, global, ..)) = self.props.get_mut(body) {
            *transform = global.compute_transform();
        }
        self.commands.entity(body).remove::<ChildOf>();
    }

    pub fn local_rotation(&self, body: Entity) -> Option<Quat> {
        self.props
            .get(body)
            .ok()
            .map(|(transform, ..)| transform.rotation)
    }

    pub fn set_local_rotation(&mut self, body: Entity, rotation: Quat) {
        if let Ok((mut transform, ..)) = self.props.get_mut(body) {
            transform.rotation = rotation;
        }
    }
}

/// Ray and overlap queries through avian's [`SpatialQuery`], body mutation through [`SceneBodies`].
///
/// Colliders of carried props are excluded from every query.
#[derive(SystemParam)]
pub struct ScenePhysics<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    bodies: SceneBodies<'w, 's>,
    placements: Query<'w, 's, &'static GlobalTransform>,
    carried: Query<'w, 's, Entity, With<ColliderDisabled>>,
}

impl ScenePhysics<'_, '_> {
    fn query_filter(&self, mask: LayerMask) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(mask).with_excluded_entities(self.carried.iter())
    }
}

impl PhysicsBackend for ScenePhysics<'_, '_> {
    type Body = Entity;

    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<OverlapHit<Entity>> {
        let shape = Collider::sphere(radius);
        self.spatial
            .shape_intersections(&shape, center, Quat::IDENTITY, &self.query_filter(LayerMask::ALL))
            .into_iter()
            .filter_map(|entity| {
                let position = self.placements.get(entity).ok()?.translation();
                let (tag, has_body) = match self.bodies.props.get(entity) {
                    Ok((_, _, tag, rigid_body, ..)) => (Some(*tag), can_move(rigid_body)),
                    Err(_) => (None, false),
                };
                Some(OverlapHit {
                    body: entity,
                    tag,
                    position,
                    has_body,
                })
            })
            .collect()
    }

    fn raycast(&self, ray: Ray3d, max_distance: f32, filter: LayerMask) -> Option<RayHit<Entity>> {
        let hit = self.spatial.cast_ray(
            ray.origin,
            ray.direction,
            max_distance,
            true,
            &self.query_filter(filter),
        )?;

        let (tag, has_body, name) = match self.bodies.props.get(hit.entity) {
            Ok((_, _, tag, rigid_body, _, _, name)) => (
                Some(*tag),
                can_move(rigid_body),
                name.map(|name| name.as_str().to_string()),
            ),
            Err(_) => (None, false, None),
        };
        Some(RayHit {
            body: hit.entity,
            tag,
            distance: hit.distance,
            has_body,
            name,
        })
    }

    fn set_carried(&mut self, body: Entity, carried: bool) {
        self.bodies.set_carried(body, carried);
    }

    fn apply_impulse(&mut self, body: Entity, impulse: Vec3) {
        self.bodies.apply_impulse(body, impulse);
    }

    fn attach(&mut self, body: Entity) -> bool {
        self.bodies.attach(body)
    }

    fn detach(&mut self, body: Entity) {
        self.bodies.detach(body);
    }

    fn local_rotation(&self, body: Entity) -> Option<Quat> {
        self.bodies.local_rotation(body)
    }

    fn set_local_rotation(&mut self, body: Entity, rotation: Quat) {
        self.bodies.set_local_rotation(body, rotation);
    }
}
