//! In-memory [`PhysicsBackend`] used by the behaviour tests.
//!
//! Every prop is a sphere. Rays use solid casts, so a ray starting inside a prop
//! hits it at distance zero, the same as avian's `SpatialQuery::cast_ray`.
use avian3d::prelude::LayerMask;
use bevy::math::Ray3d;
use bevy::prelude::*;

use super::{
    backend::{OverlapHit, PhysicsBackend, RayHit},
    components::{layer_mask, PropTag},
};

#[derive(Debug, Clone, PartialEq)]
pub struct MockBody {
    pub mass: f32,
    pub velocity: Vec3,
    pub carried: bool,
}

impl MockBody {
    fn new(mass: f32) -> Self {
        Self {
            mass,
            velocity: Vec3::ZERO,
            carried: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockProp {
    pub id: u32,
    pub tag: Option<PropTag>,
    pub position: Vec3,
    pub radius: f32,
    pub layers: LayerMask,
    pub body: Option<MockBody>,
    pub name: Option<String>,
    pub local_rotation: Quat,
    pub attached: bool,
}

impl MockProp {
    pub fn new(id: u32, tag: PropTag, position: Vec3) -> Self {
        Self {
            id,
            tag: Some(tag),
            position,
            radius: 0.25,
            layers: layer_mask([0]),
            body: Some(MockBody::new(1.0)),
            name: None,
            local_rotation: Quat::IDENTITY,
            attached: false,
        }
    }

    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn on_layer(mut self, layer: u32) -> Self {
        self.layers = layer_mask([layer]);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn is_carried(&self) -> bool {
        self.body.as_ref().is_some_and(|body| body.carried)
    }

    fn queryable(&self) -> bool {
        !self.is_carried()
    }

    fn ray_distance(&self, ray: Ray3d) -> Option<f32> {
        let offset = ray.origin - self.position;
        let c = offset.length_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let b = offset.dot(*ray.direction);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        (t >= 0.0).then_some(t)
    }
}

#[derive(Debug)]
pub struct MockPhysics {
    pub props: Vec<MockProp>,
    pub has_hold_point: bool,
    pub impulses: Vec<(u32, Vec3)>,
}

impl Default for MockPhysics {
    fn default() -> Self {
        Self {
            props: Vec::new(),
            has_hold_point: true,
            impulses: Vec::new(),
        }
    }
}

impl MockPhysics {
    pub fn with_props(props: impl IntoIterator<Item = MockProp>) -> Self {
        Self {
            props: props.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn prop(&self, id: u32) -> &MockProp {
        self.props
            .iter()
            .find(|prop| prop.id == id)
            .expect("unknown mock prop")
    }

    fn prop_mut(&mut self, id: u32) -> Option<&mut MockProp> {
        self.props.iter_mut().find(|prop| prop.id == id)
    }

    pub fn impulses_for(&self, id: u32) -> Vec<Vec3> {
        self.impulses
            .iter()
            .filter(|(body, _)| *body == id)
            .map(|(_, impulse)| *impulse)
            .collect()
    }
}

impl PhysicsBackend for MockPhysics {
    type Body = u32;

    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<OverlapHit<u32>> {
        self.props
            .iter()
            .filter(|prop| prop.queryable())
            .filter(|prop| prop.position.distance(center) <= radius + prop.radius)
            .map(|prop| OverlapHit {
                body: prop.id,
                tag: prop.tag,
                position: prop.position,
                has_body: prop.body.is_some(),
            })
            .collect()
    }

    fn raycast(&self, ray: Ray3d, max_distance: f32, filter: LayerMask) -> Option<RayHit<u32>> {
        self.props
            .iter()
            .filter(|prop| prop.queryable() && prop.layers.0 & filter.0 != 0)
            .filter_map(|prop| {
                let distance = prop.ray_distance(ray)?;
                (distance <= max_distance).then_some((prop, distance))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(prop, distance)| RayHit {
                body: prop.id,
                tag: prop.tag,
                distance,
                has_body: prop.body.is_some(),
                name: prop.name.clone(),
            })
    }

    fn set_carried(&mut self, body: u32, carried: bool) {
        if let Some(state) = self.prop_mut(body).and_then(|prop| prop.body.as_mut()) {
            state.carried = carried;
            if carried {
                state.velocity = Vec3::ZERO;
            }
        }
    }

    fn apply_impulse(&mut self, body: u32, impulse: Vec3) {
        let Some(state) = self.prop_mut(body).and_then(|prop| prop.body.as_mut()) else {
            return;
        };
        if state.carried {
            return;
        }
        state.velocity += impulse / state.mass;
        self.impulses.push((body, impulse));
    }

    fn attach(&mut self, body: u32) -> bool {
        if !self.has_hold_point {
            return false;
        }
        match self.prop_mut(body) {
            Some(prop) => {
                prop.attached = true;
                prop.local_rotation = Quat::IDENTITY;
                true
            }
            None => false,
        }
    }

    fn detach(&mut self, body: u32) {
        if let Some(prop) = self.prop_mut(body) {
            prop.attached = false;
        }
    }

    fn local_rotation(&self, body: u32) -> Option<Quat> {
        self.props
            .iter()
            .find(|prop| prop.id == body)
            .map(|prop| prop.local_rotation)
    }

    fn set_local_rotation(&mut self, body: u32, rotation: Quat) {
        if let Some(prop) = self.prop_mut(body) {
            prop.local_rotation = rotation;
        }
    }
}
