//! Player interaction state machine: pickup, drop, ball shooting, kicking, and sword swings.
//!
//! The controller owns at most one held prop. Every transition goes through a named
//! operation (`pick_up`, `drop_held`, `shoot`, `start_swing`, `advance_swing`) and all
//! physics side effects go through a [`PhysicsBackend`], so the whole machine runs
//! against the mock backend in tests.
use std::f32::consts::PI;
use std::fmt::Debug;

use avian3d::prelude::LayerMask;
use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::{
    core::settings::{InteractionSettings, PlayerSettings, SwordSettings},
    kicker::scan::{try_kick, KickOutcome, MisalignedPolicy},
    physics::{
        backend::{PhysicsBackend, RayHit},
        components::PropTag,
    },
};

/// Upward bias added to the view direction when shooting a held ball.
pub const THROW_LIFT: f32 = 0.2;

/// Peak-relative swing offset at `progress`: zero at both ends, `swing_angle` at 0.5.
pub fn swing_angle_at(progress: f32, swing_angle: f32) -> f32 {
    (progress * PI).sin() * swing_angle
}

/// Where the player is looking from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPose {
    pub origin: Vec3,
    pub forward: Vec3,
}

impl ViewPose {
    pub fn ray(&self) -> Option<Ray3d> {
        Dir3::new(self.forward)
            .ok()
            .map(|direction| Ray3d::new(self.origin, direction))
    }
}

/// Edge-triggered actions for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub interact: bool,
    pub kick: bool,
    pub primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeldRole {
    Ball,
    /// A swingable item; `rest_pose` is its local rotation right after pickup.
    Item { rest_pose: Quat },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldProp<B> {
    pub body: B,
    pub role: HeldRole,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingState {
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    HoldingItem,
    HoldingBall,
    Swinging,
}

/// Result of starting a swing: the attack ray fires immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingStart<B> {
    pub hit: Option<RayHit<B>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwingStep {
    Idle,
    Swinging { angle: f32 },
    Finished,
}

/// Everything observable that happened during one [`InteractionController::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent<B> {
    PickedUp { prop: B, is_ball: bool },
    Dropped { prop: B },
    Shot { ball: B, impulse: Vec3 },
    Kick(KickOutcome<B>),
    SwingStarted,
    SwordHit { target: B, name: Option<String> },
    SwingFinished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionController<B> {
    held: Option<HeldProp<B>>,
    swing: Option<SwingState>,
}

impl<B> Default for InteractionController<B> {
    fn default() -> Self {
        Self {
            held: None,
            swing: None,
        }
    }
}

impl<B: Copy + Eq + Debug> InteractionController<B> {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn held(&self) -> Option<&HeldProp<B>> {
        self.held.as_ref()
    }

    pub fn is_holding_ball(&self) -> bool {
        matches!(
            self.held,
            Some(HeldProp {
                role: HeldRole::Ball,
                ..
            })
        )
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn swing(&self) -> Option<&SwingState> {
        self.swing.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        match (&self.held, &self.swing) {
            (None, _) => ControllerState::Idle,
            (Some(held), _) if held.role == HeldRole::Ball => ControllerState::HoldingBall,
            (Some(_), Some(_)) => ControllerState::Swinging,
            (Some(_), None) => ControllerState::HoldingItem,
        }
    }

    /// Runs one frame: swing animation first, then interact, kick, and primary action.
    ///
    /// A successful interact ends the tick, so kick and primary are ignored that frame.
    pub fn tick<P: PhysicsBackend<Body = B>>(
        &mut self,
        physics: &mut P,
        view: ViewPose,
        actor_position: Vec3,
        input: TickInput,
        dt: f32,
        settings: &InteractionSettings,
    ) -> Vec<ControllerEvent<B>> {
        let mut events = Vec::new();

        if self.advance_swing(physics, dt, &settings.sword) == SwingStep::Finished {
            events.push(ControllerEvent::SwingFinished);
        }

        if input.interact {
            if let Some(event) = self.interact(physics, view, &settings.player) {
                events.push(event);
                return events;
            }
        }

        if input.kick {
            events.push(ControllerEvent::Kick(try_kick(
                physics,
                actor_position,
                view.forward,
                &settings.player.kick,
                MisalignedPolicy::SkipCandidate,
            )));
        }

        if input.primary {
            if let Some(start) = self.start_swing(physics, view, &settings.sword) {
                events.push(ControllerEvent::SwingStarted);
                if let Some(hit) = start.hit {
                    events.push(ControllerEvent::SwordHit {
                        target: hit.body,
                        name: hit.name,
                    });
                }
            }
        }

        events
    }

    /// Interact priority: shoot a held ball, drop a held item, pick up a ball, pick up an item.
    pub fn interact<P: PhysicsBackend<Body = B>>(
        &mut self,
        physics: &mut P,
        view: ViewPose,
        settings: &PlayerSettings,
    ) -> Option<ControllerEvent<B>> {
        if self.is_holding_ball() {
            return self
                .shoot(physics, view.forward, settings.throw_force)
                .map(|(ball, impulse)| ControllerEvent::Shot { ball, impulse });
        }

        if self.held.is_some() {
            return self
                .drop_held(physics)
                .map(|prop| ControllerEvent::Dropped { prop });
        }

        if let Some(ball) = self.pick_up(physics, view, settings.ball_pick_up_range, PropTag::Ball)
        {
            return Some(ControllerEvent::PickedUp {
                prop: ball,
                is_ball: true,
            });
        }

        self.pick_up(physics, view, settings.pick_up_range, PropTag::PickUp)
            .map(|prop| ControllerEvent::PickedUp {
                prop,
                is_ball: false,
            })
    }

    /// Attaches the `tag`ged body under the view ray, if any, and nothing is held yet.
    pub fn pick_up<P: PhysicsBackend<Body = B>>(
        &mut self,
        physics: &mut P,
        view: ViewPose,
        range: f32,
        tag: PropTag,
    ) -> Option<B> {
        if self.held.is_some() {
            return None;
        }

        let hit = physics.raycast(view.ray()?, range, LayerMask::ALL)?;
        if hit.tag != Some(tag) || !hit.has_body {
            return None;
        }
        if !physics.attach(hit.body) {
            return None;
        }
        physics.set_carried(hit.body, true);

        let role = match tag {
            PropTag::Ball => HeldRole::Ball,
            _ => HeldRole::Item {
                rest_pose: physics
                    .local_rotation(hit.body)
                    .unwrap_or(Quat::IDENTITY),
            },
        };
        self.held = Some(HeldProp {
            body: hit.body,
            role,
        });
        self.swing = None;
        Some(hit.body)
    }

    /// Releases whatever is held, restoring its simulation.
    pub fn drop_held<P: PhysicsBackend<Body = B>>(&mut self, physics: &mut P) -> Option<B> {
        let held = self.held.take()?;
        self.swing = None;
        physics.set_carried(held.body, false);
        physics.detach(held.body);
        Some(held.body)
    }

    /// Releases a held ball and throws it along the view direction.
    pub fn shoot<P: PhysicsBackend<Body = B>>(
        &mut self,
        physics: &mut P,
        forward: Vec3,
        throw_force: f32,
    ) -> Option<(B, Vec3)> {
        if !self.is_holding_ball() {
            return None;
        }
        let ball = self.drop_held(physics)?;
        let impulse = (forward + Vec3::Y * THROW_LIFT).normalize_or_zero() * throw_force;
        physics.apply_impulse(ball, impulse);
        Some((ball, impulse))
    }

    /// Starts a swing of the held item and fires the attack ray.
    ///
    /// Requires a held non-ball item and no swing in progress.
    pub fn start_swing<P: PhysicsBackend<Body = B>>(
        &mut self,
        physics: &mut P,
        view: ViewPose,
        settings: &SwordSettings,
    ) -> Option<SwingStart<B>> {
        if !matches!(
            self.held,
            Some(HeldProp {
                role: HeldRole::Item { .. },
                ..
            })
        ) || self.swing.is_some()
        {
            return None;
        }

        self.swing = Some(SwingState { progress: 0.0 });
        let hit = self.sword_attack(physics, view, settings);
        Some(SwingStart { hit })
    }

    fn sword_attack<P: PhysicsBackend<Body = B>>(
        &self,
        physics: &mut P,
        view: ViewPose,
        settings: &SwordSettings,
    ) -> Option<RayHit<B>> {
        let hit = physics.raycast(view.ray()?, settings.attack_range, settings.attack_layers)?;
        if hit.has_body {
            physics.apply_impulse(hit.body, view.forward * settings.attack_force);
        }
        Some(hit)
    }

    /// Advances an active swing by `dt`, posing the held item, and snaps back to rest on completion.
    pub fn advance_swing<P: PhysicsBackend<Body = B>>(
        &mut self,
        physics: &mut P,
        dt: f32,
        settings: &SwordSettings,
    ) -> SwingStep {
        let Some(swing) = self.swing.as_mut() else {
            return SwingStep::Idle;
        };
        let Some(HeldProp {
            body,
            role: HeldRole::Item { rest_pose },
        }) = self.held
        else {
            self.swing = None;
            return SwingStep::Idle;
        };
        if physics.local_rotation(body).is_none() {
            self.swing = None;
            return SwingStep::Idle;
        }

        swing.progress += dt * settings.swing_speed;
        if swing.progress >= 1.0 {
            physics.set_local_rotation(body, rest_pose);
            self.swing = None;
            return SwingStep::Finished;
        }

        let angle = swing_angle_at(swing.progress, settings.swing_angle);
        physics.set_local_rotation(body, rest_pose * Quat::from_rotation_x(-angle));
        SwingStep::Swinging { angle }
    }
}
