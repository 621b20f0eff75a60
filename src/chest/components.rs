//! Hinged chest lid state and its interpolation step.
use bevy::prelude::*;

/// An in-flight lid rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LidTween {
    pub start: Quat,
    pub end: Quat,
    pub t: f32,
    pub opening: bool,
}

/// Rotatable lid that swings between a closed and an open pose on its local X axis.
#[derive(Component, Debug, Clone)]
pub struct LidHinge {
    closed: Quat,
    open: Quat,
    speed: f32,
    toggle_key: KeyCode,
    is_open: bool,
    tween: Option<LidTween>,
}

impl LidHinge {
    /// Captures `closed` as the resting pose; the open pose is `open_angle` radians about X on top of it.
    pub fn new(closed: Quat, open_angle: f32, speed: f32, toggle_key: KeyCode) -> Self {
        Self {
            closed,
            open: Quat::from_rotation_x(open_angle) * closed,
            speed,
            toggle_key,
            is_open: false,
            tween: None,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn closed_rotation(&self) -> Quat {
        self.closed
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn open_rotation(&self) -> Quat {
        self.open
    }

    pub fn toggle_key(&self) -> KeyCode {
        self.toggle_key
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn tween(&self) -> Option<&LidTween> {
        self.tween.as_ref()
    }

    /// Starts a tween from `current` and returns whether the lid is now opening.
    ///
    /// Any tween in flight is replaced. Interrupting heads back to the pose the
    /// interrupted tween started from; otherwise the target follows `is_open`.
    pub fn toggle(&mut self, current: Quat) -> bool {
        let opening = match self.tween {
            Some(tween) => !tween.opening,
            None => !self.is_open,
        };
        let end = if opening { self.open } else { self.closed };
        self.tween = Some(LidTween {
            start: current,
            end,
            t: 0.0,
            opening,
        });
        opening
    }

    /// Advances the tween by `dt` seconds and returns the lid rotation to apply, if animating.
    pub fn advance(&mut self, dt: f32) -> Option<Quat> {
        let tween = self.tween.as_mut()?;
        tween.t += dt * self.speed;

        if tween.t >= 1.0 {
            let end = tween.end;
            self.is_open = tween.opening;
            self.tween = None;
            return Some(end);
        }

        Some(tween.start.slerp(tween.end, tween.t))
    }
}
