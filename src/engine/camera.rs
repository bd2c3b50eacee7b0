//! Orbit camera driven by mouse drags.
//!
//! The camera is parameterized by an azimuth/elevation/distance triple
//! around a look target. `eye_position` is a cached pure function of that
//! state and is recomputed after every mutation, never set directly.
//!
//! Azimuth convention: 0 looks towards -z, pi/2 towards -x; the angle is
//! unconstrained and wraps naturally through sin/cos. Elevation is clamped
//! strictly inside +-pi/2 so the view basis never degenerates at the poles.

use crate::engine::math::Vec3;

/// Mouse buttons the camera reacts to. The windowing layer maps its own
/// button type onto this one so the camera stays toolkit-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragButton {
    /// Left drag: orbit (azimuth/elevation).
    Rotate,
    /// Right drag: dolly in/out (distance).
    Zoom,
}

/// Discrete camera translation commands (the w/s/a/d keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug)]
pub struct Camera {
    azimuth: f32,
    elevation: f32,
    distance: f32,
    target: Vec3,
    eye_position: Vec3,
    last_x: f64,
    last_y: f64,
    is_rotating: bool,
    is_zooming: bool,
}

impl Camera {
    pub const MIN_ELEVATION: f32 = -1.5;
    pub const MAX_ELEVATION: f32 = 1.5;
    pub const MIN_DISTANCE: f32 = 1.0;
    pub const ANGLE_SENSITIVITY: f32 = 0.008;
    pub const ZOOM_SENSITIVITY: f32 = 0.003;
    const DEFAULT_DISTANCE: f32 = 5.0;
    const MOVE_STEP: f32 = 0.5;

    pub fn new() -> Self {
        let mut camera = Self {
            azimuth: 0.0,
            elevation: 0.0,
            distance: Self::DEFAULT_DISTANCE,
            target: [0.0, 0.0, 0.0],
            eye_position: [0.0, 0.0, 0.0],
            last_x: 0.0,
            last_y: 0.0,
            is_rotating: false,
            is_zooming: false,
        };
        camera.update_eye_position();
        camera
    }

    fn update_eye_position(&mut self) {
        self.eye_position = [
            self.target[0] + self.distance * self.elevation.cos() * -self.azimuth.sin(),
            self.target[1] + self.distance * self.elevation.sin(),
            self.target[2] + self.distance * self.elevation.cos() * self.azimuth.cos(),
        ];
    }

    /// Enter or leave a drag mode. Recording the cursor on press makes the
    /// following motion deltas relative to the press point; the eye itself
    /// does not move here.
    pub fn on_mouse_button(&mut self, button: DragButton, pressed: bool, x: f64, y: f64) {
        match button {
            DragButton::Rotate => {
                if pressed {
                    self.last_x = x;
                    self.last_y = y;
                }
                self.is_rotating = pressed;
            }
            DragButton::Zoom => {
                if pressed {
                    self.last_x = x;
                    self.last_y = y;
                }
                self.is_zooming = pressed;
            }
        }
    }

    /// Apply a cursor sample. The last position is updated unconditionally
    /// so every delta is relative to the previous sample, not the drag
    /// start.
    pub fn on_mouse_moved(&mut self, x: f64, y: f64) {
        let dx = (x - self.last_x) as f32;
        let dy = (y - self.last_y) as f32;
        self.last_x = x;
        self.last_y = y;

        if self.is_rotating {
            self.azimuth += dx * Self::ANGLE_SENSITIVITY;
            self.elevation += dy * Self::ANGLE_SENSITIVITY;
            self.elevation = self.elevation.clamp(Self::MIN_ELEVATION, Self::MAX_ELEVATION);
        }
        if self.is_zooming {
            self.distance *= 1.0 + dy * Self::ZOOM_SENSITIVITY;
            if self.distance < Self::MIN_DISTANCE {
                self.distance = Self::MIN_DISTANCE;
            }
        }
        self.update_eye_position();
    }

    /// Step the look target in the camera-relative xz plane. The eye
    /// follows since it is derived from the target.
    pub fn move_target(&mut self, direction: MoveDirection) {
        let forward = [self.azimuth.sin(), 0.0, -self.azimuth.cos()];
        let right = [self.azimuth.cos(), 0.0, self.azimuth.sin()];
        let (axis, sign): (Vec3, f32) = match direction {
            MoveDirection::Forward => (forward, 1.0),
            MoveDirection::Backward => (forward, -1.0),
            MoveDirection::Right => (right, 1.0),
            MoveDirection::Left => (right, -1.0),
        };
        self.target[0] += axis[0] * sign * Self::MOVE_STEP;
        self.target[2] += axis[2] * sign * Self::MOVE_STEP;
        self.update_eye_position();
    }

    /// Cached eye position in world space; pure read.
    pub fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    /// The point the camera orbits and looks at.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
