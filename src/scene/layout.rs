//! Static description of the museum: one placement per drawn object.
//!
//! A placement ties a geometry to its texture, material, repeat factor and
//! a transform function of the per-frame state. The renderer walks this
//! table instead of hard-coding one draw block per object, so adding an
//! exhibit means adding a row here. Transparent placements sit at the end
//! of the table; the renderer relies on that ordering to draw them after
//! everything opaque.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::engine::math::{
    mat4x4_mul, mat4x4_rot_x, mat4x4_rot_y, mat4x4_rot_z, mat4x4_scale, mat4x4_translate, Mat4x4,
    Vec3,
};

// Room interior: 20 wide (x), 5 tall (y), 40 deep (z), floor at y = 0.
pub const ROOM_HALF_WIDTH: f32 = 10.0;
pub const ROOM_HEIGHT: f32 = 5.0;
pub const ROOM_HALF_DEPTH: f32 = 20.0;
pub const WALL_TEX_REPEAT: f32 = 5.0;
pub const PAVING_TEX_REPEAT: f32 = 7.0;

const CLOCK_CENTER: [f32; 3] = [0.0, 3.0, -ROOM_HALF_DEPTH + 0.1];

/// Everything a transform function may depend on for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameState {
    /// Seconds since startup, advanced by the fixed animation tick.
    pub app_time: f32,
    pub hour_angle: f32,
    pub minute_angle: f32,
    pub second_angle: f32,
}

/// Which of the scene's geometries a placement draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Cube,
    Rectangle,
    Statue,
}

/// Which of the scene's textures a placement samples, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Wall,
    Paving,
    Wood,
}

#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub alpha: f32,
}

impl Material {
    const fn opaque(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            alpha: 1.0,
        }
    }
}

const MATTE_WHITE: Material = Material::opaque(
    [0.25, 0.25, 0.25],
    [0.9, 0.9, 0.9],
    [0.05, 0.05, 0.05],
    4.0,
);

const POLISHED_STONE: Material = Material::opaque(
    [0.2, 0.2, 0.2],
    [0.8, 0.8, 0.75],
    [0.5, 0.5, 0.5],
    48.0,
);

const MARBLE: Material = Material::opaque(
    [0.22, 0.22, 0.24],
    [0.85, 0.85, 0.9],
    [0.7, 0.7, 0.7],
    96.0,
);

const BLACK_METAL: Material = Material::opaque(
    [0.05, 0.05, 0.05],
    [0.1, 0.1, 0.1],
    [0.4, 0.4, 0.4],
    64.0,
);

const GLASS: Material = Material {
    ambient: [0.1, 0.12, 0.12],
    diffuse: [0.5, 0.6, 0.6],
    specular: [0.9, 0.9, 0.9],
    shininess: 128.0,
    alpha: 0.35,
};

#[derive(Clone, Copy)]
pub struct Placement {
    pub name: &'static str,
    pub geometry: GeometryKind,
    pub texture: Option<TextureKind>,
    pub material: Material,
    pub tex_repeat: f32,
    pub transform: fn(&FrameState) -> Mat4x4,
    pub transparent: bool,
}

/// The museum, opaque objects first, transparent ones last.
pub const PLACEMENTS: &[Placement] = &[
    Placement {
        name: "paving",
        geometry: GeometryKind::Rectangle,
        texture: Some(TextureKind::Paving),
        material: MATTE_WHITE,
        tex_repeat: PAVING_TEX_REPEAT,
        transform: paving_transform,
        transparent: false,
    },
    Placement {
        name: "wall north",
        geometry: GeometryKind::Rectangle,
        texture: Some(TextureKind::Wall),
        material: MATTE_WHITE,
        tex_repeat: WALL_TEX_REPEAT,
        transform: wall_north_transform,
        transparent: false,
    },
    Placement {
        name: "wall south",
        geometry: GeometryKind::Rectangle,
        texture: Some(TextureKind::Wall),
        material: MATTE_WHITE,
        tex_repeat: WALL_TEX_REPEAT,
        transform: wall_south_transform,
        transparent: false,
    },
    Placement {
        name: "wall east",
        geometry: GeometryKind::Rectangle,
        texture: Some(TextureKind::Wall),
        material: MATTE_WHITE,
        tex_repeat: WALL_TEX_REPEAT,
        transform: wall_east_transform,
        transparent: false,
    },
    Placement {
        name: "wall west",
        geometry: GeometryKind::Rectangle,
        texture: Some(TextureKind::Wall),
        material: MATTE_WHITE,
        tex_repeat: WALL_TEX_REPEAT,
        transform: wall_west_transform,
        transparent: false,
    },
    Placement {
        name: "pedestal left",
        geometry: GeometryKind::Cube,
        texture: Some(TextureKind::Wood),
        material: POLISHED_STONE,
        tex_repeat: 1.0,
        transform: pedestal_left_transform,
        transparent: false,
    },
    Placement {
        name: "pedestal right",
        geometry: GeometryKind::Cube,
        texture: Some(TextureKind::Wood),
        material: POLISHED_STONE,
        tex_repeat: 1.0,
        transform: pedestal_right_transform,
        transparent: false,
    },
    Placement {
        name: "statue",
        geometry: GeometryKind::Statue,
        texture: None,
        material: MARBLE,
        tex_repeat: 1.0,
        transform: statue_transform,
        transparent: false,
    },
    Placement {
        name: "clock face",
        geometry: GeometryKind::Rectangle,
        texture: Some(TextureKind::Wood),
        material: MATTE_WHITE,
        tex_repeat: 1.0,
        transform: clock_face_transform,
        transparent: false,
    },
    Placement {
        name: "clock hour hand",
        geometry: GeometryKind::Cube,
        texture: None,
        material: BLACK_METAL,
        tex_repeat: 1.0,
        transform: hour_hand_transform,
        transparent: false,
    },
    Placement {
        name: "clock minute hand",
        geometry: GeometryKind::Cube,
        texture: None,
        material: BLACK_METAL,
        tex_repeat: 1.0,
        transform: minute_hand_transform,
        transparent: false,
    },
    Placement {
        name: "clock second hand",
        geometry: GeometryKind::Cube,
        texture: None,
        material: BLACK_METAL,
        tex_repeat: 1.0,
        transform: second_hand_transform,
        transparent: false,
    },
    Placement {
        name: "glass pane",
        geometry: GeometryKind::Rectangle,
        texture: None,
        material: GLASS,
        tex_repeat: 1.0,
        transform: glass_pane_transform,
        transparent: true,
    },
];

// The unit rectangle faces +z; walls are rotated so their face points into
// the room. Walls keep unit depth so the model's 3x3 block stays invertible
// for the normal matrix.

fn paving_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_rot_x(-FRAC_PI_2),
        mat4x4_scale(ROOM_HALF_WIDTH, ROOM_HALF_DEPTH, 1.0),
    )
}

fn wall_north_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(0.0, ROOM_HEIGHT * 0.5, -ROOM_HALF_DEPTH),
        mat4x4_scale(ROOM_HALF_WIDTH, ROOM_HEIGHT * 0.5, 1.0),
    )
}

fn wall_south_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(0.0, ROOM_HEIGHT * 0.5, ROOM_HALF_DEPTH),
        mat4x4_mul(
            mat4x4_rot_y(PI),
            mat4x4_scale(ROOM_HALF_WIDTH, ROOM_HEIGHT * 0.5, 1.0),
        ),
    )
}

fn wall_east_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(ROOM_HALF_WIDTH, ROOM_HEIGHT * 0.5, 0.0),
        mat4x4_mul(
            mat4x4_rot_y(FRAC_PI_2),
            mat4x4_scale(ROOM_HALF_DEPTH, ROOM_HEIGHT * 0.5, 1.0),
        ),
    )
}

fn wall_west_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(-ROOM_HALF_WIDTH, ROOM_HEIGHT * 0.5, 0.0),
        mat4x4_mul(
            mat4x4_rot_y(-FRAC_PI_2),
            mat4x4_scale(ROOM_HALF_DEPTH, ROOM_HEIGHT * 0.5, 1.0),
        ),
    )
}

fn pedestal_left_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(-3.0, 0.5, -5.0),
        mat4x4_scale(0.5, 0.5, 0.5),
    )
}

fn pedestal_right_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(3.0, 0.5, -5.0),
        mat4x4_scale(0.5, 0.5, 0.5),
    )
}

fn statue_transform(frame: &FrameState) -> Mat4x4 {
    // The exhibit turns slowly on its pedestal; its lowest point rests on
    // the pedestal top at y = 1.
    mat4x4_mul(
        mat4x4_translate(-3.0, 2.0, -5.0),
        mat4x4_rot_y(frame.app_time * 0.3),
    )
}

fn clock_face_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(CLOCK_CENTER[0], CLOCK_CENTER[1], CLOCK_CENTER[2]),
        mat4x4_scale(0.8, 0.8, 1.0),
    )
}

/// A hand is a thin cube anchored at the clock center, pointing up at
/// angle 0 (twelve o'clock) and rotated clockwise (negative angles) from
/// there.
fn hand_transform(angle: f32, length: f32, width: f32, depth_offset: f32) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(
            CLOCK_CENTER[0],
            CLOCK_CENTER[1],
            CLOCK_CENTER[2] + depth_offset,
        ),
        mat4x4_mul(
            mat4x4_rot_z(angle),
            mat4x4_mul(
                mat4x4_translate(0.0, length * 0.5, 0.0),
                mat4x4_scale(width, length * 0.5, 0.01),
            ),
        ),
    )
}

fn hour_hand_transform(frame: &FrameState) -> Mat4x4 {
    hand_transform(frame.hour_angle, 0.4, 0.035, 0.02)
}

fn minute_hand_transform(frame: &FrameState) -> Mat4x4 {
    hand_transform(frame.minute_angle, 0.6, 0.025, 0.04)
}

fn second_hand_transform(frame: &FrameState) -> Mat4x4 {
    hand_transform(frame.second_angle, 0.7, 0.01, 0.06)
}

fn glass_pane_transform(_: &FrameState) -> Mat4x4 {
    mat4x4_mul(
        mat4x4_translate(3.0, 1.6, -4.3),
        mat4x4_scale(0.7, 0.6, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::math::{mat4x4_row, normal_matrix, vec4_dot};

    fn apply(m: &Mat4x4, p: [f32; 4]) -> [f32; 3] {
        [
            vec4_dot(mat4x4_row(m, 0), p),
            vec4_dot(mat4x4_row(m, 1), p),
            vec4_dot(mat4x4_row(m, 2), p),
        ]
    }

    #[test]
    fn transparent_placements_come_last() {
        let first_transparent = PLACEMENTS
            .iter()
            .position(|p| p.transparent)
            .expect("scene has a transparent object");
        assert!(PLACEMENTS[first_transparent..].iter().all(|p| p.transparent));
    }

    #[test]
    fn placement_names_are_unique() {
        for (i, a) in PLACEMENTS.iter().enumerate() {
            for b in &PLACEMENTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn all_transforms_are_finite_and_invertible() {
        let frame = FrameState {
            app_time: 12.34,
            hour_angle: -0.5,
            minute_angle: -2.0,
            second_angle: -3.0,
        };
        for placement in PLACEMENTS {
            let model = (placement.transform)(&frame);
            assert!(model.iter().all(|v| v.is_finite()), "{}", placement.name);
            // A singular model would collapse the normal matrix to the
            // identity fallback; every placement must avoid that.
            let n = normal_matrix(&model);
            let is_fallback = n == [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
            let is_identity_model = model == crate::engine::math::mat4x4_identity();
            assert!(
                !is_fallback || is_identity_model,
                "degenerate normal matrix for {}",
                placement.name
            );
        }
    }

    #[test]
    fn walls_enclose_the_room() {
        let frame = FrameState::default();
        let center = [0.0, 0.0, 0.0, 1.0];
        let north = apply(&wall_north_transform(&frame), center);
        let south = apply(&wall_south_transform(&frame), center);
        let east = apply(&wall_east_transform(&frame), center);
        let west = apply(&wall_west_transform(&frame), center);
        assert!((north[2] + ROOM_HALF_DEPTH).abs() < 1e-5);
        assert!((south[2] - ROOM_HALF_DEPTH).abs() < 1e-5);
        assert!((east[0] - ROOM_HALF_WIDTH).abs() < 1e-5);
        assert!((west[0] + ROOM_HALF_WIDTH).abs() < 1e-5);
    }

    #[test]
    fn paving_spans_the_floor() {
        let frame = FrameState::default();
        let m = paving_transform(&frame);
        // Local corner (1, 1, 0) of the unit quad lands at a floor corner.
        let corner = apply(&m, [1.0, 1.0, 0.0, 1.0]);
        assert!((corner[0] - ROOM_HALF_WIDTH).abs() < 1e-4);
        assert!(corner[1].abs() < 1e-4);
        assert!((corner[2] + ROOM_HALF_DEPTH).abs() < 1e-4);
    }

    #[test]
    fn hands_rotate_clockwise_from_twelve() {
        let noon = FrameState::default();
        let quarter_past = FrameState {
            minute_angle: (-90.0f32).to_radians(),
            ..noon
        };
        // Hand tip: local (0, 1, 0) scaled by half-length then offset.
        let tip = [0.0, 1.0, 0.0, 1.0];
        let at_noon = apply(&minute_hand_transform(&noon), tip);
        let at_quarter = apply(&minute_hand_transform(&quarter_past), tip);
        // Straight up at noon.
        assert!(at_noon[1] > CLOCK_CENTER[1]);
        assert!((at_noon[0] - CLOCK_CENTER[0]).abs() < 1e-5);
        // Pointing towards three o'clock: +x of the face, same height.
        assert!(at_quarter[0] > CLOCK_CENTER[0]);
        assert!((at_quarter[1] - CLOCK_CENTER[1]).abs() < 1e-4);
    }

    #[test]
    fn statue_turns_with_app_time() {
        let t0 = FrameState::default();
        let t1 = FrameState {
            app_time: 2.0,
            ..t0
        };
        let tip = [1.0, 0.0, 0.0, 1.0];
        let p0 = apply(&statue_transform(&t0), tip);
        let p1 = apply(&statue_transform(&t1), tip);
        assert!((p0[0] - p1[0]).abs() > 1e-3 || (p0[2] - p1[2]).abs() > 1e-3);
    }
}
