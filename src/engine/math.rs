//! Row-major matrix and vector helpers for the renderer.
//!
//! Matrices are stored row-major; uploads through glow therefore pass
//! `transpose = true` so OpenGL sees the expected column-major layout.

pub type Mat4x4 = [f32; 16];
pub type Mat3x3 = [f32; 9];
pub type Vec3 = [f32; 3];

pub fn mat4x4_identity() -> Mat4x4 {
    [
      1.0, 0.0, 0.0, 0.0,
      0.0, 1.0, 0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_translate(x: f32, y: f32, z: f32) -> Mat4x4 {
    [
      1.0, 0.0, 0.0,  x,
      0.0, 1.0, 0.0,  y,
      0.0, 0.0, 1.0,  z,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_rot_x(angle: f32) -> Mat4x4 {
    let c = angle.cos();
    let s = angle.sin();

    [
      1.0, 0.0, 0.0, 0.0,
      0.0,  c,  -s,  0.0,
      0.0,  s,   c,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_rot_y(angle: f32) -> Mat4x4 {
    let c = angle.cos();
    let s = angle.sin();

    [
       c,  0.0, -s,  0.0,
      0.0, 1.0, 0.0, 0.0,
       s,  0.0,  c,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_rot_z(angle: f32) -> Mat4x4 {
    let c = angle.cos();
    let s = angle.sin();

    [
       c,  -s,  0.0, 0.0,
       s,   c,  0.0, 0.0,
      0.0, 0.0, 1.0, 0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn mat4x4_scale(x: f32, y: f32, z: f32) -> Mat4x4 {
    [
       x,  0.0, 0.0, 0.0,
      0.0,  y,  0.0, 0.0,
      0.0, 0.0,  z,  0.0,
      0.0, 0.0, 0.0, 1.0
    ]
}

pub fn vec4_dot(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

pub fn mat4x4_row(mat: &Mat4x4, row: usize) -> [f32; 4] {
    let start_idx = row * 4;
    [mat[start_idx], mat[start_idx + 1], mat[start_idx + 2], mat[start_idx + 3]]
}

pub fn mat4x4_col(mat: &Mat4x4, col: usize) -> [f32; 4] {
    [mat[col], mat[4 + col], mat[8 + col], mat[12 + col]]
}

pub fn mat4x4_mul(a: Mat4x4, b: Mat4x4) -> Mat4x4 {
    let mut ret = [0.0; 16];
    for i in 0..16 {
        let row = i / 4;
        let col = i % 4;
        let a_row = mat4x4_row(&a, row);
        let b_col = mat4x4_col(&b, col);
        ret[i] = vec4_dot(a_row, b_col);
    }
    ret
}

pub fn mat4x4_perspective(fov_y_radians: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4x4 {
    let f = 1.0 / (fov_y_radians * 0.5).tan();
    let range_inv = 1.0 / (near - far);

    [
        f / aspect_ratio, 0.0, 0.0,                          0.0,
        0.0,              f,   0.0,                          0.0,
        0.0,              0.0, (near + far) * range_inv,     (2.0 * near * far) * range_inv,
        0.0,              0.0, -1.0,                         0.0,
    ]
}

/// View matrix looking from `eye` towards `target` with the given up vector.
pub fn mat4x4_look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4x4 {
    let f = vec3_normalize(vec3_sub(target, eye));
    let s = vec3_normalize(vec3_cross(f, up));
    let u = vec3_cross(s, f);

    [
        s[0],  s[1],  s[2],  -vec3_dot(s, eye),
        u[0],  u[1],  u[2],  -vec3_dot(u, eye),
       -f[0], -f[1], -f[2],   vec3_dot(f, eye),
        0.0,   0.0,   0.0,    1.0,
    ]
}

pub fn vec3_sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn vec3_dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn vec3_cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn vec3_normalize(v: Vec3) -> Vec3 {
    let len = vec3_dot(v, v).sqrt();
    if len == 0.0 {
        return v;
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Upper-left 3x3 block of a 4x4 matrix.
pub fn mat3x3_from_mat4(mat: &Mat4x4) -> Mat3x3 {
    [
        mat[0], mat[1], mat[2],
        mat[4], mat[5], mat[6],
        mat[8], mat[9], mat[10],
    ]
}

pub fn mat3x3_transpose(m: Mat3x3) -> Mat3x3 {
    [
        m[0], m[3], m[6],
        m[1], m[4], m[7],
        m[2], m[5], m[8],
    ]
}

pub fn mat3x3_inverse(m: Mat3x3) -> Mat3x3 {
    let c00 = m[4] * m[8] - m[5] * m[7];
    let c01 = m[5] * m[6] - m[3] * m[8];
    let c02 = m[3] * m[7] - m[4] * m[6];

    let det = m[0] * c00 + m[1] * c01 + m[2] * c02;
    if det.abs() < 1e-8 {
        // Singular; degenerate transforms keep their normals untouched.
        return [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    }
    let inv_det = 1.0 / det;

    [
        c00 * inv_det,
        (m[2] * m[7] - m[1] * m[8]) * inv_det,
        (m[1] * m[5] - m[2] * m[4]) * inv_det,
        c01 * inv_det,
        (m[0] * m[8] - m[2] * m[6]) * inv_det,
        (m[2] * m[3] - m[0] * m[5]) * inv_det,
        c02 * inv_det,
        (m[1] * m[6] - m[0] * m[7]) * inv_det,
        (m[0] * m[4] - m[1] * m[3]) * inv_det,
    ]
}

/// Normal-correction matrix: inverse-transpose of the model's 3x3 block.
pub fn normal_matrix(model: &Mat4x4) -> Mat3x3 {
    mat3x3_inverse(mat3x3_transpose(mat3x3_from_mat4(model)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat4_approx_eq(a: &Mat4x4, b: &Mat4x4) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn identity_is_mul_neutral() {
        let m = mat4x4_mul(mat4x4_translate(1.0, 2.0, 3.0), mat4x4_rot_y(0.7));
        assert!(mat4_approx_eq(&mat4x4_mul(m, mat4x4_identity()), &m));
        assert!(mat4_approx_eq(&mat4x4_mul(mat4x4_identity(), m), &m));
    }

    #[test]
    fn translate_then_scale_composes_right_to_left() {
        // T * S applied to the local point (1, 0, 0) with scale 2 lands at x = 2 + 5.
        let m = mat4x4_mul(mat4x4_translate(5.0, 0.0, 0.0), mat4x4_scale(2.0, 2.0, 2.0));
        let p = [
            vec4_dot(mat4x4_row(&m, 0), [1.0, 0.0, 0.0, 1.0]),
            vec4_dot(mat4x4_row(&m, 1), [1.0, 0.0, 0.0, 1.0]),
            vec4_dot(mat4x4_row(&m, 2), [1.0, 0.0, 0.0, 1.0]),
        ];
        assert!((p[0] - 7.0).abs() < 1e-6);
        assert!(p[1].abs() < 1e-6 && p[2].abs() < 1e-6);
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let eye = [3.0, 4.0, 5.0];
        let view = mat4x4_look_at(eye, [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let p = [eye[0], eye[1], eye[2], 1.0];
        for row in 0..3 {
            assert!(vec4_dot(mat4x4_row(&view, row), p).abs() < 1e-5);
        }
    }

    #[test]
    fn look_at_faces_negative_z() {
        // Looking down -z from (0, 0, 5): the target is 5 units ahead.
        let view = mat4x4_look_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let target = [0.0, 0.0, 0.0, 1.0];
        let z = vec4_dot(mat4x4_row(&view, 2), target);
        assert!((z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = mat4x4_scale(2.0, 1.0, 1.0);
        let n = normal_matrix(&model);
        // inverse-transpose of diag(2, 1, 1) is diag(0.5, 1, 1)
        assert!((n[0] - 0.5).abs() < 1e-6);
        assert!((n[4] - 1.0).abs() < 1e-6);
        assert!((n[8] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normal_matrix_of_rotation_is_the_rotation() {
        let model = mat4x4_rot_y(0.9);
        let n = normal_matrix(&model);
        let r = mat3x3_from_mat4(&model);
        for i in 0..9 {
            assert!((n[i] - r[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn singular_block_falls_back_to_identity() {
        let n = normal_matrix(&mat4x4_scale(1.0, 1.0, 0.0));
        assert_eq!(n, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn mat3_inverse_times_matrix_is_identity() {
        let m = mat3x3_from_mat4(&mat4x4_mul(mat4x4_rot_x(0.4), mat4x4_scale(2.0, 3.0, 4.0)));
        let inv = mat3x3_inverse(m);
        // row-major 3x3 multiply
        let mut prod = [0.0f32; 9];
        for r in 0..3 {
            for c in 0..3 {
                for k in 0..3 {
                    prod[r * 3 + c] += m[r * 3 + k] * inv[k * 3 + c];
                }
            }
        }
        let id = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0f32];
        for i in 0..9 {
            assert!((prod[i] - id[i]).abs() < 1e-5);
        }
    }
}
