//! Uniform and attribute location registry.
//!
//! Every named shader input is resolved exactly once right after linking.
//! A name the shader does not declare resolves to `None`, and glow's
//! uniform setters silently ignore a `None` location — that matches the
//! GL contract for unused uniforms and is kept as-is: writes to an
//! unresolved input are no-ops, not errors.

use glow::HasContext;

use crate::engine::math::{Mat3x3, Mat4x4, Vec3};

/// Attribute locations for the shared vertex layout.
#[derive(Debug, Clone, Copy)]
pub struct VertexAttribs {
    pub position: Option<u32>,
    pub normal: Option<u32>,
    pub tex_coord: Option<u32>,
}

impl VertexAttribs {
    pub fn resolve(gl: &glow::Context, program: glow::Program) -> Self {
        unsafe {
            Self {
                position: gl.get_attrib_location(program, "position"),
                normal: gl.get_attrib_location(program, "normal"),
                tex_coord: gl.get_attrib_location(program, "tex_coord"),
            }
        }
    }
}

/// Resolved uniform locations of the museum's single shading program.
#[derive(Debug)]
pub struct ShaderLocations {
    model_matrix: Option<glow::UniformLocation>,
    pvm_matrix: Option<glow::UniformLocation>,
    normal_matrix: Option<glow::UniformLocation>,

    material_ambient_color: Option<glow::UniformLocation>,
    material_diffuse_color: Option<glow::UniformLocation>,
    material_specular_color: Option<glow::UniformLocation>,
    material_shininess: Option<glow::UniformLocation>,
    material_alpha: Option<glow::UniformLocation>,

    light_position: Option<glow::UniformLocation>,
    light_ambient_color: Option<glow::UniformLocation>,
    light_diffuse_color: Option<glow::UniformLocation>,
    light_specular_color: Option<glow::UniformLocation>,

    eye_position: Option<glow::UniformLocation>,

    tex_sampler: Option<glow::UniformLocation>,
    tex_repeat_factor: Option<glow::UniformLocation>,
}

impl ShaderLocations {
    pub fn resolve(gl: &glow::Context, program: glow::Program) -> Self {
        unsafe {
            Self {
                model_matrix: gl.get_uniform_location(program, "model_matrix"),
                pvm_matrix: gl.get_uniform_location(program, "PVM_matrix"),
                normal_matrix: gl.get_uniform_location(program, "normal_matrix"),

                material_ambient_color: gl.get_uniform_location(program, "material_ambient_color"),
                material_diffuse_color: gl.get_uniform_location(program, "material_diffuse_color"),
                material_specular_color: gl
                    .get_uniform_location(program, "material_specular_color"),
                material_shininess: gl.get_uniform_location(program, "material_shininess"),
                material_alpha: gl.get_uniform_location(program, "material_alpha"),

                light_position: gl.get_uniform_location(program, "light_position"),
                light_ambient_color: gl.get_uniform_location(program, "light_ambient_color"),
                light_diffuse_color: gl.get_uniform_location(program, "light_diffuse_color"),
                light_specular_color: gl.get_uniform_location(program, "light_specular_color"),

                eye_position: gl.get_uniform_location(program, "eye_position"),

                tex_sampler: gl.get_uniform_location(program, "my_tex"),
                tex_repeat_factor: gl.get_uniform_location(program, "tex_repeat_factor"),
            }
        }
    }

    // Matrices are stored row-major, hence transpose = true on upload.

    pub fn set_model_matrix(&self, gl: &glow::Context, matrix: &Mat4x4) {
        unsafe { gl.uniform_matrix_4_f32_slice(self.model_matrix.as_ref(), true, matrix) }
    }

    pub fn set_pvm_matrix(&self, gl: &glow::Context, matrix: &Mat4x4) {
        unsafe { gl.uniform_matrix_4_f32_slice(self.pvm_matrix.as_ref(), true, matrix) }
    }

    pub fn set_normal_matrix(&self, gl: &glow::Context, matrix: &Mat3x3) {
        unsafe { gl.uniform_matrix_3_f32_slice(self.normal_matrix.as_ref(), true, matrix) }
    }

    pub fn set_material_ambient_color(&self, gl: &glow::Context, color: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.material_ambient_color.as_ref(),
                color[0],
                color[1],
                color[2],
            )
        }
    }

    pub fn set_material_diffuse_color(&self, gl: &glow::Context, color: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.material_diffuse_color.as_ref(),
                color[0],
                color[1],
                color[2],
            )
        }
    }

    pub fn set_material_specular_color(&self, gl: &glow::Context, color: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.material_specular_color.as_ref(),
                color[0],
                color[1],
                color[2],
            )
        }
    }

    pub fn set_material_shininess(&self, gl: &glow::Context, shininess: f32) {
        unsafe { gl.uniform_1_f32(self.material_shininess.as_ref(), shininess) }
    }

    pub fn set_material_alpha(&self, gl: &glow::Context, alpha: f32) {
        unsafe { gl.uniform_1_f32(self.material_alpha.as_ref(), alpha) }
    }

    pub fn set_light_position(&self, gl: &glow::Context, position: [f32; 4]) {
        unsafe {
            gl.uniform_4_f32(
                self.light_position.as_ref(),
                position[0],
                position[1],
                position[2],
                position[3],
            )
        }
    }

    pub fn set_light_ambient_color(&self, gl: &glow::Context, color: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.light_ambient_color.as_ref(),
                color[0],
                color[1],
                color[2],
            )
        }
    }

    pub fn set_light_diffuse_color(&self, gl: &glow::Context, color: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.light_diffuse_color.as_ref(),
                color[0],
                color[1],
                color[2],
            )
        }
    }

    pub fn set_light_specular_color(&self, gl: &glow::Context, color: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.light_specular_color.as_ref(),
                color[0],
                color[1],
                color[2],
            )
        }
    }

    pub fn set_eye_position(&self, gl: &glow::Context, position: Vec3) {
        unsafe {
            gl.uniform_3_f32(
                self.eye_position.as_ref(),
                position[0],
                position[1],
                position[2],
            )
        }
    }

    pub fn set_tex_sampler(&self, gl: &glow::Context, unit: i32) {
        unsafe { gl.uniform_1_i32(self.tex_sampler.as_ref(), unit) }
    }

    pub fn set_tex_repeat_factor(&self, gl: &glow::Context, factor: f32) {
        unsafe { gl.uniform_1_f32(self.tex_repeat_factor.as_ref(), factor) }
    }
}
