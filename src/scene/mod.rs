//! Scene ownership and the per-frame render pass.
//!
//! `Scene::new` builds the shading program, resolves every uniform and
//! attribute location once, uploads all geometry and loads the textures.
//! A missing model or texture is not fatal: the failure is logged and the
//! scene renders without it (empty geometry, plain white fallback
//! texture). Only a broken shading program aborts construction.

pub mod layout;

use std::path::Path;

use glow::HasContext;
use thiserror::Error;

use crate::engine::camera::Camera;
use crate::engine::geometry::{self, Geometry};
use crate::engine::locations::{ShaderLocations, VertexAttribs};
use crate::engine::math::{mat4x4_look_at, mat4x4_mul, mat4x4_perspective, normal_matrix};
use crate::engine::obj::{self, MeshData};
use crate::engine::shader::{self, ShaderError};
use crate::engine::texture;

use layout::{FrameState, GeometryKind, TextureKind, PLACEMENTS};

const VERTEX_SHADER_PATH: &str = "assets/shaders/vertex.glsl";
const FRAGMENT_SHADER_PATH: &str = "assets/shaders/fragment.glsl";
const STATUE_MODEL_PATH: &str = "assets/models/statue.obj";
const WALL_TEXTURE_PATH: &str = "assets/textures/wall.png";
const PAVING_TEXTURE_PATH: &str = "assets/textures/paving.png";
const WOOD_TEXTURE_PATH: &str = "assets/textures/wood.png";

const FOV_Y_RADIANS: f32 = 45.0 * std::f32::consts::PI / 180.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;
const CLEAR_COLOR: [f32; 3] = [0.3, 0.4, 0.3];
const LIGHT_POSITION: [f32; 4] = [0.0, 10.0, 0.0, 1.0];

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("GL object creation failed: {0}")]
    Create(String),
}

pub struct Scene {
    program: glow::Program,
    locations: ShaderLocations,
    cube: Geometry,
    rectangle: Geometry,
    statue: Geometry,
    wall_texture: Option<glow::Texture>,
    paving_texture: Option<glow::Texture>,
    wood_texture: Option<glow::Texture>,
    // Bound for untextured placements so the sampler always reads white.
    white_texture: glow::Texture,
}

impl Scene {
    pub fn new(gl: &glow::Context) -> Result<Self, SceneError> {
        let program = shader::create_and_link_program(
            gl,
            Path::new(VERTEX_SHADER_PATH),
            Path::new(FRAGMENT_SHADER_PATH),
            &[(0, "position"), (1, "normal"), (2, "tex_coord")],
        )?;
        let locations = ShaderLocations::resolve(gl, program);
        let attribs = VertexAttribs::resolve(gl, program);

        let cube = geometry::create_cube(gl, &attribs).map_err(SceneError::Create)?;
        let rectangle = geometry::create_rectangle(gl, &attribs).map_err(SceneError::Create)?;

        let statue_mesh = match obj::load_obj_file(Path::new(STATUE_MODEL_PATH)) {
            Ok(mesh) => mesh,
            Err(err) => {
                log::warn!("statue model unavailable, exhibit stays empty: {err}");
                MeshData::default()
            }
        };
        let statue =
            geometry::create_from_mesh_data(gl, &attribs, &statue_mesh).map_err(SceneError::Create)?;

        Ok(Self {
            program,
            locations,
            cube,
            rectangle,
            statue,
            wall_texture: load_texture_or_warn(gl, WALL_TEXTURE_PATH),
            paving_texture: load_texture_or_warn(gl, PAVING_TEXTURE_PATH),
            wood_texture: load_texture_or_warn(gl, WOOD_TEXTURE_PATH),
            white_texture: create_white_texture(gl).map_err(SceneError::Create)?,
        })
    }

    fn geometry(&self, kind: GeometryKind) -> &Geometry {
        match kind {
            GeometryKind::Cube => &self.cube,
            GeometryKind::Rectangle => &self.rectangle,
            GeometryKind::Statue => &self.statue,
        }
    }

    fn texture(&self, kind: Option<TextureKind>) -> glow::Texture {
        let loaded = match kind {
            Some(TextureKind::Wall) => self.wall_texture,
            Some(TextureKind::Paving) => self.paving_texture,
            Some(TextureKind::Wood) => self.wood_texture,
            None => None,
        };
        loaded.unwrap_or(self.white_texture)
    }

    pub fn render(&self, gl: &glow::Context, camera: &Camera, width: u32, height: u32, frame: &FrameState) {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let projection = mat4x4_perspective(FOV_Y_RADIANS, aspect, NEAR_PLANE, FAR_PLANE);
        let view = mat4x4_look_at(camera.eye_position(), camera.target(), [0.0, 1.0, 0.0]);
        let view_projection = mat4x4_mul(projection, view);

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.use_program(Some(self.program));
        }

        self.locations.set_eye_position(gl, camera.eye_position());
        self.locations.set_light_position(gl, LIGHT_POSITION);
        self.locations.set_light_ambient_color(gl, [0.3, 0.3, 0.3]);
        self.locations.set_light_diffuse_color(gl, [1.0, 1.0, 1.0]);
        self.locations.set_light_specular_color(gl, [1.0, 1.0, 1.0]);
        self.locations.set_tex_sampler(gl, 0);

        for placement in PLACEMENTS {
            let model = (placement.transform)(frame);
            let pvm = mat4x4_mul(view_projection, model);
            self.locations.set_model_matrix(gl, &model);
            self.locations.set_pvm_matrix(gl, &pvm);
            self.locations.set_normal_matrix(gl, &normal_matrix(&model));

            let material = &placement.material;
            self.locations.set_material_ambient_color(gl, material.ambient);
            self.locations.set_material_diffuse_color(gl, material.diffuse);
            self.locations.set_material_specular_color(gl, material.specular);
            self.locations.set_material_shininess(gl, material.shininess);
            self.locations.set_material_alpha(gl, material.alpha);
            self.locations.set_tex_repeat_factor(gl, placement.tex_repeat);

            let geometry = self.geometry(placement.geometry);
            unsafe {
                gl.active_texture(glow::TEXTURE0);
                gl.bind_texture(glow::TEXTURE_2D, Some(self.texture(placement.texture)));

                if placement.transparent {
                    gl.enable(glow::BLEND);
                    gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                }
                gl.bind_vertex_array(Some(geometry.vao));
                geometry.draw(gl);
                if placement.transparent {
                    gl.disable(glow::BLEND);
                }
            }
        }

        unsafe {
            gl.bind_vertex_array(None);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    /// Frees all GL resources. Call before tearing down the context.
    pub fn release(self, gl: &glow::Context) {
        self.cube.release(gl);
        self.rectangle.release(gl);
        self.statue.release(gl);
        unsafe {
            for texture in [
                self.wall_texture,
                self.paving_texture,
                self.wood_texture,
                Some(self.white_texture),
            ]
            .into_iter()
            .flatten()
            {
                gl.delete_texture(texture);
            }
            gl.delete_program(self.program);
        }
    }
}

fn load_texture_or_warn(gl: &glow::Context, path: &str) -> Option<glow::Texture> {
    match texture::load_texture(gl, Path::new(path)) {
        Ok(texture) => Some(texture),
        Err(err) => {
            log::warn!("texture unavailable, falling back to white: {err}");
            None
        }
    }
}

fn create_white_texture(gl: &glow::Context) -> Result<glow::Texture, String> {
    unsafe {
        let texture = gl.create_texture()?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            1,
            1,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(&[255, 255, 255, 255])),
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }
}
