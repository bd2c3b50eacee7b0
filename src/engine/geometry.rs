//! GPU geometry handles: a VAO, the buffers behind it and one draw
//! descriptor.
//!
//! Exactly one of the two draw counts is non-zero for any geometry:
//! indexed meshes set `draw_elements_count`, flat triangle soups set
//! `draw_arrays_count`. All fields are plain copyable GPU handles; the
//! underlying resources are shared by copies and released only through
//! the explicit [`Geometry::release`] call, never on drop, because
//! deleting GL objects after context teardown is undefined behavior.

use glow::HasContext;

use crate::engine::locations::VertexAttribs;
use crate::engine::obj::MeshData;

const FLOATS_PER_INTERLEAVED_VERTEX: i32 = 8;
const INTERLEAVED_STRIDE: i32 = FLOATS_PER_INTERLEAVED_VERTEX * 4;

#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub vao: glow::VertexArray,
    pub vertex_buffers: [Option<glow::Buffer>; 3],
    pub index_buffer: Option<glow::Buffer>,
    /// Primitive topology (`glow::TRIANGLES`, `TRIANGLE_STRIP`, ...).
    pub mode: u32,
    pub draw_arrays_count: i32,
    pub draw_elements_count: i32,
}

impl Geometry {
    /// Issues the draw call for this geometry. The VAO must already be
    /// bound; binding is left to the render pass so a sequence of draws
    /// against the same geometry binds once.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            if self.draw_arrays_count > 0 {
                gl.draw_arrays(self.mode, 0, self.draw_arrays_count);
            }
            if self.draw_elements_count > 0 {
                gl.draw_elements(self.mode, self.draw_elements_count, glow::UNSIGNED_INT, 0);
            }
        }
    }

    /// Releases the GPU resources. Only legal while the GL context is
    /// still alive.
    pub fn release(self, gl: &glow::Context) {
        unsafe {
            for buffer in self.vertex_buffers.into_iter().flatten() {
                gl.delete_buffer(buffer);
            }
            if let Some(index_buffer) = self.index_buffer {
                gl.delete_buffer(index_buffer);
            }
            gl.delete_vertex_array(self.vao);
        }
    }
}

/// Unit cube spanning [-1, 1] on every axis, 24 vertices interleaved as
/// position(3) + normal(3) + texcoord(2), indexed as a triangle list.
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 192] = [
    // +z
    -1.0, -1.0,  1.0,   0.0,  0.0,  1.0,   0.0, 0.0,
     1.0, -1.0,  1.0,   0.0,  0.0,  1.0,   1.0, 0.0,
     1.0,  1.0,  1.0,   0.0,  0.0,  1.0,   1.0, 1.0,
    -1.0,  1.0,  1.0,   0.0,  0.0,  1.0,   0.0, 1.0,
    // -z
     1.0, -1.0, -1.0,   0.0,  0.0, -1.0,   0.0, 0.0,
    -1.0, -1.0, -1.0,   0.0,  0.0, -1.0,   1.0, 0.0,
    -1.0,  1.0, -1.0,   0.0,  0.0, -1.0,   1.0, 1.0,
     1.0,  1.0, -1.0,   0.0,  0.0, -1.0,   0.0, 1.0,
    // +x
     1.0, -1.0,  1.0,   1.0,  0.0,  0.0,   0.0, 0.0,
     1.0, -1.0, -1.0,   1.0,  0.0,  0.0,   1.0, 0.0,
     1.0,  1.0, -1.0,   1.0,  0.0,  0.0,   1.0, 1.0,
     1.0,  1.0,  1.0,   1.0,  0.0,  0.0,   0.0, 1.0,
    // -x
    -1.0, -1.0, -1.0,  -1.0,  0.0,  0.0,   0.0, 0.0,
    -1.0, -1.0,  1.0,  -1.0,  0.0,  0.0,   1.0, 0.0,
    -1.0,  1.0,  1.0,  -1.0,  0.0,  0.0,   1.0, 1.0,
    -1.0,  1.0, -1.0,  -1.0,  0.0,  0.0,   0.0, 1.0,
    // +y
    -1.0,  1.0,  1.0,   0.0,  1.0,  0.0,   0.0, 0.0,
     1.0,  1.0,  1.0,   0.0,  1.0,  0.0,   1.0, 0.0,
     1.0,  1.0, -1.0,   0.0,  1.0,  0.0,   1.0, 1.0,
    -1.0,  1.0, -1.0,   0.0,  1.0,  0.0,   0.0, 1.0,
    // -y
    -1.0, -1.0, -1.0,   0.0, -1.0,  0.0,   0.0, 0.0,
     1.0, -1.0, -1.0,   0.0, -1.0,  0.0,   1.0, 0.0,
     1.0, -1.0,  1.0,   0.0, -1.0,  0.0,   1.0, 1.0,
    -1.0, -1.0,  1.0,   0.0, -1.0,  0.0,   0.0, 1.0,
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,   0,  2,  3,
     4,  5,  6,   4,  6,  7,
     8,  9, 10,   8, 10, 11,
    12, 13, 14,  12, 14, 15,
    16, 17, 18,  16, 18, 19,
    20, 21, 22,  20, 22, 23,
];

/// Unit quad in the z = 0 plane facing +z, spanning [-1, 1] in x and y.
#[rustfmt::skip]
pub const RECTANGLE_VERTICES: [f32; 32] = [
    -1.0, -1.0, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0,
     1.0, -1.0, 0.0,   0.0, 0.0, 1.0,   1.0, 0.0,
     1.0,  1.0, 0.0,   0.0, 0.0, 1.0,   1.0, 1.0,
    -1.0,  1.0, 0.0,   0.0, 0.0, 1.0,   0.0, 1.0,
];

pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub fn create_cube(gl: &glow::Context, attribs: &VertexAttribs) -> Result<Geometry, String> {
    create_interleaved(gl, attribs, &CUBE_VERTICES, &CUBE_INDICES)
}

pub fn create_rectangle(gl: &glow::Context, attribs: &VertexAttribs) -> Result<Geometry, String> {
    create_interleaved(gl, attribs, &RECTANGLE_VERTICES, &RECTANGLE_INDICES)
}

fn create_interleaved(
    gl: &glow::Context,
    attribs: &VertexAttribs,
    vertices: &[f32],
    indices: &[u32],
) -> Result<Geometry, String> {
    unsafe {
        let vertex_buffer = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            glow::STATIC_DRAW,
        );

        let index_buffer = gl.create_buffer()?;

        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        if let Some(loc) = attribs.position {
            gl.enable_vertex_attrib_array(loc);
            gl.vertex_attrib_pointer_f32(loc, 3, glow::FLOAT, false, INTERLEAVED_STRIDE, 0);
        }
        if let Some(loc) = attribs.normal {
            gl.enable_vertex_attrib_array(loc);
            gl.vertex_attrib_pointer_f32(loc, 3, glow::FLOAT, false, INTERLEAVED_STRIDE, 12);
        }
        if let Some(loc) = attribs.tex_coord {
            gl.enable_vertex_attrib_array(loc);
            gl.vertex_attrib_pointer_f32(loc, 2, glow::FLOAT, false, INTERLEAVED_STRIDE, 24);
        }
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(index_buffer));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            glow::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        Ok(Geometry {
            vao,
            vertex_buffers: [Some(vertex_buffer), None, None],
            index_buffer: Some(index_buffer),
            mode: glow::TRIANGLES,
            draw_arrays_count: 0,
            draw_elements_count: indices.len() as i32,
        })
    }
}

/// Uploads parsed OBJ output as three split buffers. The soup is
/// non-indexed, so this geometry draws with `draw_arrays`.
pub fn create_from_mesh_data(
    gl: &glow::Context,
    attribs: &VertexAttribs,
    mesh: &MeshData,
) -> Result<Geometry, String> {
    let positions: Vec<f32> = mesh.positions.iter().flatten().copied().collect();
    let normals: Vec<f32> = mesh.normals.iter().flatten().copied().collect();
    let tex_coords: Vec<f32> = mesh.tex_coords.iter().flatten().copied().collect();

    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let upload = |location: Option<u32>,
                      data: &[f32],
                      size: i32|
         -> Result<Option<glow::Buffer>, String> {
            let buffer = gl.create_buffer()?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
            if let Some(loc) = location {
                gl.enable_vertex_attrib_array(loc);
                gl.vertex_attrib_pointer_f32(loc, size, glow::FLOAT, false, 0, 0);
            }
            Ok(Some(buffer))
        };

        let position_buffer = upload(attribs.position, &positions, 3)?;
        let normal_buffer = upload(attribs.normal, &normals, 3)?;
        let tex_coord_buffer = upload(attribs.tex_coord, &tex_coords, 2)?;

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(Geometry {
            vao,
            vertex_buffers: [position_buffer, normal_buffer, tex_coord_buffer],
            index_buffer: None,
            mode: glow::TRIANGLES,
            draw_arrays_count: mesh.vertex_count() as i32,
            draw_elements_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_indices_reference_valid_vertices() {
        let vertex_count = (CUBE_VERTICES.len() / FLOATS_PER_INTERLEAVED_VERTEX as usize) as u32;
        assert_eq!(vertex_count, 24);
        assert_eq!(CUBE_INDICES.len(), 36);
        assert!(CUBE_INDICES.iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn cube_normals_are_axis_aligned_unit_vectors() {
        for vertex in CUBE_VERTICES.chunks(FLOATS_PER_INTERLEAVED_VERTEX as usize) {
            let n = &vertex[3..6];
            let len_sq: f32 = n.iter().map(|c| c * c).sum();
            assert!((len_sq - 1.0).abs() < 1e-6);
            assert_eq!(n.iter().filter(|c| **c != 0.0).count(), 1);
        }
    }

    #[test]
    fn rectangle_lies_in_z0_facing_forward() {
        for vertex in RECTANGLE_VERTICES.chunks(FLOATS_PER_INTERLEAVED_VERTEX as usize) {
            assert_eq!(vertex[2], 0.0);
            assert_eq!(&vertex[3..6], &[0.0, 0.0, 1.0]);
        }
        assert!(RECTANGLE_INDICES.iter().all(|&i| i < 4));
    }
}
