use std::mem;
use std::ptr;

use gl::types::{GLsizei, GLuint};

/// 2D positions of the bootstrap triangle, in clip space.
pub const TRIANGLE_VERTICES: [f32; 6] = [
    -0.5, -0.5, //
    0.0, 0.5, //
    0.5, -0.5,
];

/// A static mesh of 2-component positions uploaded once at startup.
///
/// Requires a current OpenGL context. VAO and VBO are deleted on drop.
pub struct TriangleMesh {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLsizei,
}

impl TriangleMesh {
    /// Uploads `positions` (x,y pairs) into a fresh VAO/VBO with
    /// attribute 0 bound to the position data.
    pub fn new(positions: &[f32]) -> Self {
        debug_assert_eq!(positions.len() % 2, 0, "positions are x,y pairs");

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (positions.len() * mem::size_of::<f32>()) as isize,
                positions.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::VertexAttribPointer(
                0,
                2,
                gl::FLOAT,
                gl::FALSE,
                2 * mem::size_of::<f32>() as i32,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(0);
        }

        Self {
            vao,
            vbo,
            vertex_count: (positions.len() / 2) as GLsizei,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
        }
    }
}

impl Drop for TriangleMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}
