use std::ffi::CString;
use std::ptr;

use gl::types::{GLchar, GLint, GLuint};

use super::source::ShaderSourcePair;
use super::{ShaderError, ShaderStage};

/// A linked GPU program built from a vertex/fragment source pair.
///
/// Requires a current OpenGL context. The program is deleted when the
/// value is dropped.
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    pub fn from_pair(pair: &ShaderSourcePair) -> Result<Self, ShaderError> {
        Self::from_source(&pair.vertex, &pair.fragment)
    }

    pub fn from_source(vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        let vertex_shader = compile_stage(ShaderStage::Vertex, vertex)?;
        let fragment_shader = match compile_stage(ShaderStage::Fragment, fragment) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe {
                    gl::DeleteShader(vertex_shader);
                }
                return Err(err);
            }
        };

        let program = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(program, vertex_shader);
            gl::AttachShader(program, fragment_shader);
            gl::LinkProgram(program);
            gl::ValidateProgram(program);
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
        }

        let mut success = 1;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = program_info_log(program);
            unsafe {
                gl::DeleteProgram(program);
            }
            return Err(ShaderError::Link(log));
        }

        unsafe {
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success);
        }
        if success == 0 {
            let log = program_info_log(program);
            unsafe {
                gl::DeleteProgram(program);
            }
            return Err(ShaderError::Link(log));
        }

        Ok(ShaderProgram { id: program })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<GLuint, ShaderError> {
    let source_cstring = CString::new(source.as_bytes())?;

    let shader = unsafe { gl::CreateShader(stage.gl_kind()) };
    unsafe {
        gl::ShaderSource(shader, 1, &source_cstring.as_ptr(), ptr::null());
        gl::CompileShader(shader);
    }

    let mut success = 1;
    unsafe {
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    }
    if success == 0 {
        let log = shader_info_log(shader);
        unsafe {
            gl::DeleteShader(shader);
        }
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().into_owned()
}

fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().into_owned()
}

fn create_whitespace_cstring_with_len(len: usize) -> CString {
    // Allocate buffer of correct size
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    // Fill it with spaces
    buffer.extend([b' '].iter().cycle().take(len));
    // Convert buffer to CString
    unsafe { CString::from_vec_unchecked(buffer) }
}
