//! Shader program construction: load two GLSL sources from disk, compile
//! both stages, optionally pin attribute locations, link.
//!
//! Any failure tears down the GL objects created so far and surfaces the
//! driver's info log in the error. Callers treat a failed program build as
//! fatal to startup; the library itself never exits.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use glow::HasContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("cannot read shader source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("shader source {path} is empty")]
    EmptySource { path: PathBuf },
    #[error("failed to compile {stage} shader {path}: {log}")]
    Compile {
        stage: &'static str,
        path: PathBuf,
        log: String,
    },
    #[error("failed to link program ({vertex} + {fragment}): {log}")]
    Link {
        vertex: PathBuf,
        fragment: PathBuf,
        log: String,
    },
    #[error("GL object creation failed: {0}")]
    Create(String),
}

/// Attribute name to index associations applied before linking, so the
/// host does not depend on the compiler's automatic assignment.
pub type AttribBinding<'a> = (u32, &'a str);

/// Reads a shader source file. Missing or empty files fail here, before
/// any GL object exists.
pub fn load_shader_source(path: &Path) -> Result<String, ShaderError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if source.trim().is_empty() {
        return Err(ShaderError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    Ok(source)
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

pub fn load_and_compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    path: &Path,
) -> Result<glow::Shader, ShaderError> {
    let source = load_shader_source(path)?;
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
        gl.shader_source(shader, &source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile {
                stage: stage_name(shader_type),
                path: path.to_path_buf(),
                log,
            });
        }
        Ok(shader)
    }
}

/// Builds a linked program from a vertex and a fragment source file.
/// No GPU resource outlives a failure: the vertex stage is released when
/// the fragment stage fails, and both stages plus the program are released
/// when the link fails.
pub fn create_and_link_program(
    gl: &glow::Context,
    vertex_path: &Path,
    fragment_path: &Path,
    attrib_bindings: &[AttribBinding],
) -> Result<glow::Program, ShaderError> {
    let vertex = load_and_compile_shader(gl, glow::VERTEX_SHADER, vertex_path)?;

    let fragment = match load_and_compile_shader(gl, glow::FRAGMENT_SHADER, fragment_path) {
        Ok(fragment) => fragment,
        Err(err) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(msg) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ShaderError::Create(msg));
            }
        };
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);

        for (index, name) in attrib_bindings {
            gl.bind_attrib_location(program, *index, name);
        }

        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            gl.delete_program(program);
            return Err(ShaderError::Link {
                vertex: vertex_path.to_path_buf(),
                fragment: fragment_path.to_path_buf(),
                log,
            });
        }

        // Stages are owned by the linked program from here on.
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
        Ok(program)
    }
}

/// Top-level fatal-setup helper: give the user a chance to read the
/// diagnostic, then terminate with a failing status. Only `main` calls
/// this, and only for errors the application cannot start without.
pub fn wait_for_enter_and_exit() -> ! {
    eprintln!("Press Enter to exit");
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_source_file_is_an_error() {
        let err = load_shader_source(Path::new("no/such/vertex.glsl")).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
    }

    #[test]
    fn blank_source_file_is_an_error() {
        let path = std::env::temp_dir().join("museum_blank_shader_test.glsl");
        std::fs::File::create(&path)
            .and_then(|mut f| f.write_all(b"  \n\t\n"))
            .unwrap();
        let err = load_shader_source(&path).unwrap_err();
        assert!(matches!(err, ShaderError::EmptySource { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn readable_source_round_trips() {
        let path = std::env::temp_dir().join("museum_shader_roundtrip_test.glsl");
        std::fs::write(&path, "void main() {}\n").unwrap();
        assert_eq!(load_shader_source(&path).unwrap(), "void main() {}\n");
        let _ = std::fs::remove_file(&path);
    }
}
