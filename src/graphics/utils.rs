use std::ffi::CStr;
use std::fs;
use std::os::raw::c_char;
use std::path::Path;
use std::ptr::{null, null_mut};

use gl::types::*;

use super::opengl::GlShaderType;
use crate::error::{Error, Result};

/// Compiles `source` into a new shader object. The object is handed back even when compilation
/// fails, together with the driver's info log, so it can still be attached and fail the link.
pub fn shader_from_source(source: &CStr, kind: GlShaderType) -> (GLuint, Option<String>) {
    let id = unsafe { gl::CreateShader(kind.gl_enum()) };
    unsafe {
        gl::ShaderSource(id, 1, &source.as_ptr(), null());
        gl::CompileShader(id);
    }

    let mut success = 1;
    unsafe {
        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
    }

    if success == 0 {
        (id, Some(shader_info_log(id)))
    } else {
        (id, None)
    }
}

pub fn read_shader_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

pub fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    let mut buf = info_log_buffer(len);
    unsafe {
        gl::GetShaderInfoLog(id, len, null_mut(), buf.as_mut_ptr() as *mut GLchar);
    }

    trim_info_log(&buf)
}

pub fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    let mut buf = info_log_buffer(len);
    unsafe {
        gl::GetProgramInfoLog(id, len, null_mut(), buf.as_mut_ptr() as *mut GLchar);
    }

    trim_info_log(&buf)
}

/// A zeroed buffer for `glGet*InfoLog`. `INFO_LOG_LENGTH` already counts the terminating NUL.
pub fn info_log_buffer(len: GLint) -> Vec<u8> {
    vec![0; len.max(1) as usize]
}

/// Cuts an info log at its first NUL and drops the trailing newlines drivers like to add.
pub fn trim_info_log(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let log = String::from_utf8_lossy(&buf[..end]);
    let log = log.trim_end();

    if log.is_empty() {
        String::from("(driver provided no info log)")
    } else {
        log.to_string()
    }
}

/// Reads one of the `glGetString` values (`gl::VERSION`, `gl::RENDERER`, ...).
pub fn gl_string(name: GLenum) -> Option<String> {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            None
        } else {
            Some(
                CStr::from_ptr(ptr as *const c_char)
                    .to_string_lossy()
                    .into_owned(),
            )
        }
    }
}
