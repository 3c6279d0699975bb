//! A small set of safe wrappers around the raw OpenGL calls needed to draw the quad.
//!
//! Every object here owns the GL name it was created with and deletes it on `Drop`, so the usual
//! create-before-use / destroy-after-use ordering falls out of Rust's ownership rules. All of them
//! assume a current context with loaded function pointers (see [`super::window::create_window`]).

use std::ffi::{c_void, CString};
use std::fmt;
use std::mem::size_of;
use std::path::Path;
use std::ptr::null;

use gl::types::*;
use geometry::VertexAttribute;

use super::utils::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlShaderType {
    Vertex = gl::VERTEX_SHADER as isize,
    Fragment = gl::FRAGMENT_SHADER as isize,
}

impl GlShaderType {
    pub fn gl_enum(self) -> GLenum {
        self as GLenum
    }

    pub fn name(self) -> &'static str {
        match self {
            GlShaderType::Vertex => "vertex",
            GlShaderType::Fragment => "fragment",
        }
    }
}

impl fmt::Display for GlShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a shader object. Compilation may have failed, in which case the object is kept
/// around anyway: attaching it makes the program fail to link, which is how a bad shader shows up.
pub struct GlShader {
    id: GLuint,
    kind: GlShaderType,
    log: Option<String>,
}

impl GlShader {
    pub fn id(&self) -> GLuint { self.id }

    pub fn kind(&self) -> GlShaderType { self.kind }

    /// The compile failure, if there was one.
    pub fn compile_error(&self) -> Option<Error> {
        self.log.as_ref().map(|log| Error::ShaderCompile {
            kind: self.kind,
            log: log.clone(),
        })
    }

    pub fn compile(src: &str, kind: GlShaderType) -> Self {
        let (id, log) = match CString::new(src) {
            Ok(source) => shader_from_source(&source, kind),
            Err(e) => {
                // never reaches the compiler, so the object stays uncompiled
                let id = unsafe { gl::CreateShader(kind.gl_enum()) };
                let log = format!("source contains a NUL byte at offset {}", e.nul_position());
                (id, Some(log))
            }
        };

        match log {
            None => debug!("compiled {} shader {}", kind, id),
            Some(_) => debug!("{} shader {} failed to compile", kind, id),
        }

        Self { id, kind, log }
    }

    /// Reads and compiles a shader file. Only an unreadable file is an error here; compile
    /// failures are reported through [`GlShader::compile_error`].
    pub fn from_file(path: &Path, kind: GlShaderType) -> Result<Self> {
        let source = read_shader_source(path)?;
        info!("loading {} shader from {}", kind, path.display());
        Ok(Self::compile(&source, kind))
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// Represents the graphics pipeline.
pub struct GlProgram {
    id: GLuint,
    linked: bool,
}

impl GlProgram {
    pub fn id(&self) -> GLuint { self.id }

    pub fn is_linked(&self) -> bool { self.linked }

    /// Links whatever shaders are given. A program that failed to link is still returned (and
    /// can still be bound, it just won't draw anything useful); check [`GlProgram::is_linked`].
    pub fn link(shaders: &[GlShader]) -> Self {
        let id = unsafe { gl::CreateProgram() };

        unsafe {
            for shader in shaders {
                gl::AttachShader(id, shader.id());
            }

            gl::LinkProgram(id);
        }

        let mut success = 1;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);

            for shader in shaders {
                gl::DetachShader(id, shader.id());
            }
        }

        Self { id, linked: success != 0 }
    }

    pub fn info_log(&self) -> String {
        program_info_log(self.id)
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for GlProgram {
    fn drop(&mut self) {
        debug!("deleting shader program {}", self.id);
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

/// Remembers which buffers are bound and how the vertex attributes read them.
pub struct GlVertexArray {
    id: GLuint,
}

impl GlVertexArray {
    pub fn generate() -> Self {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        Self { id: vao }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }

    pub fn unbind() {
        unsafe { gl::BindVertexArray(0) };
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        debug!("deleting vertex array {}", self.id);
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlBufferType {
    Array = gl::ARRAY_BUFFER as isize,
    Element = gl::ELEMENT_ARRAY_BUFFER as isize,
}

impl GlBufferType {
    pub fn gl_enum(self) -> GLenum {
        self as GLenum
    }
}

/// Represents a vertex buffer object (VBO): vertex data that lives on the graphics card.
pub struct GlVertexBuffer {
    id: GLuint,
}

impl GlVertexBuffer {
    pub fn init(data: &[f32]) -> Self {
        let vbo = Self::generate();
        vbo.bind();
        buffer_data(GlBufferType::Array, data);

        vbo
    }

    pub fn generate() -> Self {
        Self { id: generate_buffer() }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id); }
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        debug!("deleting vertex buffer {}", self.id);
        delete_buffer(self.id);
    }
}

/// Represents an element buffer object (EBO), a list of vertex indices. This way, to draw a
/// rectangle (two triangles sharing a side), the shared vertices don't need to be sent twice.
pub struct GlElementBuffer {
    id: GLuint,
}

impl GlElementBuffer {
    pub fn init(data: &[u32]) -> Self {
        let ebo = Self::generate();
        ebo.bind();
        buffer_data(GlBufferType::Element, data);

        ebo
    }

    pub fn generate() -> Self {
        Self { id: generate_buffer() }
    }

    /// Binds to the current vertex array, which keeps the binding.
    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id); }
    }
}

impl Drop for GlElementBuffer {
    fn drop(&mut self) {
        debug!("deleting element buffer {}", self.id);
        delete_buffer(self.id);
    }
}

fn generate_buffer() -> GLuint {
    let mut id = 0;
    unsafe { gl::GenBuffers(1, &mut id) };
    id
}

fn delete_buffer(id: GLuint) {
    unsafe { gl::DeleteBuffers(1, &id) };
}

/// Copies `data` into whatever buffer is bound to `buffer_type`.
fn buffer_data<T>(buffer_type: GlBufferType, data: &[T]) {
    unsafe {
        gl::BufferData(
            buffer_type.gl_enum(),
            (data.len() * size_of::<T>()) as GLsizeiptr,
            data.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        );
    }
}

pub fn unbind_buffers(buffer_type: GlBufferType) {
    unsafe { gl::BindBuffer(buffer_type.gl_enum(), 0); }
}

/// Tells OpenGL how to read `attribute` out of the bound array buffer, and turns it on.
pub fn set_vertex_attrib(attribute: &VertexAttribute) {
    unsafe {
        gl::VertexAttribPointer(
            attribute.index,
            attribute.components,
            gl::FLOAT,
            gl::FALSE,
            attribute.stride_bytes() as GLsizei,
            attribute.offset_bytes() as *const c_void,
        );
        gl::EnableVertexAttribArray(attribute.index);
    }
}

pub fn set_wireframe(enabled: bool) {
    let mode = if enabled { gl::LINE } else { gl::FILL };
    unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) };
}

pub fn clear(color: [f32; 4]) {
    let [r, g, b, a] = color;
    unsafe {
        gl::ClearColor(r, g, b, a);
        gl::Clear(gl::COLOR_BUFFER_BIT);
    }
}

/// `count` is the number of indices (with an element buffer bound) or vertices (without).
pub fn draw_triangles(count: usize, indexed: bool) {
    unsafe {
        if indexed {
            gl::DrawElements(gl::TRIANGLES, count as GLsizei, gl::UNSIGNED_INT, null());
        } else {
            gl::DrawArrays(gl::TRIANGLES, 0, count as GLsizei);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shader_types_map_to_gl_enums() {
        assert_eq!(GlShaderType::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(GlShaderType::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
        assert_eq!(GlShaderType::Fragment.to_string(), "fragment");
    }

    #[test]
    fn buffer_types_map_to_gl_enums() {
        assert_eq!(GlBufferType::Array.gl_enum(), gl::ARRAY_BUFFER);
        assert_eq!(GlBufferType::Element.gl_enum(), gl::ELEMENT_ARRAY_BUFFER);
    }
}
