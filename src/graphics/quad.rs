use geometry::{DrawMode, Mesh};

use super::opengl::*;
use crate::error::{Error, Result};
use crate::interface::cli::Config;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub const QUAD_VERT_SRC: &str = include_str!("shaders/quad.vert");
pub const QUAD_FRAG_SRC: &str = include_str!("shaders/quad.frag");

/// The quad's GPU-side state. Fields drop top to bottom, which deletes the buffers in reverse
/// creation order.
pub struct QuadScene {
    ebo: Option<GlElementBuffer>,
    vbo: GlVertexBuffer,
    vao: GlVertexArray,
    mode: DrawMode,
    count: usize,
}

impl QuadScene {
    /// Uploads the quad for `mode`. Must run after the context is current.
    pub fn upload(mode: DrawMode) -> Self {
        let mesh = Mesh::quad(mode);

        let vao = GlVertexArray::generate();
        vao.bind();

        let vbo = GlVertexBuffer::init(mesh.vertices);
        let ebo = mesh.indices.map(GlElementBuffer::init);

        set_vertex_attrib(&mesh.layout);

        // The element buffer binding belongs to the VAO, so only the array buffer gets unbound
        GlVertexArray::unbind();
        unbind_buffers(GlBufferType::Array);

        info!(
            "uploaded {} quad: {} vertices ({} bytes), {} indices ({} bytes)",
            mode,
            mesh.vertex_count(),
            mesh.vertex_bytes(),
            mesh.indices.map_or(0, |i| i.len()),
            mesh.index_bytes()
        );

        QuadScene {
            ebo,
            vbo,
            vao,
            mode,
            count: mesh.element_count(),
        }
    }

    pub fn mode(&self) -> DrawMode { self.mode }

    pub fn draw(&self) {
        self.vao.bind();
        draw_triangles(self.count, self.ebo.is_some());
    }
}

/// Whether a program built from these shaders can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    Ready,
    Broken,
}

/// A vertex shader that doesn't compile stops the program; any other stage just leaves it with
/// a broken shader.
pub fn compile_failure_is_fatal(kind: GlShaderType) -> bool {
    kind == GlShaderType::Vertex
}

/// A program is only usable if it linked *and* every stage compiled. A driver may still link a
/// program whose fragment shader failed, since the stage is optional in core profile.
pub fn program_status(failed_stages: &[GlShaderType], linked: bool) -> ProgramStatus {
    if linked && failed_stages.is_empty() {
        ProgramStatus::Ready
    } else {
        ProgramStatus::Broken
    }
}

/// Compiles the vertex and fragment shaders (the built-in ones unless the config points at
/// files) and links them.
///
/// Shaders that fail to compile are still attached, so the link fails too and the returned
/// program draws nothing. Only a broken vertex shader or an unreadable file is an error.
pub fn build_quad_program(config: &Config) -> Result<GlProgram> {
    let stages = [
        (GlShaderType::Vertex, config.vertex_shader.as_deref(), QUAD_VERT_SRC),
        (GlShaderType::Fragment, config.fragment_shader.as_deref(), QUAD_FRAG_SRC),
    ];

    let mut shaders = Vec::with_capacity(stages.len());
    let mut failed = Vec::new();

    for &(kind, path, builtin) in stages.iter() {
        let shader = match path {
            Some(path) => GlShader::from_file(path, kind)?,
            None => GlShader::compile(builtin, kind),
        };

        if let Some(e) = shader.compile_error() {
            if compile_failure_is_fatal(kind) {
                return Err(e);
            }
            error!("{}", e);
            failed.push(kind);
        }

        shaders.push(shader);
    }

    let program = GlProgram::link(&shaders);

    match program_status(&failed, program.is_linked()) {
        ProgramStatus::Ready => {
            let stages: Vec<_> = shaders.iter().map(|s| s.kind().name()).collect();
            info!("linked shader program {} ({})", program.id(), stages.join(" + "));
        }
        ProgramStatus::Broken if !program.is_linked() => {
            error!("{}", Error::ProgramLink { log: program.info_log() });
        }
        ProgramStatus::Broken => {
            let missing: Vec<_> = failed.iter().map(|k| k.name()).collect();
            error!(
                "shader program {} linked without a working {} shader, nothing will be drawn",
                program.id(),
                missing.join(" or ")
            );
        }
    }

    // the shaders are deleted here, once they're no longer needed for linking
    drop(shaders);

    Ok(program)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_vertex_compile_failures_are_fatal() {
        assert!(compile_failure_is_fatal(GlShaderType::Vertex));
        assert!(!compile_failure_is_fatal(GlShaderType::Fragment));
    }

    #[test]
    fn program_is_ready_when_everything_compiled_and_linked() {
        assert_eq!(program_status(&[], true), ProgramStatus::Ready);
    }

    #[test]
    fn failed_fragment_shader_breaks_a_program_even_if_it_linked() {
        assert_eq!(
            program_status(&[GlShaderType::Fragment], true),
            ProgramStatus::Broken
        );
        assert_eq!(
            program_status(&[GlShaderType::Fragment], false),
            ProgramStatus::Broken
        );
    }

    #[test]
    fn link_failure_breaks_the_program() {
        assert_eq!(program_status(&[], false), ProgramStatus::Broken);
    }

    #[test]
    fn built_in_shaders_agree_on_the_interface() {
        assert!(QUAD_VERT_SRC.contains("layout (location = 0) in vec3 aPos;"));
        assert!(QUAD_VERT_SRC.contains("out vec3 pos;"));
        assert!(QUAD_FRAG_SRC.contains("in vec3 pos;"));
        assert!(QUAD_VERT_SRC.starts_with("#version 330 core"));
        assert!(QUAD_FRAG_SRC.starts_with("#version 330 core"));
    }
}
