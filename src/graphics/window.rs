use glutin::dpi::{LogicalSize, PhysicalSize};
use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};

use super::utils::gl_string;
use crate::error::{Error, Result};
use crate::interface::cli::Config;

pub type GlContext = WindowedContext<PossiblyCurrent>;

pub const GL_VERSION: (u8, u8) = (3, 3);

/// Opens the window, creates an OpenGL 3.3 core context for it, makes it current and loads the
/// GL function pointers.
pub fn create_window(config: &Config, events: &EventLoop<()>) -> Result<GlContext> {
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
        .with_gl_profile(GlProfile::Core)
        .with_vsync(config.vsync)
        .build_windowed(window, events)?;

    let context = unsafe { context.make_current() }.map_err(|(_, e)| Error::MakeCurrent(e))?;

    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

    if !gl::Viewport::is_loaded() || !gl::CreateShader::is_loaded() {
        return Err(Error::FunctionsNotLoaded);
    }

    info!(
        "created {}x{} window \"{}\"",
        config.width, config.height, config.title
    );
    info!(
        "OpenGL {} on {}",
        gl_string(gl::VERSION).unwrap_or_else(|| String::from("(unknown version)")),
        gl_string(gl::RENDERER).unwrap_or_else(|| String::from("(unknown renderer)"))
    );

    // The framebuffer can be larger than the logical size on HiDPI screens
    set_viewport(context.window().inner_size());

    Ok(context)
}

/// Keeps the context surface and the viewport in step with the window's framebuffer.
pub fn framebuffer_resized(context: &GlContext, size: PhysicalSize<u32>) {
    if viewport_for(size).is_none() {
        debug!("ignoring resize to {}x{}", size.width, size.height);
        return;
    }

    debug!("framebuffer resized to {}x{}", size.width, size.height);
    context.resize(size);
    set_viewport(size);
}

fn set_viewport(size: PhysicalSize<u32>) {
    if let Some((width, height)) = viewport_for(size) {
        unsafe { gl::Viewport(0, 0, width, height) };
    }
}

/// The `glViewport` extent for a framebuffer, or `None` when it has no area (e.g. minimized).
pub fn viewport_for(size: PhysicalSize<u32>) -> Option<(i32, i32)> {
    if size.width == 0 || size.height == 0 {
        return None;
    }

    let clamp = |n: u32| n.min(i32::MAX as u32) as i32;
    Some((clamp(size.width), clamp(size.height)))
}
