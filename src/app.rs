use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::ContextError;

use crate::error::Result;
use crate::graphics::opengl::{clear, set_wireframe, GlProgram};
use crate::graphics::quad::{build_quad_program, QuadScene, CLEAR_COLOR};
use crate::graphics::window::{create_window, framebuffer_resized};
use crate::interface::cli::Config;

/// GL objects that have to go away before the context does.
struct Resources {
    program: GlProgram,
    scene: QuadScene,
}

impl Resources {
    fn render(&self) {
        clear(CLEAR_COLOR);
        self.program.set_used();
        self.scene.draw();
    }
}

/// Opens the window and draws the quad until the window is closed or Escape is pressed. Only
/// returns if setting up fails; once the event loop starts, the process exits from inside it.
pub fn run(config: Config) -> Result<()> {
    let events = EventLoop::new();
    let context = create_window(&config, &events)?;

    let scene = QuadScene::upload(config.mode);
    let program = build_quad_program(&config)?;

    if config.wireframe {
        info!("wireframe mode on");
        set_wireframe(true);
    }

    info!("drawing {} quad, press Escape to quit", scene.mode());
    let mut resources = Some(Resources { program, scene });

    // ControlFlow starts out as Poll, so this redraws as fast as vsync allows
    events.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(VirtualKeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                info!("escape pressed");
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::Resized(size) => framebuffer_resized(&context, size),
            _ => (),
        },
        Event::MainEventsCleared => context.window().request_redraw(),
        Event::RedrawRequested(_) => {
            if let Some(resources) = &resources {
                resources.render();
            }

            match context.swap_buffers() {
                Ok(()) => (),
                Err(ContextError::ContextLost) => {
                    error!("OpenGL context lost");
                    *control_flow = ControlFlow::Exit;
                }
                Err(e) => warn!("failed to swap buffers: {}", e),
            }
        }
        Event::LoopDestroyed => {
            // program first, then the element buffer, vertex buffer and vertex array
            if let Some(Resources { program, scene }) = resources.take() {
                drop(program);
                drop(scene);
            }
            info!("shut down");
        }
        _ => (),
    })
}
