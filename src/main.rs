//! Desktop host for the sphere renderer: window, GL context, and the event
//! loop that drives the setup/resize/frame lifecycle.

use std::num::NonZeroU32;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use log::error;
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use orbit_sphere::SphereRenderer;

struct App {
    window: Option<Window>,
    gl_context: Option<glutin::context::PossiblyCurrentContext>,
    gl_surface: Option<glutin::surface::Surface<WindowSurface>>,
    gl: Option<glow::Context>,
    renderer: SphereRenderer,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = event_loop
            .create_window(Window::default_attributes().with_title("Sphere"))
            .unwrap();

        let display_builder = DisplayBuilder::new();
        let (_, gl_config) = display_builder
            .build(event_loop, ConfigTemplateBuilder::new(), |mut c| c.next().unwrap())
            .unwrap();

        let display = gl_config.display();
        // The shaders are GLES2-style GLSL, so ask for an ES 2.0 compatible
        // context.
        let ctx_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(Some(window.window_handle().unwrap().as_raw()));

        let not_current = unsafe { display.create_context(&gl_config, &ctx_attrs).unwrap() };

        let size = window.inner_size();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window.window_handle().unwrap().as_raw(),
            NonZeroU32::new(size.width.max(1)).unwrap(),
            NonZeroU32::new(size.height.max(1)).unwrap(),
        );
        let surface = unsafe { display.create_window_surface(&gl_config, &attrs).unwrap() };
        let ctx = not_current.make_current(&surface).unwrap();

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                display.get_proc_address(&std::ffi::CString::new(s).unwrap()) as *const _
            })
        };

        self.renderer.setup(&gl).expect("failed to set up sphere renderer");
        self.renderer
            .resize(&gl, size.width, size.height)
            .expect("failed to size the viewport");

        window.request_redraw();

        self.window = Some(window);
        self.gl_context = Some(ctx);
        self.gl_surface = Some(surface);
        self.gl = Some(gl);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(gl) = &self.gl {
                    self.renderer.teardown(gl);
                }
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let (Some(surface), Some(ctx), Some(gl)) =
                    (&self.gl_surface, &self.gl_context, &self.gl)
                {
                    if let Err(err) = self.renderer.frame(gl) {
                        error!("frame failed: {err}");
                        event_loop.exit();
                        return;
                    }
                    surface.swap_buffers(ctx).unwrap();

                    // Continuous redraw keeps the timer-driven color changes
                    // visible without host-side events.
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }

            WindowEvent::Resized(size) => {
                if let (Some(surface), Some(ctx), Some(gl)) =
                    (&self.gl_surface, &self.gl_context, &self.gl)
                {
                    if size.width > 0 && size.height > 0 {
                        surface.resize(
                            ctx,
                            NonZeroU32::new(size.width).unwrap(),
                            NonZeroU32::new(size.height).unwrap(),
                        );
                    }
                    if let Err(err) = self.renderer.resize(gl, size.width, size.height) {
                        error!("resize failed: {err}");
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(gl) = &self.gl {
            self.renderer.teardown(gl);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;

    let mut app = App {
        window: None,
        gl_context: None,
        gl_surface: None,
        gl: None,
        renderer: SphereRenderer::new(),
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}
