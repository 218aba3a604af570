use anyhow::{anyhow, Context as _, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{
    ffi::{CStr, CString},
    num::NonZeroU32,
};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use glboot::{
    config::AppConfig,
    render::mesh::{TriangleMesh, TRIANGLE_VERTICES},
    shader::{load_shader_file, ShaderProgram},
};

struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    program: ShaderProgram,
    mesh: TriangleMesh,
}

impl App {
    fn new(config: AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(false);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8).with_depth_size(24);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| anyhow!("Failed to pick a GL config: {e}"))?;

        let window = window.ok_or_else(|| anyhow!("Display builder returned no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("Failed to create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_config
                .display()
                .create_window_surface(&gl_config, &attrs)
                .context("Failed to create GL surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        let swap_interval = if config.window.vsync {
            SwapInterval::Wait(NonZeroU32::new(1).unwrap())
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, swap_interval) {
            log::warn!("Failed to set swap interval: {e}");
        }

        // Load OpenGL functions
        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        info!("OpenGL version: {}", gl_version_string());

        // Initialize OpenGL state
        let size = window.inner_size();
        let [r, g, b, a] = config.clear_color;
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
            gl::ClearColor(r, g, b, a);
        }

        let pair = load_shader_file(&config.shader_path)
            .with_context(|| format!("Failed to load shader file {}", config.shader_path))?;
        let program = ShaderProgram::from_pair(&pair)
            .with_context(|| format!("Failed to build shader program from {}", config.shader_path))?;
        let mesh = TriangleMesh::new(&TRIANGLE_VERTICES);

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                program,
                mesh,
            },
            event_loop,
        ))
    }

    /// Returns true when the window asked to close.
    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                self.gl_surface.resize(
                    &self.gl_context,
                    NonZeroU32::new(size.width).unwrap(),
                    NonZeroU32::new(size.height).unwrap(),
                );
                unsafe {
                    gl::Viewport(0, 0, size.width as i32, size.height as i32);
                }
                false
            }
            _ => false,
        }
    }

    fn redraw(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.bind();
        self.mesh.draw();

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("Failed to swap buffers: {e}");
        }
    }
}

fn gl_version_string() -> String {
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if version.is_null() {
            "unknown".to_string()
        } else {
            CStr::from_ptr(version as *const _).to_string_lossy().into_owned()
        }
    }
}

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "glboot.toml".to_string());
    let config = AppConfig::load(&config_path)?;

    info!("Initializing application...");
    let (mut app, event_loop) = App::new(config)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            app.redraw();
        }
        Event::WindowEvent { event, .. } => {
            if app.handle_window_event(&event) {
                elwt.exit();
            }
        }
        Event::AboutToWait => {
            app.window.request_redraw();
        }
        _ => (),
    })?;

    Ok(())
}
