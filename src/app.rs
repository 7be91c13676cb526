// src/app.rs
//! Window, frame loop and sketch hosting.
//!
//! A [`Sketch`] builds its shapes once in [`Sketch::setup`] and animates them
//! in [`Sketch::draw`]. [`PlaygroundApp`] owns the window and GPU context,
//! calls the sketch every frame, then renders the scene, draws the 2D
//! [`Canvas`] over it and presents.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::{PlaygroundConfig, ShaderSources};
use crate::debug::{log_active_attributes, Inspector};
use crate::error::{PlaygroundError, Result};
use crate::gfx::context::WgpuContext;
use crate::gfx::resources::program::{default_program, load_program, ProgramInfo};
use crate::gfx::resources::TextureLoader;
use crate::gfx::scene::{Canvas, Scene, ShapeBuffer};

/// One-way flag that stops the frame loop from drawing.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Counts frames and decides whether a frame should be drawn.
#[derive(Debug, Default)]
pub struct FrameLoop {
    started: bool,
    stop: StopHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the loop. It can only be started once.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            let err = PlaygroundError::AlreadyStarted;
            log::error!("{err}");
            return Err(err);
        }
        self.started = true;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.stop.is_stopped()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Runs `draw` with the frame number if the loop is running.
    pub fn tick<R>(&mut self, draw: impl FnOnce(u64) -> R) -> Option<R> {
        if !self.is_running() {
            return None;
        }
        let frame = self.frames;
        self.frames += 1;
        Some(draw(frame))
    }
}

/// Cursor position in window coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Size of the drawable surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
}

impl SurfaceInfo {
    /// Width over height, or 1 for a collapsed surface.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl From<PhysicalSize<u32>> for SurfaceInfo {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

/// Everything a sketch may touch while setting up.
pub struct SetupContext<'a> {
    pub ctx: &'a mut WgpuContext,
    pub scene: &'a mut Scene,
    pub shapes: &'a mut ShapeBuffer,
    pub textures: &'a mut TextureLoader,
    pub inspector: &'a mut Inspector,
    pub surface: SurfaceInfo,
}

/// Per-frame state handed to [`Sketch::draw`].
pub struct Frame<'a> {
    pub ctx: &'a mut WgpuContext,
    pub scene: &'a mut Scene,
    pub shapes: &'a mut ShapeBuffer,
    /// Cleared before every draw.
    pub canvas: &'a mut Canvas,
    pub textures: &'a mut TextureLoader,
    pub pointer: Pointer,
    pub surface: SurfaceInfo,
    pub number: u64,
    pub elapsed: Duration,
    pub stop: StopHandle,
}

pub trait Sketch {
    fn setup(&mut self, setup: &mut SetupContext<'_>) -> anyhow::Result<()>;

    fn draw(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()>;
}

struct AppState {
    window: Arc<Window>,
    ctx: WgpuContext,
    scene: Scene,
    shapes: ShapeBuffer,
    canvas: Canvas,
    textures: TextureLoader,
}

pub struct PlaygroundApp<S: Sketch> {
    config: PlaygroundConfig,
    sketch: S,
    state: Option<AppState>,
    frame_loop: FrameLoop,
    pointer: Pointer,
    inspector: Inspector,
    started_at: Instant,
}

impl<S: Sketch> PlaygroundApp<S> {
    pub fn new(config: PlaygroundConfig, sketch: S) -> Self {
        Self {
            config,
            sketch,
            state: None,
            frame_loop: FrameLoop::new(),
            pointer: Pointer::default(),
            inspector: Inspector::new(),
            started_at: Instant::now(),
        }
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let window_config = &self.config.window;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(window_config.title.clone())
                .with_inner_size(LogicalSize::new(window_config.width, window_config.height)),
        )?;
        let window = Arc::new(window);

        let mut ctx = pollster::block_on(WgpuContext::new(window.clone()))?;
        let surface = SurfaceInfo::from(window.inner_size());

        let program = self.build_program(&mut ctx);
        if let Some(info) = &program {
            log_active_attributes(&ctx, info.program);
        }

        let mut state = AppState {
            scene: Scene::new(&ctx, &self.config.scene, surface.aspect(), program),
            window,
            ctx,
            shapes: ShapeBuffer::new(),
            canvas: Canvas::new(),
            textures: TextureLoader::new(),
        };

        self.frame_loop.start()?;
        self.inspector.globalize("stopDrawing", self.frame_loop.stop_handle());
        self.inspector.globalize("surface", surface);

        self.sketch.setup(&mut SetupContext {
            ctx: &mut state.ctx,
            scene: &mut state.scene,
            shapes: &mut state.shapes,
            textures: &mut state.textures,
            inspector: &mut self.inspector,
            surface,
        })?;
        self.inspector.log_registered();

        Ok(state)
    }

    fn build_program(&self, ctx: &mut WgpuContext) -> Option<ProgramInfo> {
        let program = match &self.config.shaders {
            ShaderSources::BuiltIn => default_program(ctx),
            ShaderSources::Files { vertex, fragment } => load_program(ctx, vertex, fragment),
        };
        program
            .inspect_err(|err| log::error!("Scene starts without a program: {err}"))
            .ok()
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let surface = SurfaceInfo::from(size);
        state.ctx.resize(surface.width, surface.height);
        state.scene.set_aspect(surface.aspect());
        if let Some(registered) = self.inspector.get_mut::<SurfaceInfo>("surface") {
            *registered = surface;
        }
    }

    fn redraw(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.textures.poll(&mut state.ctx);
        state.canvas.clear_canvas(&mut state.ctx);

        let sketch = &mut self.sketch;
        let pointer = self.pointer;
        let elapsed = self.started_at.elapsed();
        let stop = self.frame_loop.stop_handle();
        let surface = SurfaceInfo::from(state.window.inner_size());

        let result = self.frame_loop.tick(|number| {
            let mut frame = Frame {
                ctx: &mut state.ctx,
                scene: &mut state.scene,
                shapes: &mut state.shapes,
                canvas: &mut state.canvas,
                textures: &mut state.textures,
                pointer,
                surface,
                number,
                elapsed,
                stop,
            };
            if let Err(err) = sketch.draw(&mut frame) {
                log::error!("Sketch draw failed: {err:#}");
            }

            if state.scene.program_info().is_some() {
                match state.scene.draw_frame(&mut state.ctx, &mut state.shapes) {
                    Ok(stats) => log::trace!("Frame {number}: {stats:?}"),
                    Err(err) => log::error!("Scene render failed: {err}"),
                }
                if let Err(err) = state.canvas.render(&mut state.ctx, &state.scene) {
                    log::error!("Canvas render failed: {err}");
                }
            }
            state.ctx.present()
        });

        if let Some(Err(err)) = result {
            log::error!("Present failed: {err}");
        }
    }
}

impl<S: Sketch> ApplicationHandler for PlaygroundApp<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Failed to start the playground: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Pointer {
                    x: position.x,
                    y: position.y,
                };
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frame_loop.is_running() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}
