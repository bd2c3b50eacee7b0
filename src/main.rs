//! Interactive museum viewer.
//!
//! Window, GL context and event dispatch live here; everything below this
//! file is toolkit-agnostic. Animation runs on a fixed 20 ms tick that
//! advances the application clock and requests a redraw.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

mod engine;
mod scene;

use engine::camera::{Camera, DragButton, MoveDirection};
use engine::clock::MuseumClock;
use engine::shader;
use scene::layout::FrameState;
use scene::Scene;

const ANIMATION_TICK: Duration = Duration::from_millis(20);
const TICK_SECONDS: f32 = 0.020;

struct App {
    window: Option<Window>,
    gl: Option<glow::Context>,
    gl_context: Option<glutin::context::PossiblyCurrentContext>,
    gl_surface: Option<glutin::surface::Surface<WindowSurface>>,
    scene: Option<Scene>,
    camera: Camera,
    clock: MuseumClock,
    app_time: f32,
    next_tick: Instant,
    cursor_position: (f64, f64),
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gl: None,
            gl_context: None,
            gl_surface: None,
            scene: None,
            camera: Camera::new(),
            clock: MuseumClock::new(),
            app_time: 0.0,
            next_tick: Instant::now(),
            cursor_position: (0.0, 0.0),
        }
    }

    fn frame_state(&self) -> FrameState {
        FrameState {
            app_time: self.app_time,
            hour_angle: self.clock.hour_angle(),
            minute_angle: self.clock.minute_angle(),
            second_angle: self.clock.second_angle(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyL => {
                if let Some(gl) = &self.gl {
                    unsafe { gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE) };
                }
            }
            KeyCode::KeyF => {
                if let Some(gl) = &self.gl {
                    unsafe { gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL) };
                }
            }
            KeyCode::KeyT => {
                if let Some(window) = &self.window {
                    let next = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(next);
                }
            }
            KeyCode::KeyW => self.camera.move_target(MoveDirection::Forward),
            KeyCode::KeyS => self.camera.move_target(MoveDirection::Backward),
            KeyCode::KeyA => self.camera.move_target(MoveDirection::Left),
            KeyCode::KeyD => self.camera.move_target(MoveDirection::Right),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("Virtual museum")
                    .with_inner_size(winit::dpi::PhysicalSize::new(1280, 720)),
            )
            .expect("failed to create window");

        let (_, gl_config) = DisplayBuilder::new()
            .build(event_loop, ConfigTemplateBuilder::new(), |mut configs| {
                configs.next().expect("no GL config available")
            })
            .expect("failed to build GL display");

        let display = gl_config.display();
        let window_handle = window
            .window_handle()
            .expect("window has no native handle")
            .as_raw();
        let ctx_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(window_handle));

        let not_current = unsafe {
            display
                .create_context(&gl_config, &ctx_attrs)
                .expect("failed to create GL context")
        };

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window_handle,
            NonZeroU32::new(size.width.max(1)).expect("nonzero width"),
            NonZeroU32::new(size.height.max(1)).expect("nonzero height"),
        );
        let surface = unsafe {
            display
                .create_window_surface(&gl_config, &surface_attrs)
                .expect("failed to create GL surface")
        };
        let ctx = not_current
            .make_current(&surface)
            .expect("failed to make GL context current");

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                display.get_proc_address(
                    &std::ffi::CString::new(s).expect("proc name with NUL byte"),
                ) as *const _
            })
        };

        let scene = match Scene::new(&gl) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("cannot build the museum scene: {err}");
                shader::wait_for_enter_and_exit();
            }
        };

        self.clock.update();
        self.next_tick = Instant::now() + ANIMATION_TICK;
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
        window.request_redraw();

        self.window = Some(window);
        self.gl = Some(gl);
        self.gl_context = Some(ctx);
        self.gl_surface = Some(surface);
        self.scene = Some(scene);
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::ResumeTimeReached { .. }) {
            self.app_time += TICK_SECONDS;
            self.clock.update();
            self.next_tick += ANIMATION_TICK;
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::RedrawRequested => {
                if let (Some(gl), Some(surface), Some(ctx), Some(scene), Some(window)) = (
                    &self.gl,
                    &self.gl_surface,
                    &self.gl_context,
                    &self.scene,
                    &self.window,
                ) {
                    let size = window.inner_size();
                    scene.render(gl, &self.camera, size.width, size.height, &self.frame_state());
                    if let Err(err) = surface.swap_buffers(ctx) {
                        log::error!("swap_buffers failed: {err}");
                    }
                }
            }

            WindowEvent::Resized(size) => {
                if let (Some(gl), Some(surface), Some(ctx)) =
                    (&self.gl, &self.gl_surface, &self.gl_context)
                {
                    if let (Some(width), Some(height)) =
                        (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                    {
                        surface.resize(ctx, width, height);
                        unsafe {
                            gl.viewport(0, 0, size.width as i32, size.height as i32)
                        };
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let drag = match button {
                    MouseButton::Left => Some(DragButton::Rotate),
                    MouseButton::Right => Some(DragButton::Zoom),
                    _ => None,
                };
                if let Some(drag) = drag {
                    let (x, y) = self.cursor_position;
                    self.camera
                        .on_mouse_button(drag, state == ElementState::Pressed, x, y);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = (position.x, position.y);
                self.camera.on_mouse_moved(position.x, position.y);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.handle_key(event_loop, code);
                    }
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(scene), Some(gl)) = (self.scene.take(), &self.gl) {
            scene.release(gl);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
