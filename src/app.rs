//! Window host and event loop
//!
//! Translates winit events into [`ViewerEvent`]s, runs the control panel
//! and redraws continuously.

use std::{str::FromStr, sync::Arc};

use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    controls::{Command, ViewerEvent, ViewerState, CONTROL_IDS},
    error::{Result, ViewerError},
    gfx::rendering::{FrameStatus, RenderEngine},
    ui::{house_control_panel, UiCapture, UiManager},
};

/// Browser-style pixels per wheel line
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Wheel delta in browser convention: positive when scrolling down
pub fn wheel_delta_y(delta: MouseScrollDelta, scale_factor: f64) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
        MouseScrollDelta::PixelDelta(position) => (-position.y / scale_factor) as f32,
    }
}

/// Maps a winit window event to a viewer event, honouring UI capture
///
/// Releases and cursor motion always pass so a drag cannot get stuck
/// behind the panel.
pub fn translate_event(
    event: &WindowEvent,
    scale_factor: f64,
    capture: UiCapture,
) -> Option<ViewerEvent> {
    match event {
        WindowEvent::MouseInput { state, .. } => match state {
            ElementState::Pressed if !capture.mouse => Some(ViewerEvent::PointerDown),
            ElementState::Pressed => None,
            ElementState::Released => Some(ViewerEvent::PointerUp),
        },
        WindowEvent::CursorMoved { position, .. } => {
            let logical = position.to_logical::<f64>(scale_factor);
            Some(ViewerEvent::PointerMove {
                x: logical.x as f32,
                y: logical.y as f32,
            })
        }
        WindowEvent::MouseWheel { delta, .. } if !capture.mouse => Some(ViewerEvent::Wheel {
            delta_y: wheel_delta_y(*delta, scale_factor),
        }),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key: Key::Character(text),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } if !capture.keyboard => Some(ViewerEvent::KeyDown(text.to_string())),
        WindowEvent::Resized(PhysicalSize { width, height }) => Some(ViewerEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

pub struct HouseApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    controls: Vec<Command>,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    viewer: ViewerState,
    error: Option<ViewerError>,
}

impl HouseApp {
    /// Creates the event loop and resolves the panel's control ids
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let controls = CONTROL_IDS
            .iter()
            .map(|id| Command::from_str(id))
            .collect::<Result<Vec<_>>>()?;

        let (width, height) = config.window_size;
        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                controls,
                window: None,
                render_engine: None,
                ui_manager: None,
                viewer: ViewerState::new(width, height),
                error: None,
            },
        })
    }

    /// Runs until the window closes or initialisation fails
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(self.config.title.clone())
                    .with_inner_size(LogicalSize::new(width, height)),
            )?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let target = window.clone();
        let config = &self.config;
        let render_engine =
            pollster::block_on(async { RenderEngine::new(target, width, height, config).await })?;
        info!(
            "Renderer ready: {}x{}, {}x MSAA",
            width,
            height,
            render_engine.sample_count()
        );

        render_engine.init_scene(&mut self.viewer.scene);
        self.viewer.resize(width, height);

        self.ui_manager = Some(UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
            self.config.ui_font_size,
        ));
        self.render_engine = Some(render_engine);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(render_engine), Some(ui_manager), Some(window)) = (
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        let controls = &self.controls;
        let clicked = ui_manager.update_logic(window, |ui| house_control_panel(ui, controls));
        for command in clicked {
            self.viewer.handle(ViewerEvent::Command(command));
        }

        render_engine.update(&mut self.viewer.scene);
        let status = render_engine.render_frame(
            &self.viewer.scene,
            |device, queue, encoder, color_attachment| {
                ui_manager.render_display_only(device, queue, encoder, color_attachment);
            },
        );

        match status {
            Ok(FrameStatus::Presented) => {}
            Ok(FrameStatus::Skipped) => debug!("Frame skipped"),
            Err(e) => {
                error!("Surface error, shutting down: {}", e);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            error!("Initialisation failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let capture = match self.ui_manager.as_mut() {
            Some(ui_manager) => {
                let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                    window_id,
                    event: event.clone(),
                };
                ui_manager.handle_input(&window, &ui_event)
            }
            None => UiCapture::default(),
        };

        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(*width, *height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => {}
        }

        if let Some(viewer_event) = translate_event(&event, window.scale_factor(), capture) {
            if self.viewer.handle(viewer_event).redraw {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    const FREE: UiCapture = UiCapture {
        mouse: false,
        keyboard: false,
    };
    const CAPTURED: UiCapture = UiCapture {
        mouse: true,
        keyboard: true,
    };

    fn device() -> winit::event::DeviceId {
        // SAFETY: the id is only compared, never passed back to the platform
        unsafe { winit::event::DeviceId::dummy() }
    }

    #[test]
    fn wheel_lines_follow_browser_sign_and_scale() {
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, -1.0), 1.0), 100.0);
        assert_eq!(wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 2.0), 2.0), -200.0);
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -60.0)), 2.0),
            30.0
        );
    }

    #[test]
    fn resize_passes_through_physical_size() {
        let event = WindowEvent::Resized(PhysicalSize::new(640, 480));
        assert_eq!(
            translate_event(&event, 2.0, CAPTURED),
            Some(ViewerEvent::Resize {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn captured_mouse_blocks_press_but_not_release() {
        let press = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        };
        let release = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Released,
            button: MouseButton::Left,
        };

        assert_eq!(translate_event(&press, 1.0, FREE), Some(ViewerEvent::PointerDown));
        assert_eq!(translate_event(&press, 1.0, CAPTURED), None);
        assert_eq!(translate_event(&release, 1.0, CAPTURED), Some(ViewerEvent::PointerUp));
    }

    #[test]
    fn cursor_moves_arrive_in_logical_pixels() {
        let moved = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(200.0, 100.0),
        };
        assert_eq!(
            translate_event(&moved, 2.0, CAPTURED),
            Some(ViewerEvent::PointerMove { x: 100.0, y: 50.0 })
        );
    }

    #[test]
    fn any_button_starts_a_drag() {
        let press = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Right,
        };
        assert_eq!(translate_event(&press, 1.0, FREE), Some(ViewerEvent::PointerDown));
    }
}
