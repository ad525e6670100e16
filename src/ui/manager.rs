//! ImGui integration
//!
//! Handles ImGui setup on wgpu and winit, frame management, input capture
//! queries and drawing the overlay on top of the rendered scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use log::{error, warn};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

/// Which inputs the UI currently claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiCapture {
    pub mouse: bool,
    pub keyboard: bool,
}

/// ImGui context, platform glue and renderer
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Creates a new UI manager
    ///
    /// DPI is locked to 1.0; the font is sized in physical pixels.
    ///
    /// # Arguments
    /// * `output_color_format` - Format of the surface the overlay draws into
    /// * `font_size` - Default font size in pixels
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
        font_size: f32,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    pub fn capture(&self) -> UiCapture {
        let io = self.context.io();
        UiCapture {
            mouse: io.want_capture_mouse,
            keyboard: io.want_capture_keyboard,
        }
    }

    /// Feeds an input event to ImGui and reports what it now wants
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> UiCapture {
        match event {
            Event::WindowEvent {
                event:
                    WindowEvent::CursorMoved { .. }
                    | WindowEvent::MouseInput { .. }
                    | WindowEvent::MouseWheel { .. }
                    | WindowEvent::KeyboardInput { .. }
                    | WindowEvent::ModifiersChanged(_)
                    | WindowEvent::Resized(_)
                    | WindowEvent::Focused(_),
                ..
            } => {
                self.platform
                    .handle_event(self.context.io_mut(), window, event);
                self.capture()
            }
            _ => UiCapture::default(),
        }
    }

    /// Starts a frame, builds the UI through `run_ui` and returns its value
    pub fn update_logic<F, R>(&mut self, window: &Window, run_ui: F) -> R
    where
        F: FnOnce(&imgui::Ui) -> R,
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(e) = self.platform.prepare_frame(self.context.io_mut(), window) {
            warn!("Failed to prepare UI frame: {}", e);
        }

        let ui = self.context.frame();
        let result = run_ui(&ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(&ui, window);
        }

        result
    }

    /// Draws the UI built by the last `update_logic` over `color_attachment`
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(e) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            error!("Failed to render UI: {:?}", e);
        }
    }
}
