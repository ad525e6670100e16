//! WGPU rendering engine for the house viewer
//!
//! Owns the surface, device and pipelines. Draws the scene into a
//! multisampled target (when the adapter allows it), resolves into the
//! surface texture and then hands the encoder to the UI overlay.

use std::sync::Arc;

use log::{debug, info, warn};
use wgpu::{Device, TextureFormat};

use crate::{
    config::ViewerConfig,
    error::{Result, ViewerError},
    gfx::{
        color::hex_to_clear_color,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            material::{Material, Side},
            texture_resource::TextureResource,
        },
        scene::{mesh::DrawMesh, scene::Scene},
    },
    wgpu_utils::binding_types,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

pub const PHONG_PIPELINE: &str = "Phong";
pub const PHONG_DOUBLE_SIDED_PIPELINE: &str = "PhongDoubleSided";
pub const WIREFRAME_PIPELINE: &str = "Wireframe";

/// Pipeline used to draw a material
pub fn pipeline_for_material(material: &Material) -> &'static str {
    if material.wireframe {
        WIREFRAME_PIPELINE
    } else {
        match material.side {
            Side::Front => PHONG_PIPELINE,
            Side::Double => PHONG_DOUBLE_SIDED_PIPELINE,
        }
    }
}

/// Result of a frame that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface was unavailable and has been reconfigured
    Skipped,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    sample_count: u32,
    depth_texture: TextureResource,
    msaa_target: Option<TextureResource>,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    transform_layout: wgpu::BindGroupLayout,
    material_layout: wgpu::BindGroupLayout,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `viewer_config` - Vsync and MSAA preferences
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        viewer_config: &ViewerConfig,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let adapter_info = adapter.get_info();
        info!("Using adapter {} ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(ViewerError::NoSurfaceFormat)?;
        info!("Surface format {:?}", format);

        let present_mode = if viewer_config.vsync
            || !surface_capabilities
                .present_modes
                .contains(&wgpu::PresentMode::Immediate)
        {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::Immediate
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = Self::supported_sample_count(&adapter, format, viewer_config.msaa_samples);
        if sample_count != viewer_config.msaa_samples {
            warn!(
                "{}x MSAA unsupported for {:?}, using {}x",
                viewer_config.msaa_samples, format, sample_count
            );
        }

        let depth_texture = TextureResource::create_depth_texture(&device, &config, sample_count);
        let msaa_target = TextureResource::create_msaa_target(&device, &config, sample_count);

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let transform_layout = binding_types::single_uniform_layout(
            &device,
            "Transform Bind Group Layout",
            wgpu::ShaderStages::VERTEX,
        );
        let material_layout = binding_types::single_uniform_layout(
            &device,
            "Material Bind Group Layout",
            wgpu::ShaderStages::FRAGMENT,
        );

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());
        pipeline_manager.load_shader("phong", include_str!("phong.wgsl"));

        let base = PipelineConfig::default()
            .with_shader("phong")
            .with_color_format(format)
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_sample_count(sample_count)
            .with_bind_group_layouts(vec![
                global_bindings.layout().clone(),
                transform_layout.clone(),
                material_layout.clone(),
            ]);

        pipeline_manager.register_pipeline(
            PHONG_PIPELINE,
            base.clone().with_label(PHONG_PIPELINE),
        );
        pipeline_manager.register_pipeline(
            PHONG_DOUBLE_SIDED_PIPELINE,
            base.clone()
                .with_label(PHONG_DOUBLE_SIDED_PIPELINE)
                .with_cull_mode(None),
        );
        pipeline_manager.register_pipeline(
            WIREFRAME_PIPELINE,
            base.with_label(WIREFRAME_PIPELINE)
                .with_cull_mode(None)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                warn!("{}", error);
            }
        }

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            format,
            sample_count,
            depth_texture,
            msaa_target,
            pipeline_manager,
            global_ubo,
            global_bindings,
            transform_layout,
            material_layout,
        })
    }

    /// Highest sample count not above `requested` that the format supports
    fn supported_sample_count(adapter: &wgpu::Adapter, format: TextureFormat, requested: u32) -> u32 {
        let color = adapter.get_texture_format_features(format).flags;
        let depth = adapter
            .get_texture_format_features(TextureResource::DEPTH_FORMAT)
            .flags;

        [8, 4, 2]
            .into_iter()
            .filter(|&count| count <= requested)
            .find(|&count| color.sample_count_supported(count) && depth.sample_count_supported(count))
            .unwrap_or(1)
    }

    /// Uploads meshes and creates per-shape bind groups
    pub fn init_scene(&self, scene: &mut Scene) {
        scene.init_gpu_resources(&self.device, &self.transform_layout);
    }

    /// Syncs camera, lights, transforms and materials for the next frame
    pub fn update(&mut self, scene: &mut Scene) {
        scene.update();
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            scene.camera.uniform,
            &scene.lights,
        );
        scene.sync_gpu_resources(&self.device, &self.queue, &self.material_layout);
    }

    /// Draws the scene and then the UI overlay
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    /// Any other surface error is returned.
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        ui_callback: F,
    ) -> std::result::Result<FrameStatus, wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out waiting for the surface texture");
                return Ok(FrameStatus::Skipped);
            }
            Err(e) => return Err(e),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let (view, resolve_target) = match &self.msaa_target {
                Some(target) => (&target.view, Some(&surface_texture_view)),
                None => (&surface_texture_view, None),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(hex_to_clear_color(scene.background)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for shape in scene.house.group.shapes() {
                let material = scene
                    .material_manager
                    .get_material_for_object(&shape.material_id);
                let pipeline_name = pipeline_for_material(material);

                let (Some(pipeline), Some(transform), Some(material_group)) = (
                    self.pipeline_manager.get_pipeline(pipeline_name),
                    shape.transform_bind_group(),
                    material.get_bind_group(),
                ) else {
                    debug!("Skipping '{}': GPU resources not ready", shape.name);
                    continue;
                };

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, transform, &[]);
                render_pass.set_bind_group(2, material_group, &[]);

                if material.wireframe {
                    render_pass.draw_mesh_edges(&shape.mesh);
                } else {
                    render_pass.draw_mesh(&shape.mesh);
                }
            }
        }

        ui_callback(&self.device, &self.queue, &mut encoder, &surface_texture_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(FrameStatus::Presented)
    }

    /// Resizes the surface and the depth and MSAA targets
    ///
    /// Zero-sized requests (a minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, self.sample_count);
        self.msaa_target =
            TextureResource::create_msaa_target(&self.device, &self.config, self.sample_count);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }
}
