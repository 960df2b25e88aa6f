#![forbid(unsafe_code)]

//! WebGPU point renderer for the particle field.
//!
//! One pipeline, one draw: every particle is an instanced, camera-facing quad
//! (6 vertices) expanded in view space from the point's center. The instance
//! buffer is written once at init; each frame only rewrites the 160-byte
//! uniform block produced by `folio_core::particles::FieldAnimator`.
//!
//! Blending is additive and the clear colour is fully transparent, so the
//! page background shows through the canvas.

use std::fmt;

// ---------------------------------------------------------------------------
// Platform-agnostic types (available on all targets for type checking)
// ---------------------------------------------------------------------------

/// Vertices per particle quad (2 triangles).
pub const QUAD_VERTICES: u32 = 6;

/// Renderer initialization or frame errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererError {
    /// `navigator.gpu` is missing; WebGPU is not supported by this browser.
    Unsupported,
    /// WebGPU adapter not available.
    NoAdapter,
    /// Device request failed.
    DeviceError(String),
    /// Surface creation or configuration failed.
    SurfaceError(String),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "WebGPU not supported"),
            Self::NoAdapter => write!(f, "WebGPU adapter not available"),
            Self::DeviceError(msg) => write!(f, "WebGPU device error: {msg}"),
            Self::SurfaceError(msg) => write!(f, "WebGPU surface error: {msg}"),
        }
    }
}

impl std::error::Error for RendererError {}

/// Backing-store size in device pixels for a CSS-pixel viewport.
///
/// Never returns a zero dimension; surfaces cannot be configured at 0×0.
#[must_use]
pub fn surface_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let scale = |v: f64| {
        if v.is_finite() && v > 0.0 {
            ((v * dpr).round() as u32).max(1)
        } else {
            1
        }
    };
    (scale(css_width), scale(css_height))
}

// ---------------------------------------------------------------------------
// WGSL shader (inline)
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
const POINT_SHADER_WGSL: &str = r#"
struct Frame {
    model_view: mat4x4<f32>,
    projection: mat4x4<f32>,
    // (r, g, b, opacity)
    color: vec4<f32>,
    // (point_size, 0, 0, 0)
    params: vec4<f32>,
}

@group(0) @binding(0) var<uniform> frame: Frame;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec3<f32>,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );

    let view_pos = frame.model_view * vec4<f32>(center, 1.0);
    // Size attenuates with depth: `point_size` screen-height units at distance 1.
    let half = frame.params.x * 0.5 / frame.projection[1][1];
    let offset = corners[vertex_index] * half;

    var out: VertexOutput;
    out.position = frame.projection * vec4<f32>(view_pos.xy + offset, view_pos.z, 1.0);
    return out;
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return frame.color;
}
"#;

// ---------------------------------------------------------------------------
// WebGPU implementation (wasm32 only)
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
mod gpu {
    use super::*;
    use folio_core::particles::{FrameUniforms, POINT_STRIDE, ParticleField};
    use web_sys::HtmlCanvasElement;
    use wgpu;

    const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    /// Source alpha scales colour, destination is kept: light accumulates.
    const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };

    /// WebGPU renderer owning all GPU resources for one particle field.
    pub struct PointRenderer {
        canvas: HtmlCanvasElement,
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: wgpu::Surface<'static>,
        surface_config: wgpu::SurfaceConfiguration,
        pipeline: wgpu::RenderPipeline,
        uniform_buffer: wgpu::Buffer,
        point_buffer: wgpu::Buffer,
        bind_group: wgpu::BindGroup,
        point_count: u32,
    }

    impl PointRenderer {
        /// Initialize the renderer on `canvas` and upload the point cloud.
        pub async fn init(
            canvas: HtmlCanvasElement,
            field: &ParticleField,
            width: u32,
            height: u32,
        ) -> Result<Self, RendererError> {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::BROWSER_WEBGPU,
                ..Default::default()
            });

            let surface = instance
                .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
                .map_err(|e| RendererError::SurfaceError(e.to_string()))?;

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::LowPower,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .map_err(|_| RendererError::NoAdapter)?;

            let (device, queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("folio-particles"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    ..Default::default()
                })
                .await
                .map_err(|e| RendererError::DeviceError(e.to_string()))?;

            let surface_caps = surface.get_capabilities(&adapter);
            let format = surface_caps
                .formats
                .first()
                .copied()
                .unwrap_or(wgpu::TextureFormat::Bgra8Unorm);
            let alpha_mode = if surface_caps
                .alpha_modes
                .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
            {
                wgpu::CompositeAlphaMode::PreMultiplied
            } else {
                surface_caps
                    .alpha_modes
                    .first()
                    .copied()
                    .unwrap_or(wgpu::CompositeAlphaMode::Auto)
            };

            let surface_config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: width.max(1),
                height: height.max(1),
                present_mode: wgpu::PresentMode::Fifo,
                desired_maximum_frame_latency: 2,
                alpha_mode,
                view_formats: vec![],
            };
            canvas.set_width(surface_config.width);
            canvas.set_height(surface_config.height);
            surface.configure(&device, &surface_config);

            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("point_shader"),
                source: wgpu::ShaderSource::Wgsl(POINT_SHADER_WGSL.into()),
            });

            let bind_group_layout =
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("point_bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("point_pl"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("point_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: POINT_STRIDE,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &POINT_ATTRIBUTES,
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(ADDITIVE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

            let point_bytes = field.bytes();
            let point_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("points"),
                size: (point_bytes.len() as u64).max(POINT_STRIDE),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            if !point_bytes.is_empty() {
                queue.write_buffer(&point_buffer, 0, point_bytes);
            }

            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("frame_uniforms"),
                size: std::mem::size_of::<FrameUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("point_bg"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

            Ok(Self {
                canvas,
                device,
                queue,
                surface,
                surface_config,
                pipeline,
                uniform_buffer,
                point_buffer,
                bind_group,
                point_count: field.len() as u32,
            })
        }

        /// Resize the backing store (device pixels) and reconfigure the surface.
        pub fn resize(&mut self, width: u32, height: u32) {
            let (width, height) = (width.max(1), height.max(1));
            if width == self.surface_config.width && height == self.surface_config.height {
                return;
            }
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.surface.configure(&self.device, &self.surface_config);
        }

        /// Upload this frame's uniforms, draw every point and present.
        pub fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), RendererError> {
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

            let output = self
                .surface
                .get_current_texture()
                .map_err(|e| RendererError::SurfaceError(e.to_string()))?;

            let view = output
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame"),
                });

            {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("point_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        depth_slice: None,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });

                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.point_buffer.slice(..));
                pass.draw(0..QUAD_VERTICES, 0..self.point_count);
            }

            self.queue.submit(std::iter::once(encoder.finish()));
            output.present();
            Ok(())
        }

        #[must_use]
        pub fn point_count(&self) -> u32 {
            self.point_count
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use gpu::PointRenderer;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
