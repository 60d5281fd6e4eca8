//! Overlay GPU state - device, transparent surface and flat-color pipeline

use std::cell::RefCell;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use super::shapes::Vertex;

/// Id of the canvas layered over the `<video>` element
pub const CANVAS_ID: &str = "overlay-canvas";

/// Vertex capacity: 17 outlined dots plus 12 edges fit with room to spare
pub const MAX_VERTICES: usize = 4096;

/// Errors that can occur during GPU initialization
#[derive(Debug, Error)]
pub enum GpuStateError {
    #[error("No window found")]
    NoWindow,
    #[error("No document found")]
    NoDocument,
    #[error("No canvas with id 'overlay-canvas' found")]
    NoCanvas,
    #[error("Surface creation failed: {0}")]
    SurfaceCreationFailed(String),
    #[error("Failed to find a suitable GPU adapter")]
    NoAdapter,
    #[error("Device creation failed: {0}")]
    DeviceCreationFailed(String),
}

impl From<GpuStateError> for JsValue {
    fn from(err: GpuStateError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Holds all WebGPU state for rendering
pub(crate) struct GpuState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub render_pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
}

// Thread-local storage for GPU state (WASM is single-threaded)
thread_local! {
    pub(crate) static GPU_STATE: RefCell<Option<GpuState>> = RefCell::new(None);
}

/// Overlay pixels blend over the video, so prefer a premultiplied surface
fn overlay_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
        wgpu::CompositeAlphaMode::PreMultiplied
    } else {
        caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// Square sRGB surface matching the capture resolution
fn overlay_surface_config(
    caps: &wgpu::SurfaceCapabilities,
    canvas_size: u32,
) -> Result<wgpu::SurfaceConfiguration, GpuStateError> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| GpuStateError::SurfaceCreationFailed("no surface formats".into()))?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: canvas_size,
        height: canvas_size,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: overlay_alpha_mode(caps),
        view_formats: Vec::new(),
        desired_maximum_frame_latency: 2,
    })
}

/// Flat-colored triangle list; no bind groups, so the layout is derived
fn overlay_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Overlay Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
    });
    let target = wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Overlay Pipeline"),
        layout: None,
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(target)],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Canvas element the overlay draws into, resized to `canvas_size`
fn overlay_canvas(canvas_size: u32) -> Result<web_sys::HtmlCanvasElement, GpuStateError> {
    let document = web_sys::window()
        .ok_or(GpuStateError::NoWindow)?
        .document()
        .ok_or(GpuStateError::NoDocument)?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or(GpuStateError::NoCanvas)?;
    canvas.set_width(canvas_size);
    canvas.set_height(canvas_size);
    Ok(canvas)
}

/// Initialize WebGPU on a transparent square canvas of `canvas_size` pixels
pub async fn initialize_gpu(canvas_size: u32) -> Result<(), GpuStateError> {
    let canvas = overlay_canvas(canvas_size)?;

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| GpuStateError::SurfaceCreationFailed(e.to_string()))?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(GpuStateError::NoAdapter)?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Pushup Overlay Device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            },
            None,
        )
        .await
        .map_err(|e| GpuStateError::DeviceCreationFailed(e.to_string()))?;

    let surface_config = overlay_surface_config(&surface.get_capabilities(&adapter), canvas_size)?;
    surface.configure(&device, &surface_config);

    let render_pipeline = overlay_pipeline(&device, surface_config.format);
    let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Overlay Vertices"),
        size: (MAX_VERTICES * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    GPU_STATE.with(|state| {
        *state.borrow_mut() = Some(GpuState { device, queue, surface, render_pipeline, vertex_buffer });
    });

    Ok(())
}
