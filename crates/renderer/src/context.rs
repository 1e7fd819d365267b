//! GPU context: instance, surface, device/queue and the depth buffer.
//! This is the part of the platform surface the renderer draws into.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use wgpu::{
    Backends, Device, DeviceDescriptor, Extent3d, Features, Instance, InstanceDescriptor, Limits,
    PowerPreference, PresentMode, Queue, Surface, SurfaceConfiguration, SurfaceError,
    SurfaceTexture, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor,
};
use winit::{dpi::PhysicalSize, window::Window};

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

pub struct GpuContext {
    window: Arc<Window>,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    pub device: Device,
    pub queue: Queue,
    depth_view: TextureView,
}

impl GpuContext {
    /// Create GPU state bound to an Arc<Window>.
    pub async fn new(window: Arc<Window>, backends: Backends) -> Result<Self> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("RoomView Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .context("surface reports no alpha modes")?;

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        let depth_view = create_depth_view(&device, &surface_config);

        Ok(Self {
            window,
            surface,
            surface_config,
            device,
            queue,
            depth_view,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn format(&self) -> TextureFormat {
        self.surface_config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    pub fn depth_view(&self) -> &TextureView {
        &self.depth_view
    }

    /// Resize: reconfigure surface & recreate depth view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }

    pub fn acquire_frame(&self) -> Result<SurfaceTexture, SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    /// Reconfigure for the window's current size.
    pub fn recreate_surface(&mut self) {
        let PhysicalSize { width, height } = self.window.inner_size();
        let (width, height) = reconfigure_size((width, height), self.size());
        self.resize(width, height);
    }
}

/// Size to reconfigure a lost surface with: the live window size, or the last
/// configured size while the window has no area.
fn reconfigure_size(window: (u32, u32), configured: (u32, u32)) -> (u32, u32) {
    if window.0 == 0 || window.1 == 0 {
        configured
    } else {
        window
    }
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_surface_follows_live_window_size() {
        assert_eq!(reconfigure_size((1920, 1080), (1280, 720)), (1920, 1080));
    }

    #[test]
    fn zero_sized_window_keeps_configured_size() {
        assert_eq!(reconfigure_size((0, 1080), (1280, 720)), (1280, 720));
        assert_eq!(reconfigure_size((0, 0), (1280, 720)), (1280, 720));
    }
}
