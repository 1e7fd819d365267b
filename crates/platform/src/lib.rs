//! Platform layer: windowing & event loop.
//!
//! The host owns the window and the GPU context and forwards the surface
//! lifecycle to a [`SurfaceRenderer`]:
//! - resumed → surface created, then surface changed with the initial size.
//! - resized → surface changed.
//! - redraw requested → draw frame, then request the next redraw.
//!
//! Everything runs on the event-loop thread; there is no other thread.

use std::sync::Arc;

use anyhow::Result;
use renderer::{GpuContext, SurfaceError, SurfaceRenderer};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

#[derive(Clone, Debug, PartialEq)]
pub struct HostConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub backends: wgpu::Backends,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "RoomView".to_owned(),
            width: 1280,
            height: 720,
            backends: wgpu::Backends::all(),
        }
    }
}

/// Tracks whether the window currently has a drawable area.
#[derive(Debug, Default)]
struct Visibility {
    minimized: bool,
}

impl Visibility {
    /// Record a new window size. Returns `true` when the window just became
    /// drawable again and the redraw chain has to be restarted.
    fn resized(&mut self, width: u32, height: u32) -> bool {
        let was_minimized = self.minimized;
        self.minimized = width == 0 || height == 0;
        was_minimized && !self.minimized
    }

    fn should_draw(&self) -> bool {
        !self.minimized
    }
}

struct Host<R> {
    config: HostConfig,
    renderer: R,
    gpu: Option<GpuContext>,
    visibility: Visibility,
    failure: Option<anyhow::Error>,
}

impl<R: SurfaceRenderer> Host<R> {
    fn new(config: HostConfig, renderer: R) -> Self {
        Self {
            config,
            renderer,
            gpu: None,
            visibility: Visibility::default(),
            failure: None,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone(), self.config.backends))?;
        self.renderer.on_surface_created(&gpu);
        let (width, height) = gpu.size();
        self.renderer.on_surface_changed(&gpu, width, height);
        self.visibility = Visibility::default();

        window.request_redraw();
        self.gpu = Some(gpu);
        Ok(())
    }
}

impl<R: SurfaceRenderer> ApplicationHandler for Host<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            log::error!("Failed to create rendering surface: {e:#}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // The native window may not outlive a suspend (Android); the next
        // resume rebuilds the surface and the renderer's resources.
        log::info!("Suspended. Releasing surface.");
        self.gpu = None;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            log::info!("Close requested. Exiting event loop.");
            event_loop.exit();
            return;
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                let restored = self.visibility.resized(new_size.width, new_size.height);
                if self.visibility.should_draw() {
                    gpu.resize(new_size.width, new_size.height);
                } else {
                    log::debug!("Window minimized; pausing redraws");
                }
                self.renderer
                    .on_surface_changed(gpu, new_size.width, new_size.height);
                if restored {
                    gpu.window().request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if !self.visibility.should_draw() {
                    return;
                }
                match self.renderer.on_draw_frame(gpu) {
                    Ok(()) => {}
                    Err(e) if GpuContext::is_surface_lost(&e) => {
                        log::warn!("Surface {e:?}; reconfiguring");
                        gpu.recreate_surface();
                    }
                    Err(SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory. Exiting event loop.");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => log::warn!("Frame skipped: {e:?}"),
                }
                gpu.window().request_redraw();
            }
            _ => {}
        }
    }
}

/// Open a window and drive `renderer` until the window is closed.
pub fn run<R: SurfaceRenderer>(config: HostConfig, renderer: R) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut host = Host::new(config, renderer);
    event_loop.run_app(&mut host)?;

    match host.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
