//! Renderer: wgpu context + textured room mesh.
//! wgpu = 26.x, winit = 0.30.x

pub mod context;
pub mod mesh;
pub mod room;
pub mod shader;
pub mod texture;

#[cfg(test)]
mod test_log;

pub use context::GpuContext;
pub use room::RoomRenderer;
pub use wgpu::SurfaceError;

/// Receives the lifecycle of a drawing surface, in order:
/// created once per surface, changed on every size change (and once right
/// after creation), and one draw call per displayed frame.
///
/// All three run on the thread that owns the event loop.
pub trait SurfaceRenderer {
    /// Surface (re)created: compile programs, load resources.
    fn on_surface_created(&mut self, gpu: &GpuContext);

    /// Surface size changed; `gpu` has already been resized.
    fn on_surface_changed(&mut self, gpu: &GpuContext, width: u32, height: u32);

    /// Draw and present one frame.
    fn on_draw_frame(&mut self, gpu: &GpuContext) -> Result<(), SurfaceError>;
}
