//! Shader compilation utility.

use anyhow::{Result, bail};
use wgpu::{Device, ErrorFilter, ShaderModule, ShaderModuleDescriptor, ShaderSource};

/// Vertex + fragment stages of the room program (`vs_main` / `fs_main`).
pub const ROOM_SHADER: &str = include_str!("shaders/room.wgsl");

/// Compile a WGSL module holding a vertex/fragment pair.
///
/// Validation errors are captured in an error scope and returned instead of
/// reaching the device's uncaptured error handler.
pub fn compile_program(device: &Device, label: &str, source: &str) -> Result<ShaderModule> {
    device.push_error_scope(ErrorFilter::Validation);
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(label),
        source: ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        bail!("shader '{label}' failed to compile: {err}");
    }
    log::debug!("Compiled shader '{label}'");
    Ok(module)
}
