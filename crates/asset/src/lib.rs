//! Asset loading/parsers for the room scene.
//! OBJ meshes (positions + UVs) and RGBA8 textures with a CPU-built mip chain.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod paths;
pub mod texture;

pub use error::{AssetError, AssetResult};
pub use mesh::{MeshData, MeshVertex};
pub use paths::AssetPaths;
pub use texture::TextureData;

/// Load the room mesh and its baked diffuse texture.
pub fn load_room(paths: &AssetPaths) -> AssetResult<(MeshData, TextureData)> {
    let mesh = obj::load_obj_from_path(paths.mesh_path())?;
    let texture = TextureData::load(paths.texture_path())?;
    Ok((mesh, texture))
}
