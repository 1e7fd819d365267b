//! Names and location of the bundled room assets.

use std::path::{Path, PathBuf};

pub const DEFAULT_ASSET_DIR: &str = "assets";
pub const ROOM_MESH: &str = "CubeRoom.obj";
pub const ROOM_TEXTURE: &str = "CubeRoom_BakedDiffuse.png";

#[derive(Clone, Debug, PartialEq)]
pub struct AssetPaths {
    pub root: PathBuf,
    pub mesh: String,
    pub texture: String,
}

impl AssetPaths {
    /// Room assets under `root`.
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mesh: ROOM_MESH.to_owned(),
            texture: ROOM_TEXTURE.to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mesh_path(&self) -> PathBuf {
        self.root.join(&self.mesh)
    }

    pub fn texture_path(&self) -> PathBuf {
        self.root.join(&self.texture)
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ASSET_DIR)
    }
}
