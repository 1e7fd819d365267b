//! CPU-side mesh representation used by loaders.

/// Vertex with position/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both buffers are non-empty and every index is in range.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty()
            && !self.indices.is_empty()
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < self.vertices.len())
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default(); 3], vec![0, 1, 2]);
        assert!(data.is_valid());
        assert_eq!(data.triangle_count(), 1);
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let data = MeshData::new(vec![MeshVertex::default(); 3], vec![0, 1, 3]);
        assert!(!data.is_valid());
    }
}
