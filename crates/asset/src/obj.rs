//! Minimal OBJ parser: positions and texture coordinates, fan-triangulated.
//!
//! Normals are validated but dropped; the room shader is unlit.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::error::{AssetError, AssetResult};
use crate::mesh::{MeshData, MeshVertex};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> AssetResult<MeshData> {
    let path = path.as_ref();
    log::info!("Loading mesh from {:?}", path);
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = load_obj_from_reader(BufReader::new(file)).map_err(|e| match e {
        AssetError::Io { source, .. } => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    log::info!(
        "Loaded mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> AssetResult<MeshData> {
    ObjParser::default().parse(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> AssetResult<MeshData> {
    load_obj_from_reader(io::Cursor::new(contents))
}

/// Position index plus optional texcoord index, both zero-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct Corner(usize, Option<usize>);

#[derive(Default)]
struct ObjParser {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normal_count: usize,
    unique: HashMap<Corner, u32>,
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl ObjParser {
    fn parse<R: BufRead>(mut self, reader: R) -> AssetResult<MeshData> {
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| AssetError::Io {
                path: Default::default(),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let Some(tag) = parts.next() else { continue };
            match tag {
                "v" => {
                    let x = parse_f32(parts.next(), line_no, "x coordinate")?;
                    let y = parse_f32(parts.next(), line_no, "y coordinate")?;
                    let z = parse_f32(parts.next(), line_no, "z coordinate")?;
                    self.positions.push([x, y, z]);
                }
                "vt" => {
                    let u = parse_f32(parts.next(), line_no, "u coordinate")?;
                    // 1D texture coordinates are allowed by the format.
                    let v = match parts.next() {
                        Some(token) => parse_f32(Some(token), line_no, "v coordinate")?,
                        None => 0.0,
                    };
                    self.texcoords.push([u, v]);
                }
                "vn" => {
                    for what in ["nx", "ny", "nz"] {
                        parse_f32(parts.next(), line_no, what)?;
                    }
                    self.normal_count += 1;
                }
                "f" => self.face(parts, line_no)?,
                // o/g/s/usemtl/mtllib and friends carry nothing we render.
                _ => {}
            }
        }

        if self.indices.is_empty() {
            return Err(AssetError::Empty);
        }
        Ok(MeshData::new(self.vertices, self.indices))
    }

    fn face<'a>(&mut self, tokens: impl Iterator<Item = &'a str>, line_no: usize) -> AssetResult<()> {
        let resolved = tokens
            .map(|token| self.corner(token, line_no))
            .collect::<AssetResult<Vec<Corner>>>()?;
        if resolved.len() < 3 {
            log::warn!(
                "Skipping degenerate face with {} vertices on line {}",
                resolved.len(),
                line_no + 1
            );
            return Ok(());
        }
        let corners = resolved
            .into_iter()
            .map(|corner| self.intern(corner, line_no))
            .collect::<AssetResult<Vec<u32>>>()?;
        for tri in 1..(corners.len() - 1) {
            self.indices
                .extend_from_slice(&[corners[0], corners[tri], corners[tri + 1]]);
        }
        Ok(())
    }

    fn corner(&self, token: &str, line_no: usize) -> AssetResult<Corner> {
        let mut split = token.split('/');
        let pos = match split.next() {
            Some(value) if !value.is_empty() => resolve_index(value, self.positions.len(), line_no)?,
            _ => {
                return Err(AssetError::parse(
                    line_no,
                    format!("malformed face element '{token}'"),
                ));
            }
        };
        let tex = match split.next() {
            Some(value) if !value.is_empty() => {
                Some(resolve_index(value, self.texcoords.len(), line_no)?)
            }
            _ => None,
        };
        if let Some(value) = split.next().filter(|v| !v.is_empty()) {
            resolve_index(value, self.normal_count, line_no)?;
        }
        Ok(Corner(pos, tex))
    }

    fn intern(&mut self, corner: Corner, line_no: usize) -> AssetResult<u32> {
        if let Some(&idx) = self.unique.get(&corner) {
            return Ok(idx);
        }
        let Corner(pos, tex) = corner;
        let uv = tex.map_or([0.0, 0.0], |i| self.texcoords[i]);
        let idx = u32::try_from(self.vertices.len())
            .map_err(|_| AssetError::parse(line_no, format!("too many vertices (>{})", u32::MAX)))?;
        self.vertices.push(MeshVertex::new(self.positions[pos], uv));
        self.unique.insert(corner, idx);
        Ok(idx)
    }
}

fn parse_f32(value: Option<&str>, line_no: usize, what: &str) -> AssetResult<f32> {
    let token = value.ok_or_else(|| AssetError::parse(line_no, format!("missing {what}")))?;
    token
        .parse::<f32>()
        .map_err(|e| AssetError::parse(line_no, format!("invalid {what} '{token}': {e}")))
}

/// Resolve a 1-based (or negative, relative) OBJ index against `len` elements.
fn resolve_index(token: &str, len: usize, line_no: usize) -> AssetResult<usize> {
    let raw = token
        .parse::<i64>()
        .map_err(|_| AssetError::parse(line_no, format!("invalid index '{token}'")))?;
    if raw == 0 {
        return Err(AssetError::parse(line_no, "OBJ indices are 1-based; found 0"));
    }

    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };
    if idx < 0 || idx as usize >= len {
        return Err(AssetError::parse(
            line_no,
            format!("index {raw} resolved out of bounds (len={len})"),
        ));
    }
    Ok(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].uv, [1.0, 0.0]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn quad_is_fan_triangulated_and_shared_corners_deduplicated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nf 1/1 2/2 3/3 4/4\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn same_position_with_different_uv_is_split() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 0.5 0.5\nf 1/1 2/1 3/1\nf 1/2 3/1 2/1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[3].uv, [0.5, 0.5]);
    }

    #[test]
    fn negative_indices_are_relative() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn position_normal_form_without_uv() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
    }

    #[test]
    fn degenerate_face_adds_no_vertices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nf 4 2\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert!(mesh.is_valid());
    }

    #[test]
    fn out_of_bounds_index_reports_line() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        match load_obj_from_str(src) {
            Err(AssetError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn zero_index_is_rejected() {
        assert!(matches!(
            load_obj_from_str("v 0 0 0\nf 0 0 0\n"),
            Err(AssetError::Parse { .. })
        ));
    }

    #[test]
    fn file_without_faces_is_empty() {
        assert!(matches!(
            load_obj_from_str("# nothing\nv 0 0 0\n"),
            Err(AssetError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_io_not_found() {
        let err = load_obj_from_path("definitely/not/here.obj").unwrap_err();
        assert!(err.is_not_found());
    }
}
