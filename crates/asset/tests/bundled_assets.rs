use std::path::PathBuf;

use asset::{AssetError, AssetPaths, load_room};

fn bundled() -> AssetPaths {
    AssetPaths::in_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets"))
}

#[test]
fn bundled_room_loads() {
    let (mesh, texture) = load_room(&bundled()).expect("bundled assets load");

    // six inward faces, two triangles each, no shared corners across faces
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.vertices.len(), 24);
    assert!(mesh.is_valid());

    let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
    assert_eq!(min_y, 0.0, "room floor sits at y = 0 in model space");
    assert!(
        mesh.vertices
            .iter()
            .all(|v| (0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]))
    );

    assert!(texture.is_valid());
    assert_eq!((texture.width, texture.height), (384, 256));
    assert_eq!(texture.into_mip_chain().len(), 9);
}

#[test]
fn missing_room_directory_is_io_error() {
    let err = load_room(&AssetPaths::in_dir("/nonexistent/room/assets")).unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }));
    assert!(err.is_not_found());
}

#[test]
fn missing_texture_fails_after_mesh() {
    let mut paths = bundled();
    paths.texture = "Missing.png".into();
    let err = load_room(&paths).unwrap_err();
    assert!(err.to_string().contains("Missing.png"), "{err}");
}
