use super::*;
use crate::path::PathType;
use approx::assert_abs_diff_eq;

fn straight_points() -> Vec<Vec3> {
    vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]
}

fn square_path() -> CubicBezierPath {
    let anchors = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
        Vec3::new(0.0, 0.0, 10.0),
    ];
    CubicBezierPath::interpolate(&anchors, PathType::Closed).unwrap()
}

fn assert_indices_valid(mesh: &ExtrudedMesh) {
    let count = mesh.vertex_count() as u32;
    for sub_mesh in SubMesh::ALL {
        let indices = mesh.triangles(sub_mesh);
        assert!(!indices.is_empty(), "{sub_mesh:?} ist leer");
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| i < count), "{sub_mesh:?}: Index >= {count}");
    }
}

// ── Extrusion ──

#[test]
fn test_two_points_give_sixteen_vertices() {
    let mesh = extrude_along_path(&straight_points(), 1.0, 1.0, PathType::Open)
        .expect("2 Punkte reichen");

    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.uvs.len(), 16);
    assert_eq!(mesh.normals.len(), 16);
    assert_eq!(mesh.road_triangles.len(), 6);
    assert_eq!(mesh.underside_triangles.len(), 6);
    assert_eq!(mesh.side_triangles.len(), 12);
    assert_indices_valid(&mesh);
}

#[test]
fn test_fewer_than_two_points_is_empty() {
    assert!(extrude_along_path(&[], 1.0, 1.0, PathType::Open).is_none());
    assert!(extrude_along_path(&[Vec3::ONE], 1.0, 1.0, PathType::Closed).is_none());
}

#[test]
fn test_buffer_sizes_scale_with_points() {
    let points: Vec<Vec3> = (0..7)
        .map(|i| Vec3::new(i as f32 * 3.0, 0.0, (i as f32 * 0.7).sin() * 4.0))
        .collect();
    let n = points.len();
    let mesh = extrude_along_path(&points, 2.0, 0.5, PathType::Open).unwrap();

    assert_eq!(mesh.vertex_count(), 8 * n);
    assert_eq!(mesh.uvs.len(), 8 * n);
    assert_eq!(mesh.normals.len(), 8 * n);
    assert_eq!(mesh.triangle_count(SubMesh::Road), 2 * (n - 1));
    assert_eq!(mesh.triangle_count(SubMesh::Underside), 2 * (n - 1));
    assert_eq!(mesh.triangle_count(SubMesh::Sides), 4 * (n - 1));
    assert_indices_valid(&mesh);
}

#[test]
fn test_cross_section_layout() {
    let mesh = extrude_along_path(&straight_points(), 1.0, 0.5, PathType::Open).unwrap();
    // Fahrtrichtung +X → Senkrechte +Z
    let v = &mesh.vertices;
    assert!(v[0].abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    assert!(v[1].abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
    assert!(v[2].abs_diff_eq(Vec3::new(0.0, -0.5, -1.0), 1e-6));
    assert!(v[3].abs_diff_eq(Vec3::new(0.0, -0.5, 1.0), 1e-6));
    assert_eq!(&v[4..8], &v[0..4]);

    assert_eq!(mesh.normals[0], Vec3::Y);
    assert_eq!(mesh.normals[3], Vec3::NEG_Y);
    assert!(mesh.normals[4].abs_diff_eq(Vec3::NEG_Z, 1e-6));
    assert!(mesh.normals[5].abs_diff_eq(Vec3::Z, 1e-6));
}

#[test]
fn test_uvs_run_along_path() {
    let points = vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
    let mesh = extrude_along_path(&points, 1.0, 1.0, PathType::Open).unwrap();
    assert_eq!(mesh.uvs[0], Vec2::new(0.0, 0.0));
    assert_eq!(mesh.uvs[1], Vec2::new(1.0, 0.0));
    assert_abs_diff_eq!(mesh.uvs[8].y, 0.5);
    assert_abs_diff_eq!(mesh.uvs[16].y, 1.0);
    // Seitenwände: Oberkante u = 1, Unterkante u = 0
    assert_eq!(mesh.uvs[4].x, 1.0);
    assert_eq!(mesh.uvs[6].x, 0.0);
}

#[test]
fn test_open_end_uses_previous_direction() {
    // Letzter Punkt knickt nach +Z ab, die Senkrechte folgt trotzdem p1 - p0
    let points = vec![
        Vec3::ZERO,
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(20.0, 0.0, 10.0),
    ];
    let mesh = extrude_along_path(&points, 1.0, 1.0, PathType::Open).unwrap();
    assert!(mesh.vertices[16].abs_diff_eq(Vec3::new(20.0, 0.0, 9.0), 1e-5));
    assert!(mesh.vertices[17].abs_diff_eq(Vec3::new(20.0, 0.0, 11.0), 1e-5));
}

#[test]
fn test_closed_end_wraps_to_second_point() {
    let points = vec![
        Vec3::ZERO,
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
        Vec3::ZERO,
    ];
    let mesh = extrude_along_path(&points, 1.0, 1.0, PathType::Closed).unwrap();
    // Letzter Punkt = erster Punkt, gleiche Richtung → identischer Querschnitt
    for k in 0..8 {
        assert!(mesh.vertices[24 + k].abs_diff_eq(mesh.vertices[k], 1e-6));
    }
}

#[test]
fn test_triangles_face_along_vertex_normals() {
    let mesh = extrude_along_path(&straight_points(), 1.0, 1.0, PathType::Open).unwrap();
    for sub_mesh in SubMesh::ALL {
        for tri in mesh.triangles(sub_mesh).chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face_normal = (b - a).cross(c - a);
            let vertex_normal = mesh.normals[tri[0] as usize];
            assert!(
                face_normal.dot(vertex_normal) > 0.0,
                "{sub_mesh:?}: Dreieck {tri:?} zeigt gegen die Normale"
            );
        }
    }
}

#[test]
fn test_coincident_points_do_not_produce_nan() {
    let points = vec![Vec3::ZERO, Vec3::ZERO, Vec3::X];
    let mesh = extrude_along_path(&points, 1.0, 1.0, PathType::Open).unwrap();
    assert!(mesh.vertices.iter().all(|v| v.is_finite()));
    assert!(mesh.normals.iter().all(|n| n.is_finite()));
}

// ── Abtastung ──

#[test]
fn test_sample_path_count_and_endpoints() {
    let anchors = [Vec3::ZERO, Vec3::new(5.0, 1.0, 5.0), Vec3::new(12.0, 0.0, 3.0)];
    let path = CubicBezierPath::interpolate(&anchors, PathType::Open).unwrap();
    let points = sample_path(&path, 10);
    assert_eq!(points.len(), 11);
    assert_eq!(points[0], anchors[0]);
    assert_eq!(points[10], anchors[2]);
}

#[test]
fn test_sample_closed_path_closes() {
    let points = sample_path(&square_path(), 16);
    assert_eq!(points.first(), points.last());
}

// ── build_mesh ──

#[test]
fn test_build_mesh_closed_loop_seam() {
    let mesh = build_mesh(&square_path(), 40, 2.0, 0.5).unwrap();
    assert_eq!(mesh.vertex_count(), 8 * 41);
    assert_indices_valid(&mesh);
    let last = 8 * 40;
    for k in 0..8 {
        assert!(mesh.vertices[last + k].abs_diff_eq(mesh.vertices[k], 1e-4));
    }
}

#[test]
fn test_build_mesh_rejects_zero_samples() {
    assert_eq!(
        build_mesh(&square_path(), 0, 1.0, 1.0),
        Err(MeshError::TooFewSamples(0))
    );
}

#[test]
fn test_build_mesh_rejects_bad_dimensions() {
    assert!(matches!(
        build_mesh(&square_path(), 8, f32::NAN, 1.0),
        Err(MeshError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        build_mesh(&square_path(), 8, 1.0, -0.5),
        Err(MeshError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_build_mesh_is_deterministic() {
    let a = build_mesh(&square_path(), 25, 3.0, 1.0).unwrap();
    let b = build_mesh(&square_path(), 25, 3.0, 1.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_interleaved_vertices() {
    let mesh = build_mesh(&square_path(), 4, 1.0, 1.0).unwrap();
    let interleaved = mesh.interleaved();
    assert_eq!(interleaved.len(), mesh.vertex_count());
    assert_eq!(interleaved[3].position, mesh.vertices[3].to_array());
    assert_eq!(interleaved[3].normal, mesh.normals[3].to_array());
    assert_eq!(interleaved[3].uv, mesh.uvs[3].to_array());

    let bytes: &[u8] = bytemuck::cast_slice(&interleaved);
    assert_eq!(bytes.len(), interleaved.len() * std::mem::size_of::<TrackVertex>());
    assert_eq!(std::mem::size_of::<TrackVertex>(), 32);
}
