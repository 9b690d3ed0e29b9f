//! Extrusion eines Straßenbandes entlang einer Punktfolge.
//!
//! Vertex-Layout je Abtastpunkt (Basis `8·i`):
//! 0/1 Oberkante links/rechts, 2/3 Unterkante links/rechts,
//! 4..7 Duplikate von 0..3 für flach schattierte Seitenwände.

use super::{ExtrudedMesh, VERTS_PER_SAMPLE};
use crate::path::PathType;
use glam::{Vec2, Vec3};

/// Zwei Dreiecke der Oberseite relativ zum aktuellen Basis-Vertex.
const ROAD_TRIANGLE_MAP: [u32; 6] = [1, 8, 0, 9, 8, 1];

/// Beide Seitenwände (je zwei Dreiecke) relativ zum aktuellen Basis-Vertex.
const SIDES_TRIANGLE_MAP: [u32; 12] = [14, 6, 4, 14, 4, 12, 7, 15, 5, 5, 15, 13];

/// Versatz der Unterkante gegenüber der Oberkante im Vertex-Layout.
const UNDERSIDE_OFFSET: u32 = 2;

/// Horizontale Senkrechte (XZ-Ebene) zu `direction`, normiert.
fn horizontal_perpendicular(direction: Vec3) -> Vec3 {
    Vec3::new(-direction.z, 0.0, direction.x).normalize_or_zero()
}

/// Fahrtrichtung am Punkt `i`.
///
/// Letzter Punkt: offen über die beiden vorherigen Punkte, geschlossen über Punkt 1.
fn direction_at(points: &[Vec3], i: usize, path_type: PathType) -> Vec3 {
    let last = points.len() - 1;
    if i < last {
        return points[i + 1] - points[i];
    }
    match path_type {
        PathType::Closed => points[1] - points[i],
        PathType::Open if i >= 2 => points[i - 1] - points[i - 2],
        PathType::Open => points[i] - points[i - 1],
    }
}

/// Extrudiert ein Band der halben Breite `width` und Dicke `depth` entlang `points`.
///
/// Gibt `None` zurück bei weniger als 2 Punkten. Zusammenfallende Punkte
/// ergeben eine Null-Senkrechte (das Band schrumpft dort auf die Mittellinie).
pub fn extrude_along_path(
    points: &[Vec3],
    width: f32,
    depth: f32,
    path_type: PathType,
) -> Option<ExtrudedMesh> {
    if points.len() < 2 {
        return None;
    }

    let num_points = points.len();
    let num_verts = num_points * VERTS_PER_SAMPLE;
    let vert_modulo = num_verts as u32;
    let num_segments = num_points - 1;
    let depth_offset = Vec3::new(0.0, depth, 0.0);
    let v_step = 1.0 / num_segments as f32;

    let mut mesh = ExtrudedMesh {
        vertices: Vec::with_capacity(num_verts),
        uvs: Vec::with_capacity(num_verts),
        normals: Vec::with_capacity(num_verts),
        road_triangles: Vec::with_capacity(num_segments * ROAD_TRIANGLE_MAP.len()),
        underside_triangles: Vec::with_capacity(num_segments * ROAD_TRIANGLE_MAP.len()),
        side_triangles: Vec::with_capacity(num_segments * SIDES_TRIANGLE_MAP.len()),
    };

    for (i, point) in points.iter().enumerate() {
        let perp = horizontal_perpendicular(direction_at(points, i, path_type));

        let side_a = *point - perp * width;
        let side_b = *point + perp * width;
        let bottom_a = side_a - depth_offset;
        let bottom_b = side_b - depth_offset;

        // Oberseite, Unterseite, dann Duplikate für die Seitenwände
        mesh.vertices
            .extend_from_slice(&[side_a, side_b, bottom_a, bottom_b]);
        mesh.vertices
            .extend_from_slice(&[side_a, side_b, bottom_a, bottom_b]);

        let v = i as f32 * v_step;
        mesh.uvs.extend_from_slice(&[
            Vec2::new(0.0, v),
            Vec2::new(1.0, v),
            Vec2::new(0.0, v),
            Vec2::new(1.0, v),
            // Seitenwände: u = 1 an der Oberkante, u = 0 an der Unterkante
            Vec2::new(1.0, v),
            Vec2::new(1.0, v),
            Vec2::new(0.0, v),
            Vec2::new(0.0, v),
        ]);

        mesh.normals.extend_from_slice(&[
            Vec3::Y,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::NEG_Y,
            -perp,
            perp,
            -perp,
            perp,
        ]);

        if i < num_segments {
            let base = (i * VERTS_PER_SAMPLE) as u32;
            // Umgekehrte Reihenfolge → Unterseite zeigt nach unten
            let pairs = ROAD_TRIANGLE_MAP.iter().zip(ROAD_TRIANGLE_MAP.iter().rev());
            for (offset, reversed) in pairs {
                mesh.road_triangles.push((base + offset) % vert_modulo);
                mesh.underside_triangles
                    .push((base + reversed + UNDERSIDE_OFFSET) % vert_modulo);
            }
            mesh.side_triangles.extend(
                SIDES_TRIANGLE_MAP
                    .iter()
                    .map(|offset| (base + offset) % vert_modulo),
            );
        }
    }

    Some(mesh)
}
