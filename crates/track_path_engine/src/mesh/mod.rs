//! Straßen-Mesh: Abtastung eines Pfads und Extrusion eines Bandes mit Ober-,
//! Unter- und Seitenflächen.

mod extrude;
mod sample;

pub use extrude::extrude_along_path;
pub use sample::sample_path;

use crate::error::MeshError;
use crate::path::CubicBezierPath;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::Serialize;

/// Vertices pro Abtastpunkt: 2 oben, 2 unten, 4 Duplikate für die Seitenwände.
pub const VERTS_PER_SAMPLE: usize = 8;

/// Teil-Mesh eines extrudierten Bandes (eigenes Material beim Host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubMesh {
    /// Fahrbahn-Oberseite
    Road,
    /// Unterseite
    Underside,
    /// Linke und rechte Seitenwand
    Sides,
}

impl SubMesh {
    /// Alle Teil-Meshes in Material-Reihenfolge.
    pub const ALL: [SubMesh; 3] = [SubMesh::Road, SubMesh::Underside, SubMesh::Sides];
}

/// Vertex für interleavte GPU-Buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrackVertex {
    /// Position im 3D-Raum
    pub position: [f32; 3],
    /// Flächennormale
    pub normal: [f32; 3],
    /// Texturkoordinate (u quer, v entlang des Pfads)
    pub uv: [f32; 2],
}

/// Ergebnis der Extrusion: parallele Vertex-Attribute und drei Index-Listen.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExtrudedMesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub road_triangles: Vec<u32>,
    pub underside_triangles: Vec<u32>,
    pub side_triangles: Vec<u32>,
}

impl ExtrudedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Index-Liste eines Teil-Meshes.
    pub fn triangles(&self, sub_mesh: SubMesh) -> &[u32] {
        match sub_mesh {
            SubMesh::Road => &self.road_triangles,
            SubMesh::Underside => &self.underside_triangles,
            SubMesh::Sides => &self.side_triangles,
        }
    }

    /// Anzahl Dreiecke eines Teil-Meshes.
    pub fn triangle_count(&self, sub_mesh: SubMesh) -> usize {
        self.triangles(sub_mesh).len() / 3
    }

    /// Position, Normale und UV zu einem Vertex-Array zusammengeführt.
    pub fn interleaved(&self) -> Vec<TrackVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| TrackVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// Tastet `path` mit `sample_count` Intervallen ab und extrudiert das Straßenband.
///
/// `width` ist der seitliche Versatz je Seite, `depth` die Dicke nach unten.
pub fn build_mesh(
    path: &CubicBezierPath,
    sample_count: usize,
    width: f32,
    depth: f32,
) -> Result<ExtrudedMesh, MeshError> {
    if sample_count == 0 {
        return Err(MeshError::TooFewSamples(sample_count));
    }
    if !(width.is_finite() && depth.is_finite() && width >= 0.0 && depth >= 0.0) {
        return Err(MeshError::InvalidDimensions { width, depth });
    }

    let points = sample_path(path, sample_count);
    let mesh = extrude_along_path(&points, width, depth, path.path_type())
        .ok_or(MeshError::TooFewSamples(sample_count))?;

    log::debug!(
        "Straßen-Mesh erzeugt: {} Abtastpunkte, {} Vertices, {} Dreiecke",
        points.len(),
        mesh.vertex_count(),
        SubMesh::ALL
            .iter()
            .map(|s| mesh.triangle_count(*s))
            .sum::<usize>()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests;
