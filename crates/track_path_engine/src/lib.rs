//! Track-Path-Engine: kubische Bézier-Pfade und Straßen-Extrusion.
//!
//! Layer-neutral und ohne Host-Abhängigkeiten. Datenfluss:
//! Anker → [`CubicBezierPath`] → Abtastpunkte → [`ExtrudedMesh`].

pub mod curve;
pub mod error;
pub mod mesh;
pub mod path;

pub use curve::CubicBezierCurve;
pub use error::{MeshError, PathError};
pub use mesh::{ExtrudedMesh, SubMesh, TrackVertex, build_mesh, extrude_along_path, sample_path};
pub use path::{CubicBezierPath, PathType, add_point, remove_point};

/// Baut einen interpolierten Pfad durch `anchors`.
///
/// `closed = true` schließt die Schleife zwischen letztem und erstem Anker.
pub fn build_path(anchors: &[glam::Vec3], closed: bool) -> Result<CubicBezierPath, PathError> {
    let path_type = if closed {
        PathType::Closed
    } else {
        PathType::Open
    };
    CubicBezierPath::interpolate(anchors, path_type)
}
