//! Application-Layer: Streckengenerierung, Endlos-Strecke und Pfad-Follower.

pub mod follower;
pub mod race_track;
pub mod streaming;

pub use follower::{FollowerPose, PathFollower};
pub use race_track::RaceTrackGenerator;
pub use streaming::StreamingTrack;

use crate::shared::TrackOptions;
use std::sync::Arc;
use track_path_engine::{build_mesh, CubicBezierPath, ExtrudedMesh, PathType, SubMesh};

/// Ergebnis eines Generierungslaufs: Pfad-Snapshot und extrudiertes Mesh.
#[derive(Debug, Clone)]
pub struct GeneratedTrack {
    pub path: Arc<CubicBezierPath>,
    pub mesh: ExtrudedMesh,
}

impl GeneratedTrack {
    /// Normierter Pfadparameter des nächsten Punkts zu `pos`, mit `closest_tolerance` als Schwelle.
    pub fn closest_norm_param(&self, pos: glam::Vec3, options: &TrackOptions) -> f32 {
        let threshold = options.closest_param_threshold(&self.path);
        self.path.closest_norm_param(pos, threshold)
    }

    /// Einzeilige Zusammenfassung für das Log.
    pub fn summary(&self) -> String {
        format!(
            "{:?}-Pfad: {} Segmente, ~{:.1} m, {} Vertices, Dreiecke oben/unten/seitlich: {}/{}/{}",
            self.path.path_type(),
            self.path.num_curve_segments(),
            self.path.approx_length(),
            self.mesh.vertex_count(),
            self.mesh.triangle_count(SubMesh::Road),
            self.mesh.triangle_count(SubMesh::Underside),
            self.mesh.triangle_count(SubMesh::Sides),
        )
    }
}

/// Baut den Pfad laut `path.path_type` und extrudiert das Straßen-Mesh.
///
/// Geschlossen: feste Anker oder prozedurale Rennstrecke.
/// Offen: Endlos-Strecke mit `streaming.initial_points` Ankern voraus.
pub fn generate_track(options: &TrackOptions) -> anyhow::Result<GeneratedTrack> {
    let path = match options.path.path_type {
        PathType::Closed => {
            let anchors = match options.path.explicit_anchors() {
                Some(anchors) => {
                    log::info!("Verwende {} feste Anker aus der Konfiguration", anchors.len());
                    anchors.to_vec()
                }
                None => RaceTrackGenerator::new(&options.race_track).generate_anchors(),
            };
            Arc::new(CubicBezierPath::interpolate(&anchors, PathType::Closed)?)
        }
        PathType::Open => StreamingTrack::from_options(options)?.snapshot(),
    };

    let mesh = build_mesh(
        &path,
        options.mesh.sample_count,
        options.mesh.width,
        options.mesh.depth,
    )?;

    Ok(GeneratedTrack { path, mesh })
}

/// Schreibt das Mesh als JSON-Datei.
pub fn write_mesh_json(mesh: &ExtrudedMesh, path: &std::path::Path) -> anyhow::Result<()> {
    let content = serde_json::to_string(mesh)?;
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Mesh-Datei {} nicht schreibbar: {}", path.display(), e))?;
    log::info!("Mesh gespeichert nach: {}", path.display());
    Ok(())
}
