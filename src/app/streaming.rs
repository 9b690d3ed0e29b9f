//! Endlos-Strecke: ein gleitendes Ankerfenster mit Floating Origin.
//!
//! Jede Änderung baut einen neuen Pfad und tauscht den `Arc`-Snapshot aus.
//! Leser, die einen alten Snapshot halten, sehen weiterhin einen gültigen Pfad.

use super::race_track::random_between;
use crate::shared::options::{MeshOptions, StreamingOptions, TrackOptions};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use track_path_engine::{
    add_point, build_mesh, remove_point, CubicBezierPath, ExtrudedMesh, MeshError, PathError,
    PathType,
};

/// Gleitendes Ankerfenster samt aktuellem Pfad.
#[derive(Debug)]
pub struct StreamingTrack {
    anchors: Vec<Vec3>,
    path_type: PathType,
    path: Arc<CubicBezierPath>,
    options: StreamingOptions,
    rng: StdRng,
}

impl StreamingTrack {
    /// Baut die Strecke aus festen Startankern.
    pub fn new(
        anchors: Vec<Vec3>,
        path_type: PathType,
        options: StreamingOptions,
    ) -> Result<Self, PathError> {
        let path = CubicBezierPath::interpolate(&anchors, path_type)?;
        Ok(Self {
            anchors,
            path_type,
            path: Arc::new(path),
            rng: StdRng::seed_from_u64(options.seed),
            options,
        })
    }

    /// Startanker aus `path.anchors` (oder eine Gerade entlang +Z), dann
    /// `streaming.initial_points` neue Anker.
    pub fn from_options(options: &TrackOptions) -> Result<Self, PathError> {
        let anchors = options
            .path
            .explicit_anchors()
            .map(<[Vec3]>::to_vec)
            .unwrap_or_else(|| {
                vec![
                    Vec3::ZERO,
                    Vec3::new(0.0, 0.0, options.streaming.distance_between_points),
                ]
            });

        let mut track = Self::new(anchors, PathType::Open, options.streaming.clone())?;
        for _ in 0..options.streaming.initial_points {
            track.extend()?;
        }
        log::info!(
            "Endlos-Strecke erstellt: {} Anker, {} Segmente",
            track.anchors.len(),
            track.path.num_curve_segments()
        );
        Ok(track)
    }

    pub fn anchors(&self) -> &[Vec3] {
        &self.anchors
    }

    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    /// Aktueller Pfad.
    pub fn path(&self) -> &CubicBezierPath {
        &self.path
    }

    /// Geteilter Snapshot des aktuellen Pfads.
    pub fn snapshot(&self) -> Arc<CubicBezierPath> {
        Arc::clone(&self.path)
    }

    /// Übernimmt `anchors` nur, wenn daraus ein gültiger Pfad entsteht.
    fn commit(&mut self, anchors: Vec<Vec3>) -> Result<(), PathError> {
        let path = CubicBezierPath::interpolate(&anchors, self.path_type)?;
        self.anchors = anchors;
        self.path = Arc::new(path);
        log::debug!(
            "Endlos-Strecke neu aufgebaut: {} Anker",
            self.anchors.len()
        );
        Ok(())
    }

    /// Nächster Anker: `distance` vor dem letzten, seitlich und in der Höhe
    /// zufällig gegenüber dem letzten versetzt (Random Walk).
    fn next_anchor(&mut self, distance: f32) -> Vec3 {
        let last = self.anchors.last().copied().unwrap_or(Vec3::ZERO);
        let lateral = self.options.lateral_jitter;
        let vertical = self.options.vertical_jitter;
        last + Vec3::new(
            random_between(&mut self.rng, -lateral, lateral),
            random_between(&mut self.rng, -vertical, vertical),
            distance,
        )
    }

    /// Hängt einen Anker im Standardabstand an.
    pub fn extend(&mut self) -> Result<(), PathError> {
        self.extend_by(self.options.distance_between_points)
    }

    /// Hängt einen Anker `distance` vor dem letzten Anker an.
    pub fn extend_by(&mut self, distance: f32) -> Result<(), PathError> {
        let anchor = self.next_anchor(distance);
        self.commit(add_point(&self.anchors, anchor))
    }

    /// Entfernt den Anker `index`; unter 2 Anker bleibt die Strecke unverändert.
    pub fn remove_anchor(&mut self, index: usize) -> Result<(), PathError> {
        let anchors = remove_point(&self.anchors, index)?;
        self.commit(anchors)
    }

    /// Verschiebt alle Anker so, dass Anker 0 im Ursprung liegt.
    ///
    /// Gibt die abgezogene Verschiebung zurück.
    pub fn rebase_origin(&mut self) -> Result<Vec3, PathError> {
        let shift = self.anchors.first().copied().unwrap_or(Vec3::ZERO);
        let anchors = self.anchors.iter().map(|a| *a - shift).collect();
        self.commit(anchors)?;
        Ok(shift)
    }

    /// Ein Fenster-Schritt: neuen Anker anhängen, Anker 0 entfernen, Ursprung verschieben.
    ///
    /// Der Pfad wird dabei genau einmal neu gebaut. Gibt die Verschiebung zurück.
    pub fn advance_window(&mut self) -> Result<Vec3, PathError> {
        let anchor = self.next_anchor(self.options.distance_between_points);
        let moved = remove_point(&add_point(&self.anchors, anchor), 0)?;
        let shift = moved.first().copied().unwrap_or(Vec3::ZERO);
        self.commit(moved.iter().map(|a| *a - shift).collect())?;
        log::debug!("Fenster verschoben um {shift}");
        Ok(shift)
    }

    /// Extrudiert den aktuellen Pfad.
    pub fn build_mesh(&self, mesh: &MeshOptions) -> Result<ExtrudedMesh, MeshError> {
        build_mesh(&self.path, mesh.sample_count, mesh.width, mesh.depth)
    }
}
