//! Zentrale Konfiguration für das Track-Path-Tool.
//!
//! `TrackOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::ensure;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use track_path_engine::{CubicBezierPath, PathType};

// ── Mesh ────────────────────────────────────────────────────────────

/// Anzahl Abtastintervalle entlang des Pfads.
pub const MESH_SAMPLE_COUNT: usize = 200;
/// Seitlicher Versatz je Fahrbahnseite in Welteinheiten.
pub const MESH_WIDTH: f32 = 5.0;
/// Dicke des Straßenbandes nach unten.
pub const MESH_DEPTH: f32 = 1.0;

// ── Pfad ────────────────────────────────────────────────────────────

/// Toleranz der Nächster-Punkt-Suche in Welteinheiten.
pub const CLOSEST_TOLERANCE: f32 = 0.15;
/// Parameter-Schwelle, falls der Pfad keine messbare Länge hat.
pub const CLOSEST_PARAM_FALLBACK: f32 = 0.000_001;

// ── Rennstrecke ─────────────────────────────────────────────────────

/// Standard-Ausdehnung der Rennstrecke.
pub const RACE_TRACK_SIZE: f32 = 300.0;
/// Minimale Ausdehnung.
pub const RACE_TRACK_SIZE_MIN: f32 = 10.0;
/// Maximale Ausdehnung.
pub const RACE_TRACK_SIZE_MAX: f32 = 1000.0;
/// Standard-Anzahl Kurvenpunkte.
pub const RACE_TRACK_CORNERS: usize = 8;
/// Minimale Anzahl Kurvenpunkte (Raute).
pub const RACE_TRACK_CORNERS_MIN: usize = 4;
/// Maximale Anzahl Kurvenpunkte.
pub const RACE_TRACK_CORNERS_MAX: usize = 50;
/// Standard-Höhenvariation (±) der Kurvenpunkte.
pub const RACE_TRACK_HEIGHT_VARIATION: f32 = 5.0;
/// Maximale Höhenvariation.
pub const RACE_TRACK_HEIGHT_VARIATION_MAX: f32 = 50.0;

// ── Endlos-Strecke ──────────────────────────────────────────────────

/// Anker, die beim Start an die Startanker angehängt werden.
pub const STREAMING_INITIAL_POINTS: usize = 5;
/// Abstand neuer Anker in Fahrtrichtung (+Z).
pub const STREAMING_DISTANCE_BETWEEN_POINTS: f32 = 100.0;
/// Maximaler seitlicher Versatz neuer Anker.
pub const STREAMING_LATERAL_JITTER: f32 = 50.0;
/// Maximaler Höhenversatz neuer Anker.
pub const STREAMING_VERTICAL_JITTER: f32 = 20.0;
/// Minimale Ankerzahl des Fensters (zwei Segmente).
pub const STREAMING_MIN_WINDOW_ANCHORS: usize = 3;

// ── Follower ────────────────────────────────────────────────────────

/// Geschwindigkeit in Prozent der Pfadlänge pro Sekunde.
pub const FOLLOWER_SPEED: f32 = 5.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Abtastung und Querschnitt des Straßen-Meshes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshOptions {
    /// Anzahl Abtastintervalle (ergibt `sample_count + 1` Querschnitte)
    pub sample_count: usize,
    /// Seitlicher Versatz je Seite
    pub width: f32,
    /// Dicke nach unten
    pub depth: f32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            sample_count: MESH_SAMPLE_COUNT,
            width: MESH_WIDTH,
            depth: MESH_DEPTH,
        }
    }
}

/// Pfadtyp, Nächster-Punkt-Toleranz und optionale feste Anker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathOptions {
    /// `"closed"` → Rennstrecke, `"open"` → Endlos-Strecke
    pub path_type: PathType,
    /// Toleranz der Nächster-Punkt-Suche in Welteinheiten
    pub closest_tolerance: f32,
    /// Feste Anker; ab 2 Einträgen ersetzen sie die Generierung
    pub anchors: Vec<Vec3>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            path_type: PathType::Closed,
            closest_tolerance: CLOSEST_TOLERANCE,
            anchors: Vec::new(),
        }
    }
}

impl PathOptions {
    /// Feste Anker, falls genug für einen Pfad konfiguriert sind.
    pub fn explicit_anchors(&self) -> Option<&[Vec3]> {
        (self.anchors.len() >= 2).then_some(self.anchors.as_slice())
    }
}

/// Parameter der prozeduralen Rennstrecke.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RaceTrackOptions {
    pub size: f32,
    pub corners: usize,
    pub height_variation: f32,
    /// Seed für reproduzierbare Strecken
    pub seed: u64,
}

impl Default for RaceTrackOptions {
    fn default() -> Self {
        Self {
            size: RACE_TRACK_SIZE,
            corners: RACE_TRACK_CORNERS,
            height_variation: RACE_TRACK_HEIGHT_VARIATION,
            seed: 0,
        }
    }
}

/// Parameter der Endlos-Strecke.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamingOptions {
    pub initial_points: usize,
    pub distance_between_points: f32,
    pub lateral_jitter: f32,
    pub vertical_jitter: f32,
    pub seed: u64,
}

impl Default for StreamingOptions {
    fn default() -> Self {
        Self {
            initial_points: STREAMING_INITIAL_POINTS,
            distance_between_points: STREAMING_DISTANCE_BETWEEN_POINTS,
            lateral_jitter: STREAMING_LATERAL_JITTER,
            vertical_jitter: STREAMING_VERTICAL_JITTER,
            seed: 0,
        }
    }
}

/// Startwerte des Pfad-Followers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FollowerOptions {
    /// Prozent der Pfadlänge pro Sekunde
    pub speed: f32,
    /// Normierte Startposition in [0, 1]
    pub start_position: f32,
    /// Konstanter Versatz zur Pfadposition
    pub offset: Vec3,
    /// Am Ende wieder bei 0 beginnen
    pub looping: bool,
    /// Endlos-Strecke beim Fahren nachgenerieren
    pub generate_ahead: bool,
}

impl Default for FollowerOptions {
    fn default() -> Self {
        Self {
            speed: FOLLOWER_SPEED,
            start_position: 0.0,
            offset: Vec3::ZERO,
            looping: true,
            generate_ahead: true,
        }
    }
}

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `track_path_tool.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackOptions {
    pub mesh: MeshOptions,
    pub path: PathOptions,
    pub race_track: RaceTrackOptions,
    pub streaming: StreamingOptions,
    pub follower: FollowerOptions,
}

impl TrackOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("track-path-tool"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("track_path_tool.toml")
    }

    /// Prüft Wertebereiche aller Abschnitte.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mesh = &self.mesh;
        ensure!(mesh.sample_count >= 1, "mesh.sample_count muss >= 1 sein");
        ensure!(
            mesh.width.is_finite() && mesh.width >= 0.0,
            "mesh.width ungültig: {}",
            mesh.width
        );
        ensure!(
            mesh.depth.is_finite() && mesh.depth >= 0.0,
            "mesh.depth ungültig: {}",
            mesh.depth
        );

        ensure!(
            self.path.closest_tolerance.is_finite() && self.path.closest_tolerance > 0.0,
            "path.closest_tolerance muss > 0 sein"
        );
        ensure!(
            self.path.anchors.iter().all(|a| a.is_finite()),
            "path.anchors enthält ungültige Koordinaten"
        );

        let race = &self.race_track;
        ensure!(
            (RACE_TRACK_SIZE_MIN..=RACE_TRACK_SIZE_MAX).contains(&race.size),
            "race_track.size {} außerhalb [{}, {}]",
            race.size,
            RACE_TRACK_SIZE_MIN,
            RACE_TRACK_SIZE_MAX
        );
        ensure!(
            (RACE_TRACK_CORNERS_MIN..=RACE_TRACK_CORNERS_MAX).contains(&race.corners),
            "race_track.corners {} außerhalb [{}, {}]",
            race.corners,
            RACE_TRACK_CORNERS_MIN,
            RACE_TRACK_CORNERS_MAX
        );
        ensure!(
            (0.0..=RACE_TRACK_HEIGHT_VARIATION_MAX).contains(&race.height_variation),
            "race_track.height_variation {} außerhalb [0, {}]",
            race.height_variation,
            RACE_TRACK_HEIGHT_VARIATION_MAX
        );

        let streaming = &self.streaming;
        ensure!(
            streaming.distance_between_points.is_finite()
                && streaming.distance_between_points > 0.0,
            "streaming.distance_between_points muss > 0 sein"
        );
        ensure!(
            streaming.lateral_jitter.is_finite() && streaming.lateral_jitter >= 0.0,
            "streaming.lateral_jitter muss >= 0 sein"
        );
        ensure!(
            streaming.vertical_jitter.is_finite() && streaming.vertical_jitter >= 0.0,
            "streaming.vertical_jitter muss >= 0 sein"
        );
        let start_anchors = self.path.explicit_anchors().map_or(2, <[Vec3]>::len);
        ensure!(
            start_anchors + streaming.initial_points >= STREAMING_MIN_WINDOW_ANCHORS,
            "Endlos-Strecke braucht mindestens {} Anker (Start {} + initial_points {})",
            STREAMING_MIN_WINDOW_ANCHORS,
            start_anchors,
            streaming.initial_points
        );

        let follower = &self.follower;
        ensure!(follower.speed.is_finite(), "follower.speed ungültig");
        ensure!(
            (0.0..=1.0).contains(&follower.start_position),
            "follower.start_position muss in [0, 1] liegen"
        );
        ensure!(follower.offset.is_finite(), "follower.offset ungültig");

        Ok(())
    }

    /// Rechnet `closest_tolerance` in eine normierte Parameter-Schwelle für `path` um.
    ///
    /// Pfade ohne messbare Länge erhalten `CLOSEST_PARAM_FALLBACK`.
    pub fn closest_param_threshold(&self, path: &CubicBezierPath) -> f32 {
        path.approx_norm_param_per_unit_length()
            .map(|per_unit| per_unit * self.path.closest_tolerance)
            .unwrap_or(CLOSEST_PARAM_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let opts = TrackOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.mesh.sample_count, MESH_SAMPLE_COUNT);
        assert_eq!(opts.path.path_type, PathType::Closed);
        assert_eq!(opts.race_track.corners, RACE_TRACK_CORNERS);
    }

    #[test]
    fn test_partial_toml_uses_section_defaults() {
        let opts: TrackOptions = toml::from_str(
            r#"
            [mesh]
            width = 2.5

            [path]
            path_type = "open"
            anchors = [[0.0, 0.0, 0.0], [0.0, 1.0, 50.0]]
            "#,
        )
        .expect("TOML gültig");

        assert_eq!(opts.mesh.width, 2.5);
        assert_eq!(opts.mesh.sample_count, MESH_SAMPLE_COUNT);
        assert_eq!(opts.path.path_type, PathType::Open);
        assert_eq!(opts.path.anchors[1], Vec3::new(0.0, 1.0, 50.0));
        assert_eq!(opts.race_track, RaceTrackOptions::default());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("track_path_tool_opts_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("options.toml");

        let mut opts = TrackOptions::default();
        opts.race_track.seed = 42;
        opts.path.anchors = vec![Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)];
        opts.follower.offset = Vec3::new(0.0, 1.5, 0.0);
        opts.save_to_file(&file).unwrap();

        let loaded = TrackOptions::load_from_file(&file);
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_or_broken_file_falls_back_to_defaults() {
        let missing = std::env::temp_dir().join("track_path_tool_gibt_es_nicht.toml");
        assert_eq!(TrackOptions::load_from_file(&missing), TrackOptions::default());

        let dir = std::env::temp_dir().join(format!("track_path_tool_broken_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("broken.toml");
        std::fs::write(&file, "[mesh\nwidth = ").unwrap();
        assert_eq!(TrackOptions::load_from_file(&file), TrackOptions::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut opts = TrackOptions::default();
        opts.race_track.corners = 3;
        assert!(opts.validate().is_err());

        let mut opts = TrackOptions::default();
        opts.race_track.size = 5000.0;
        assert!(opts.validate().is_err());

        let mut opts = TrackOptions::default();
        opts.mesh.sample_count = 0;
        assert!(opts.validate().is_err());

        let mut opts = TrackOptions::default();
        opts.mesh.width = f32::NAN;
        assert!(opts.validate().is_err());

        let mut opts = TrackOptions::default();
        opts.follower.start_position = 1.5;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_validate_requires_two_streaming_segments() {
        let mut opts = TrackOptions::default();
        opts.streaming.initial_points = 0;
        assert!(opts.validate().is_err());

        opts.streaming.initial_points = 1;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_explicit_anchors_need_two_points() {
        let mut path = PathOptions::default();
        assert!(path.explicit_anchors().is_none());
        path.anchors = vec![Vec3::ONE];
        assert!(path.explicit_anchors().is_none());
        path.anchors.push(Vec3::ZERO);
        assert_eq!(path.explicit_anchors().map(<[Vec3]>::len), Some(2));
    }

    #[test]
    fn test_closest_param_threshold_scales_with_length() {
        let opts = TrackOptions::default();
        // Gerade der Länge 30 → 1/30 normierter Parameter pro Einheit
        let path = CubicBezierPath::interpolate(
            &[Vec3::ZERO, Vec3::new(30.0, 0.0, 0.0)],
            PathType::Open,
        )
        .unwrap();
        assert_relative_eq!(
            opts.closest_param_threshold(&path),
            CLOSEST_TOLERANCE / 30.0,
            max_relative = 1e-4
        );

        let degenerate =
            CubicBezierPath::interpolate(&[Vec3::ONE, Vec3::ONE], PathType::Open).unwrap();
        assert_eq!(opts.closest_param_threshold(&degenerate), CLOSEST_PARAM_FALLBACK);
    }
}
