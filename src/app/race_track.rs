//! Prozedurale, geschlossene Rennstrecke.
//!
//! Die Ankerpunkte laufen links (−X) nach vorne bis `z = size` und kommen
//! rechts (+X) zurück. Bei 4 Kurvenpunkten entsteht eine Raute.

use crate::shared::options::{
    RaceTrackOptions, RACE_TRACK_CORNERS_MAX, RACE_TRACK_CORNERS_MIN,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use track_path_engine::{CubicBezierPath, PathError, PathType};

/// Minimaler X-Wert der Rückweg-Punkte.
const RETURN_MIN_X: f32 = 10.0;
/// Relativer Z-Jitter um den Cursor (±20 %).
const Z_JITTER: f32 = 0.2;

/// Zufallswert in `[a, b)`; vertauschte Grenzen werden sortiert, gleiche Grenzen ergeben `a`.
pub(crate) fn random_between(rng: &mut StdRng, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Erzeugt reproduzierbare Rennstrecken aus `RaceTrackOptions`.
pub struct RaceTrackGenerator {
    size: f32,
    corners: usize,
    height_variation: f32,
    rng: StdRng,
}

impl RaceTrackGenerator {
    pub fn new(options: &RaceTrackOptions) -> Self {
        Self {
            size: options.size,
            corners: options
                .corners
                .clamp(RACE_TRACK_CORNERS_MIN, RACE_TRACK_CORNERS_MAX),
            height_variation: options.height_variation.abs(),
            rng: StdRng::seed_from_u64(options.seed),
        }
    }

    fn random_height(&mut self) -> f32 {
        let hv = self.height_variation;
        random_between(&mut self.rng, -hv, hv)
    }

    /// Ankerpunkte der Strecke; der Startpunkt liegt im Ursprung.
    ///
    /// Bei 4 Kurvenpunkten 4 Anker (Raute), sonst `corners + 1`.
    pub fn generate_anchors(&mut self) -> Vec<Vec3> {
        let size = self.size;

        if self.corners == RACE_TRACK_CORNERS_MIN {
            // Eigene Höhe je Ecke
            return vec![
                Vec3::ZERO,
                Vec3::new(-size / 2.0, self.random_height(), size / 2.0),
                Vec3::new(0.0, self.random_height(), size),
                Vec3::new(size / 2.0, self.random_height(), size / 2.0),
            ];
        }

        let corners = self.corners;
        let half = corners / 2;
        let dz = size / half as f32;
        let mut cursor = dz;
        let mut anchors = Vec::with_capacity(corners + 1);
        anchors.push(Vec3::ZERO);

        for i in 1..=corners {
            let y = self.random_height();
            let anchor = if i < half {
                // Hinweg links
                let x = random_between(&mut self.rng, -size, 0.0);
                let z = random_between(
                    &mut self.rng,
                    cursor * (1.0 - Z_JITTER),
                    cursor * (1.0 + Z_JITTER),
                );
                cursor += dz;
                Vec3::new(x, y, z)
            } else if i == half {
                // Wendepunkt ganz vorne
                let x = random_between(&mut self.rng, -size, 0.0);
                Vec3::new(x, y, size)
            } else if i == corners {
                // Letzter Punkt vor der Rückkehr zum Start
                let x = random_between(&mut self.rng, size / 2.0, size);
                Vec3::new(x, y, cursor)
            } else {
                // Rückweg rechts
                let x = random_between(&mut self.rng, RETURN_MIN_X, size);
                let z = random_between(
                    &mut self.rng,
                    cursor * (1.0 + Z_JITTER),
                    cursor * (1.0 - Z_JITTER),
                );
                cursor -= dz;
                Vec3::new(x, y, z)
            };
            anchors.push(anchor);
        }

        log::debug!(
            "Rennstrecke generiert: {} Anker (size={}, corners={})",
            anchors.len(),
            size,
            corners
        );
        anchors
    }

    /// Generiert Anker und baut daraus den geschlossenen Pfad.
    pub fn generate_path(&mut self) -> Result<CubicBezierPath, PathError> {
        let anchors = self.generate_anchors();
        CubicBezierPath::interpolate(&anchors, PathType::Closed)
    }
}
