//! Pfad aus verketteten kubischen Bézier-Kurven (offen oder geschlossen).
//!
//! Ein `CubicBezierPath` mit `n` Segmenten hat den globalen Parameterbereich
//! `t ∈ [0, n]`. Segment `k` deckt `[k, k+1)` ab, das letzte Segment ist
//! beidseitig geschlossen. Der normierte Parameter `u ∈ [0, 1]` wird über
//! `t = u * n` abgebildet.
//!
//! Der Pfad ist nach dem Aufbau unveränderlich bis auf den Komplett-Austausch
//! der Kontrollpunkte. Topologie-Änderungen laufen über [`add_point`] /
//! [`remove_point`] und einen Neuaufbau per [`CubicBezierPath::interpolate`].

mod anchors;
mod interpolate;

pub use anchors::{add_point, remove_point};

use crate::curve::CubicBezierCurve;
use crate::error::PathError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Topologie eines Pfads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Offener Pfad: erster und letzter Anker sind Endpunkte
    #[default]
    Open,
    /// Geschlossene Schleife: letzter Anker ist mit dem ersten verbunden
    Closed,
}

impl PathType {
    /// Minimale Kontrollpunkt-Anzahl für diesen Typ.
    pub fn min_control_verts(self) -> usize {
        match self {
            PathType::Open => 4,
            PathType::Closed => 7,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PathType::Open => "offenen Pfad",
            PathType::Closed => "geschlossenen Pfad",
        }
    }
}

/// Kette kubischer Bézier-Kurven mit gemeinsam genutzten Endpunkten.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezierPath {
    path_type: PathType,
    control_verts: Vec<Vec3>,
    num_curve_segments: usize,
}

impl CubicBezierPath {
    /// Interpoliert die Anker und erzeugt alle Tangenten-Kontrollpunkte.
    ///
    /// Der Pfad läuft exakt durch jeden Anker, mit stetiger Tangentenrichtung
    /// an inneren Ankern.
    pub fn interpolate(anchors: &[Vec3], path_type: PathType) -> Result<Self, PathError> {
        if anchors.len() < 2 {
            return Err(PathError::TooFewAnchors(anchors.len()));
        }

        let (control_verts, num_curve_segments) = match path_type {
            PathType::Open => (interpolate::open_control_verts(anchors), anchors.len() - 1),
            PathType::Closed => (interpolate::closed_control_verts(anchors), anchors.len()),
        };

        log::debug!(
            "Pfad interpoliert: {} Anker, {} Segmente, {:?}",
            anchors.len(),
            num_curve_segments,
            path_type
        );

        Ok(Self {
            path_type,
            control_verts,
            num_curve_segments,
        })
    }

    /// Übernimmt vollständig vorgegebene Kontrollpunkte.
    ///
    /// Die Anzahl muss die Form `3n+1` haben und das Minimum des Typs erfüllen
    /// (4 offen, 7 geschlossen). Bei geschlossenen Pfaden muss der letzte
    /// Kontrollpunkt exakt dem ersten entsprechen.
    pub fn from_control_verts(
        control_verts: Vec<Vec3>,
        path_type: PathType,
    ) -> Result<Self, PathError> {
        let count = control_verts.len();
        let min = path_type.min_control_verts();
        if count < min || (count - 1) % 3 != 0 {
            return Err(PathError::InvalidControlVertCount {
                count,
                min,
                path_type: path_type.label(),
            });
        }

        if path_type == PathType::Closed {
            let (first, last) = (control_verts[0], control_verts[count - 1]);
            if first != last {
                return Err(PathError::UnclosedControlVerts { first, last });
            }
        }

        Ok(Self {
            path_type,
            num_curve_segments: (count - 1) / 3,
            control_verts,
        })
    }

    /// Ersetzt alle Kontrollpunkte. Bei Fehler bleibt der Pfad unverändert.
    pub fn set_control_verts(
        &mut self,
        control_verts: Vec<Vec3>,
        path_type: PathType,
    ) -> Result<(), PathError> {
        *self = Self::from_control_verts(control_verts, path_type)?;
        Ok(())
    }

    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    pub fn is_closed(&self) -> bool {
        self.path_type == PathType::Closed
    }

    /// Ein geschlossener Pfad hat bei gleicher Ankerzahl ein Segment mehr als ein offener.
    pub fn num_curve_segments(&self) -> usize {
        self.num_curve_segments
    }

    /// Obere Grenze des globalen Parameterbereichs.
    pub fn max_param(&self) -> f32 {
        self.num_curve_segments as f32
    }

    pub fn num_control_verts(&self) -> usize {
        self.control_verts.len()
    }

    /// Rohzugriff auf alle Kontrollpunkte.
    pub fn control_verts(&self) -> &[Vec3] {
        &self.control_verts
    }

    /// Alle interpolierten Punkte (jeder dritte Kontrollpunkt).
    ///
    /// Bei geschlossenen Pfaden ist der letzte Punkt das Duplikat von Anker 0.
    pub fn interpolated_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.control_verts.iter().step_by(3).copied()
    }

    /// Einzelnes Segment als eigenständige Kurve.
    pub fn segment(&self, index: usize) -> Option<CubicBezierCurve> {
        let start = index.checked_mul(3)?;
        let cvs = self.control_verts.get(start..start.checked_add(4)?)?;
        Some(CubicBezierCurve::new([cvs[0], cvs[1], cvs[2], cvs[3]]))
    }

    /// Bringt `t` in den gültigen Bereich: Clamping (offen) bzw. Wrap-Around (geschlossen).
    fn wrap_param(&self, t: f32) -> f32 {
        let max = self.max_param();
        match self.path_type {
            PathType::Open => t.clamp(0.0, max),
            PathType::Closed => {
                if (0.0..=max).contains(&t) {
                    t
                } else {
                    t.rem_euclid(max)
                }
            }
        }
    }

    /// Segment und lokaler Parameter zu einem globalen `t`.
    fn locate(&self, t: f32) -> (CubicBezierCurve, f32) {
        let t = self.wrap_param(t);
        // Truncation; t == max gehört noch zum letzten Segment
        let segment = (t as usize).min(self.num_curve_segments - 1);
        let start = segment * 3;
        let cvs = &self.control_verts[start..start + 4];
        let curve = CubicBezierCurve::new([cvs[0], cvs[1], cvs[2], cvs[3]]);
        (curve, t - segment as f32)
    }

    /// Position bei globalem `t ∈ [0, num_curve_segments]`.
    ///
    /// Nur geschlossene Pfade akzeptieren Werte außerhalb (sie laufen in der Schleife weiter).
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let (curve, local) = self.locate(t);
        curve.evaluate(local)
    }

    /// Position bei normiertem `u ∈ [0, 1]` über alle Segmente.
    pub fn evaluate_normalized(&self, u: f32) -> Vec3 {
        self.evaluate(u * self.max_param())
    }

    /// Nicht normierte Tangente bei globalem `t`.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let (curve, local) = self.locate(t);
        curve.tangent(local)
    }

    /// Nicht normierte Tangente bei normiertem `u`.
    pub fn tangent_normalized(&self, u: f32) -> Vec3 {
        self.tangent(u * self.max_param())
    }

    /// Näherungslänge über die Sehnen zwischen den interpolierten Punkten.
    ///
    /// Keine echte Bogenlänge; bei geschlossenen Pfaden inklusive Schließ-Sehne.
    pub fn approx_length(&self) -> f32 {
        let points: Vec<Vec3> = self.interpolated_points().collect();
        if points.len() < 2 {
            return 0.0;
        }
        points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Globale Parameter-Einheiten pro Welteinheit (`None` bei Länge 0).
    pub fn approx_param_per_unit_length(&self) -> Option<f32> {
        let length = self.approx_length();
        (length > 0.0).then(|| self.max_param() / length)
    }

    /// Normierte Parameter-Einheiten pro Welteinheit (`None` bei Länge 0).
    ///
    /// Für eine Toleranz von 15 cm: `approx_norm_param_per_unit_length() * 0.15`.
    pub fn approx_norm_param_per_unit_length(&self) -> Option<f32> {
        let length = self.approx_length();
        (length > 0.0).then(|| 1.0 / length)
    }

    /// Globaler Parameter des nächsten Pfadpunkts zu `pos`.
    ///
    /// Durchsucht jedes Segment per Bisektion; bei Gleichstand gewinnt das erste.
    pub fn closest_param(&self, pos: Vec3, param_threshold: f32) -> f32 {
        let mut min_dist_sq = f32::MAX;
        let mut closest = 0.0f32;

        for (segment, cvs) in self.control_verts.windows(4).step_by(3).enumerate() {
            let curve = CubicBezierCurve::new([cvs[0], cvs[1], cvs[2], cvs[3]]);
            let local = curve.closest_param(pos, param_threshold);
            let dist_sq = curve.evaluate(local).distance_squared(pos);
            if dist_sq < min_dist_sq {
                min_dist_sq = dist_sq;
                closest = segment as f32 + local;
            }
        }

        closest
    }

    /// Wie [`Self::closest_param`], aber Schwelle und Ergebnis im normierten Bereich.
    pub fn closest_norm_param(&self, pos: Vec3, param_threshold: f32) -> f32 {
        let max = self.max_param();
        self.closest_param(pos, param_threshold * max) / max
    }
}
