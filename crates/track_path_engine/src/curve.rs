//! Einzelne kubische Bézier-Kurve mit genau 4 Kontrollpunkten.

use glam::Vec3;

/// Obergrenze der Bisektions-Schritte in [`CubicBezierCurve::closest_param`].
///
/// 64 Halbierungen unterschreiten jede f32-Auflösung im Intervall [0, 1].
pub const MAX_BISECTION_STEPS: usize = 64;

/// Standard-Parameter-Toleranz für die Nächster-Punkt-Suche.
pub const DEFAULT_PARAM_THRESHOLD: f32 = 0.000_001;

/// Kubische Bézier-Kurve (P0..P3).
///
/// Zustandslos: alle Abfragen sind reine Funktionen der Kontrollpunkte und `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve {
    control_verts: [Vec3; 4],
}

impl CubicBezierCurve {
    /// Erstellt eine Kurve aus genau 4 Kontrollpunkten.
    pub fn new(control_verts: [Vec3; 4]) -> Self {
        Self { control_verts }
    }

    /// Ersetzt alle 4 Kontrollpunkte auf einmal.
    pub fn set_control_verts(&mut self, control_verts: [Vec3; 4]) {
        self.control_verts = control_verts;
    }

    /// Liefert die Kontrollpunkte.
    pub fn control_verts(&self) -> &[Vec3; 4] {
        &self.control_verts
    }

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let c = 1.0 - t;
        // Bernstein-Polynome
        let bb0 = c * c * c;
        let bb1 = 3.0 * t * c * c;
        let bb2 = 3.0 * t * t * c;
        let bb3 = t * t * t;

        let [p0, p1, p2, p3] = self.control_verts;
        p0 * bb0 + p1 * bb1 + p2 * bb2 + p3 * bb3
    }

    /// Tangente per de Casteljau (zwei Lerp-Durchgänge, `R1 - R0`).
    ///
    /// Nicht normiert: eine längere Tangente zieht die Kurve stärker in diese Richtung.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.control_verts;

        let q0 = p0.lerp(p1, t);
        let q1 = p1.lerp(p2, t);
        let q2 = p2.lerp(p3, t);

        let r0 = q0.lerp(q1, t);
        let r1 = q1.lerp(q2, t);
        r1 - r0
    }

    /// Analytische erste Ableitung B'(t).
    ///
    /// Entspricht `3 * tangent(t)`.
    pub fn derivative(&self, t: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.control_verts;
        let quadratic = -3.0 * (p0 - 3.0 * (p1 - p2) - p3);
        let linear = 6.0 * (p0 - 2.0 * p1 + p2);
        let constant = -3.0 * (p0 - p1);
        t * t * quadratic + t * linear + constant
    }

    /// Parameter des (lokal) nächsten Kurvenpunkts zu `target`.
    ///
    /// Gierige Bisektion über [0, 1]: pro Schritt werden die beiden inneren
    /// Viertelpunkte verglichen und die Hälfte mit dem näheren behalten.
    /// Findet bei nicht-unimodalem Abstandsverlauf nur ein lokales Minimum.
    pub fn closest_param(&self, target: Vec3, param_threshold: f32) -> f32 {
        let mut begin = 0.0f32;
        let mut end = 1.0f32;

        for _ in 0..MAX_BISECTION_STEPS {
            // NaN-Schwelle: Vergleich ist false → Schleife läuft bis zum Limit
            if end - begin < param_threshold {
                break;
            }
            let mid = (begin + end) * 0.5;
            let param_a = (begin + mid) * 0.5;
            let param_b = (mid + end) * 0.5;

            let dist_a_sq = self.evaluate(param_a).distance_squared(target);
            let dist_b_sq = self.evaluate(param_b).distance_squared(target);

            if dist_a_sq < dist_b_sq {
                end = mid;
            } else {
                begin = mid;
            }
        }

        (begin + end) * 0.5
    }
}
