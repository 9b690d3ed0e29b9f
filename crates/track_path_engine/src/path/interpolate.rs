//! Ableitung der Tangenten-Kontrollpunkte aus den Ankern (Catmull-Rom-ähnliche Heuristik).

use glam::Vec3;

/// Abstand der End-Handles offener Pfade als Anteil des ersten/letzten Segments.
const END_HANDLE_FRACTION: f32 = 0.25;

/// Divisor für die Handle-Länge an inneren Ankern: `(|a| + |b|) / 8`.
const INNER_HANDLE_DIVISOR: f32 = 8.0;

/// Berechnet den Handle-Versatz an einem Anker aus den Vektoren zum Vorgänger (`a`)
/// und Nachfolger (`b`).
///
/// Gibt `None` zurück wenn eine der beiden Kanten Länge 0 hat; beide Handles
/// fallen dann auf den Anker.
fn handle_offset(a: Vec3, b: Vec3) -> Option<Vec3> {
    let a_len = a.length();
    let b_len = b.length();
    if a_len <= 0.0 || b_len <= 0.0 {
        return None;
    }
    let ab_len = (a_len + b_len) / INNER_HANDLE_DIVISOR;
    // Entgegengesetzte Kanten heben sich auf → Null-Versatz statt NaN
    let dir = (b / b_len - a / a_len).normalize_or_zero();
    Some(dir * ab_len)
}

/// Kontrollpunkte eines offenen Pfads: `3n - 2` Einträge.
pub(super) fn open_control_verts(anchors: &[Vec3]) -> Vec<Vec3> {
    let num_anchors = anchors.len();
    debug_assert!(num_anchors >= 2);
    let num_segments = num_anchors - 1;
    let num_cvs = 3 * num_anchors - 2;
    let mut cvs = vec![Vec3::ZERO; num_cvs];

    for (n, anchor) in anchors.iter().enumerate() {
        cvs[n * 3] = *anchor;
    }

    // Erste und letzte Handles: 1/4 entlang des ersten bzw. letzten Segments
    cvs[1] = anchors[0] + (anchors[1] - anchors[0]) * END_HANDLE_FRACTION;
    cvs[num_cvs - 2] = anchors[num_anchors - 1]
        + (anchors[num_anchors - 2] - anchors[num_anchors - 1]) * END_HANDLE_FRACTION;

    for k in 1..num_segments {
        let anchor = anchors[k];
        let a = anchors[k - 1] - anchor;
        let b = anchors[k + 1] - anchor;
        match handle_offset(a, b) {
            Some(offset) => {
                cvs[k * 3 - 1] = anchor - offset;
                cvs[k * 3 + 1] = anchor + offset;
            }
            None => {
                cvs[k * 3 - 1] = anchor;
                cvs[k * 3 + 1] = anchor;
            }
        }
    }

    cvs
}

/// Kontrollpunkte eines geschlossenen Pfads: `3n + 1` Einträge.
///
/// Anker 0 wird in den letzten Slot dupliziert, damit jedes Segment
/// zusammenhängend ohne Wrap-Around gelesen werden kann.
pub(super) fn closed_control_verts(anchors: &[Vec3]) -> Vec<Vec3> {
    let num_anchors = anchors.len();
    debug_assert!(num_anchors >= 2);
    let num_segments = num_anchors;
    let num_cvs = 3 * num_anchors + 1;
    let mut cvs = vec![Vec3::ZERO; num_cvs];

    for (n, anchor) in anchors.iter().enumerate() {
        cvs[n * 3] = *anchor;
    }
    cvs[num_cvs - 1] = anchors[0];

    // k == num_segments berechnet die beiden Handles um Anker 0
    for k in 1..=num_segments {
        let prev = k - 1;
        let next = (k + 1) % num_segments;
        let current = k % num_segments;

        let anchor = anchors[current];
        let a = anchors[prev] - anchor;
        let b = anchors[next] - anchor;

        let before = 3 * k - 1;
        let after = (3 * k + 1) % (num_cvs - 1);
        match handle_offset(a, b) {
            Some(offset) => {
                cvs[before] = anchor - offset;
                cvs[after] = anchor + offset;
            }
            None => {
                cvs[before] = anchor;
                cvs[after] = anchor;
            }
        }
    }

    cvs
}
