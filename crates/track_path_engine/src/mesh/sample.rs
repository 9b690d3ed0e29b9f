//! Gleichmäßige Abtastung im normierten Parameterbereich.

use crate::path::CubicBezierPath;
use glam::Vec3;

/// Wertet den Pfad bei `i / sample_count` für `i in 0..sample_count` aus,
/// plus ein letzter Punkt exakt bei `u = 1.0`.
///
/// Ergibt `sample_count + 1` Punkte. Bei geschlossenen Pfaden fällt der
/// letzte Punkt mit dem ersten zusammen.
pub fn sample_path(path: &CubicBezierPath, sample_count: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(sample_count + 1);
    for i in 0..sample_count {
        let u = i as f32 / sample_count as f32;
        points.push(path.evaluate_normalized(u));
    }
    points.push(path.evaluate_normalized(1.0));
    points
}
