//! Anker-Array-Hilfen für das Streaming-Muster (vorne anhängen, hinten entfernen).
//!
//! Die Funktionen verändern keinen Pfad; der Aufrufer baut danach per
//! [`super::CubicBezierPath::interpolate`] neu auf.

use crate::error::PathError;
use glam::Vec3;

/// Hängt einen Anker an und gibt das neue Array zurück.
pub fn add_point(anchors: &[Vec3], anchor: Vec3) -> Vec<Vec3> {
    let mut result = Vec::with_capacity(anchors.len() + 1);
    result.extend_from_slice(anchors);
    result.push(anchor);
    result
}

/// Entfernt den Anker an `index`; nachfolgende Anker rücken auf.
pub fn remove_point(anchors: &[Vec3], index: usize) -> Result<Vec<Vec3>, PathError> {
    if index >= anchors.len() {
        return Err(PathError::AnchorIndexOutOfRange {
            index,
            len: anchors.len(),
        });
    }
    let mut result = anchors.to_vec();
    result.remove(index);
    Ok(result)
}
