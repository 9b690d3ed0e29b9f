//! Fehlertypen der Engine.

use thiserror::Error;

/// Strukturelle Fehler beim Aufbau eines Pfads.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// Weniger als 2 Anker übergeben
    #[error("Pfad benötigt mindestens 2 Anker, erhalten: {0}")]
    TooFewAnchors(usize),
    /// Anzahl der Kontrollpunkte verletzt `3n+1` bzw. das Minimum des Pfad-Typs
    #[error("Ungültige Kontrollpunkt-Anzahl {count} für {path_type} (Minimum {min}, Form 3n+1)")]
    InvalidControlVertCount {
        count: usize,
        min: usize,
        path_type: &'static str,
    },
    /// Geschlossener Pfad, dessen letzter Kontrollpunkt nicht exakt dem ersten entspricht
    #[error("Geschlossener Pfad nicht geschlossen: erster Kontrollpunkt {first}, letzter {last}")]
    UnclosedControlVerts { first: glam::Vec3, last: glam::Vec3 },
    /// Anker-Index außerhalb des Arrays
    #[error("Anker-Index {index} außerhalb des Bereichs (Länge {len})")]
    AnchorIndexOutOfRange { index: usize, len: usize },
}

/// Fehler bei der Mesh-Erzeugung.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// `sample_count == 0` ergibt weniger als 2 Abtastpunkte
    #[error("Extrusion benötigt mindestens 2 Abtastpunkte (sample_count = {0})")]
    TooFewSamples(usize),
    /// Breite oder Tiefe negativ bzw. nicht endlich
    #[error("Ungültige Straßenmaße: Breite {width}, Tiefe {depth}")]
    InvalidDimensions { width: f32, depth: f32 },
}
