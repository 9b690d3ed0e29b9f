//! Geteilte Konfiguration für `app` und das Binary.

pub mod options;

pub use options::{
    FollowerOptions, MeshOptions, PathOptions, RaceTrackOptions, StreamingOptions, TrackOptions,
};
