//! Track-Path-Tool Library.
//! Streckengenerierung, Endlos-Strecke und Konfiguration als Library exportiert
//! für Tests und Wiederverwendung. Die Geometrie liegt in `track_path_engine`.

pub mod app;
pub mod shared;

pub use app::{
    generate_track, write_mesh_json, FollowerPose, GeneratedTrack, PathFollower,
    RaceTrackGenerator, StreamingTrack,
};
pub use shared::{
    FollowerOptions, MeshOptions, PathOptions, RaceTrackOptions, StreamingOptions, TrackOptions,
};
pub use track_path_engine::{
    build_mesh, build_path, CubicBezierPath, ExtrudedMesh, MeshError, PathError, PathType, SubMesh,
};
