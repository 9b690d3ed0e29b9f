//! Track-Path-Tool.
//!
//! Aufruf: `track-path-tool [CONFIG.toml] [MESH_OUT.json]`.
//! Ohne Konfigurationspfad wird `track_path_tool.toml` neben der Binary gelesen.

use std::path::PathBuf;
use track_path_tool::{generate_track, write_mesh_json, TrackOptions};

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Track-Path-Tool v{} startet...", env!("CARGO_PKG_VERSION"));

        let mut args = std::env::args_os().skip(1);
        let config_path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(TrackOptions::config_path);
        let mesh_out = args.next().map(PathBuf::from);

        let options = TrackOptions::load_from_file(&config_path);
        options.validate()?;

        let track = generate_track(&options)?;
        log::info!("{}", track.summary());
        log::info!(
            "Nächster Pfadparameter zum Ursprung: {:.4}",
            track.closest_norm_param(glam::Vec3::ZERO, &options)
        );

        if let Some(out) = mesh_out {
            write_mesh_json(&track.mesh, &out)?;
        }

        Ok(())
    }
}
