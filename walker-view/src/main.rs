//! Application entry point for the lattice walker viewer.
//!
//! This binary sets up logging and eframe/egui and delegates the frame
//! clock and all drawing to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;
use walker_core::config::Config;

/// Starts the native eframe application.
///
/// Logging goes through `tracing`, filtered by `RUST_LOG` (default `info`).
/// A configuration error while building the walker pool aborts startup.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop, or
///   the walker configuration is rejected.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Lattice Walkers",
        options,
        Box::new(|_cc| {
            let viewer = Viewer::new(Config::default()).inspect_err(|e| {
                tracing::error!("invalid walker configuration: {e}");
            })?;
            Ok(Box::new(viewer))
        }),
    )
}
