// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! AREAMAP - image map region editor
//!
//! A cross-platform desktop application for drawing clickable regions
//! (rectangles, circles and polygons) over an image and exporting them as
//! HTML `<map>`/`<area>` markup.

mod app;
mod config;
mod editor;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::AreaMapApp;
use config::EditorConfig;

fn main() -> Result<()> {
    // Config first so it can set the default log level
    let (config, config_error) = match EditorConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (EditorConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Using default configuration: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0])
            .with_title("AREAMAP - Image Map Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "AREAMAP",
        options,
        Box::new(|_cc| Ok(Box::new(AreaMapApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
