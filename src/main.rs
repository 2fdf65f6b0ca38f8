#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use veteran_timeline::app::TimelineApp;
use veteran_timeline::logging;
use veteran_timeline::settings::{AppPaths, AppSettings};

fn main() -> eframe::Result<()> {
    let paths = AppPaths::discover();
    let settings = AppSettings::load(&paths.settings_file);
    if let Err(err) = logging::init_logging(&settings.log_level, &paths.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Veteran Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Veteran Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineApp::new(cc, settings, paths)))),
    )
}
