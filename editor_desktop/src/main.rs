//! PyPad - a small Python code editor.
//!
//! Usage: pypad [FILE]

use std::env;
use std::path::PathBuf;

use pypad_ui::EditorApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting PyPad");

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let file_path = args.get(1).map(PathBuf::from);

    // Create the application
    let mut app = EditorApp::new();

    // Open file if provided
    if let Some(path) = file_path {
        log::info!("Opening file: {}", path.display());
        app.open_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([950.0, 650.0]),
        ..Default::default()
    };

    eframe::run_native("PyPad", options, Box::new(|_cc| Ok(Box::new(app))))
}
