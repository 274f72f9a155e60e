//! Native file and message dialogs.

use std::path::PathBuf;

/// Modal file picker for opening a Python source file.
pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Python Files", &["py"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Modal save-as picker, defaulting to a `.py` name.
pub fn save_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Python Files", &["py"])
        .set_file_name("untitled.py")
        .save_file()
}

/// Blocking error popup.
pub fn error_dialog(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .show();
}
