//! Launches the current file in an external terminal.

use std::io;
use std::path::Path;
use std::process::Command;

use log::info;

/// Spawns a terminal window running the file under the system Python,
/// detached from the editor process. The terminal stays open after the
/// script exits so its output remains readable. The editor does not wait
/// for or observe the child in any way.
#[cfg(target_os = "windows")]
pub fn spawn_detached_terminal(file: &Path) -> io::Result<()> {
    info!("running {}", file.display());
    Command::new("cmd")
        .args(["/C", "start", "cmd", "/K"])
        .arg(format!("python \"{}\"", file.display()))
        .spawn()?;
    Ok(())
}

/// Spawns a terminal window running the file under the system Python,
/// detached from the editor process. The terminal stays open after the
/// script exits so its output remains readable. The editor does not wait
/// for or observe the child in any way.
#[cfg(not(target_os = "windows"))]
pub fn spawn_detached_terminal(file: &Path) -> io::Result<()> {
    info!("running {}", file.display());
    Command::new("gnome-terminal")
        .arg("--")
        .arg("bash")
        .arg("-c")
        .arg(format!("python3 \"{}\"; exec bash", file.display()))
        .spawn()?;
    Ok(())
}
