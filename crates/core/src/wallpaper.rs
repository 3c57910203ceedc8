use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Collaborator seam for the OS wallpaper mechanism, so the pipeline can run
/// against a stub in tests.
pub trait WallpaperSetter {
    /// Apply a local image file as the desktop background.
    fn apply(&self, image_path: &Path) -> Result<()>;
}

/// Sets the wallpaper through the platform's own tooling.
pub struct DesktopWallpaper;

impl WallpaperSetter for DesktopWallpaper {
    fn apply(&self, image_path: &Path) -> Result<()> {
        set_platform(image_path)
    }
}

fn run(mut command: Command) -> Result<()> {
    let status = command
        .status()
        .map_err(|e| Error::Wallpaper(e.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Wallpaper(format!("command exited with {status}")))
    }
}

/// `file://` URI for a local path, as expected by gsettings.
fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(target_os = "linux")]
fn set_platform(image_path: &Path) -> Result<()> {
    let uri = file_uri(image_path);
    for key in ["picture-uri", "picture-uri-dark"] {
        let mut cmd = Command::new("gsettings");
        cmd.args(["set", "org.gnome.desktop.background", key, &uri]);
        run(cmd)?;
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn set_platform(image_path: &Path) -> Result<()> {
    let script = format!(
        "tell application \"System Events\" to set picture of every desktop to \"{}\"",
        image_path.display()
    );
    let mut cmd = Command::new("osascript");
    cmd.args(["-e", &script]);
    run(cmd)
}

#[cfg(target_os = "windows")]
fn set_platform(image_path: &Path) -> Result<()> {
    // SPI_SETDESKWALLPAPER = 20, SPIF_UPDATEINIFILE | SPIF_SENDCHANGE = 3
    let script = format!(
        "Add-Type -TypeDefinition 'using System.Runtime.InteropServices; \
         public class Wallpaper {{ [DllImport(\"user32.dll\")] public static extern int \
         SystemParametersInfo(int uAction, int uParam, string lpvParam, int fuWinIni); }}'; \
         [Wallpaper]::SystemParametersInfo(20, 0, '{}', 3)",
        image_path.display()
    );
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-Command", &script]);
    run(cmd)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn set_platform(_image_path: &Path) -> Result<()> {
    Err(Error::Wallpaper("unsupported platform".to_string()))
}
