//! Where TasteNote stores its own data (share config).
//!
//! Notes themselves live wherever the user keeps their export files.

use std::path::PathBuf;

/// Returns the directory where TasteNote stores its config.
/// On macOS: `~/Library/Application Support/TasteNote/`.
/// Creates the directory if it doesn't exist; returns `None` if we can't determine the path.
pub fn app_data_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("app", "TasteNote", "TasteNote")?
        .data_local_dir()
        .to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
