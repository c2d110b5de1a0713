//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// dwall Configuration File
// ========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // Wallpaper store directory, holding heic/ (containers) and jpg/
  // (extracted frames). The DWALL_PATH environment variable takes
  // precedence over this setting.
  // "path": "~/.local/share/dwall",

  // JPEG quality (1-100) for extracted frames.
  // "jpegQuality": 90,

  // Wallpaper setter backend settings.
  // "setter": {
  //   // Scaling mode: "fill", "fit", "center", "stretch" or "tile"
  //   "mode": "fill",
  //
  //   // Output selector passed to swaybg ("*" targets every output)
  //   "output": "*"
  // }
}
"#
    .to_string()
}

/// Writes the configuration template to the given path.
///
/// Creates the parent directory when missing.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn create_config_file(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
