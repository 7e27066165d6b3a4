use serde::{Deserialize, Serialize};

/// User preferences, restored from eframe storage on startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorSettings {
    /// Quality used when saving `.jpg`/`.jpeg` files (1-100)
    pub jpeg_quality: u8,
    /// How far the Tint filter pulls pixels towards the tint colour
    pub tint_strength: f32,
    /// Pre-filled value of the Tint dialog
    pub tint_color: String,
    /// Where a freshly opened image is placed on the canvas
    pub canvas_origin: [f32; 2],
    /// Upper bound for the sizes pre-filled in the Resize dialog
    pub resize_prefill_cap: u32,
    /// Directory of the last opened or saved file
    pub last_directory: Option<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            tint_strength: 0.35,
            tint_color: "red".to_owned(),
            canvas_origin: [100.0, 100.0],
            resize_prefill_cap: 400,
            last_directory: None,
        }
    }
}

impl EditorSettings {
    /// Remembers the parent directory of `path` for the next file dialog
    pub fn remember_directory(&mut self, path: &std::path::Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_directory = Some(parent.display().to_string());
        }
    }

    /// Initial text for a path entry dialog
    pub fn suggested_path(&self, file_name: &str) -> String {
        match &self.last_directory {
            Some(dir) => std::path::Path::new(dir).join(file_name).display().to_string(),
            None => file_name.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert_eq!(settings.jpeg_quality, 90);
        assert_eq!(settings.resize_prefill_cap, 400);
        assert_eq!(settings.suggested_path("out.png"), "out.png");
    }

    #[test]
    fn test_remember_directory() {
        let mut settings = EditorSettings::default();
        settings.remember_directory(Path::new("photo.png"));
        assert_eq!(settings.last_directory, None);

        settings.remember_directory(Path::new("pictures/holiday/photo.png"));
        assert_eq!(settings.last_directory.as_deref(), Some(Path::new("pictures/holiday").display().to_string().as_str()));
        assert_eq!(
            settings.suggested_path("out.png"),
            Path::new("pictures/holiday").join("out.png").display().to_string()
        );
    }
}
