use std::{
    env,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tilepal_tileset::TilesetLayout;
use tilepal_widgets::source_palette::PaletteColors;

pub const CONFIG_PATH_VAR: &str = "TILEPAL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "tilepal.json";

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub window:         WindowConfig,
    pub tilesets:       Vec<TilesetConfig>,
    pub view:           ViewConfig,
    /// Seeds the persisted palette colors when present.
    pub palette_colors: Option<PaletteColors>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title:  String,
    pub width:  f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TilesetConfig {
    pub name:   String,
    /// Drives the generated atlas colors.
    #[serde(default)]
    pub seed:   u32,
    #[serde(default)]
    pub layout: TilesetLayout,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    pub zoom: f32,
}

// -------------------------------------------------------------------------------------------------

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: String::from("Tilepal"), width: 1024., height: 720. }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { zoom: 2. }
    }
}

impl AppConfig {
    fn with_default_tilesets(mut self) -> Self {
        if self.tilesets.is_empty() {
            self.tilesets = vec![
                TilesetConfig { name: String::from("Overworld"), seed: 0, layout: TilesetLayout::default() },
                TilesetConfig {
                    name:   String::from("Dungeon"),
                    seed:   7,
                    layout: TilesetLayout { columns: 12, rows: 9, tile_total: Some(100), ..Default::default() },
                },
            ];
        }
        self
    }

    /// Reads the file named by `TILEPAL_CONFIG`, or `tilepal.json` if it exists.
    ///
    /// A broken `tilepal.json` only produces a warning, while a broken explicitly requested file is an error.
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = env::var_os(CONFIG_PATH_VAR) {
            log::info!("Loading config from path defined in {CONFIG_PATH_VAR}");
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            match Self::from_file(default_path) {
                Ok(config) => return Ok(config),
                Err(err) => log::warn!("Ignoring {DEFAULT_CONFIG_PATH}, falling back to defaults: {err:#}"),
            }
        } else {
            log::info!("No config file found, using defaults");
        }
        Ok(Self::default().with_default_tilesets())
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config = serde_json::from_str::<Self>(json)?.with_default_tilesets();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.view.zoom > 0.) {
            bail!("Zoom must be positive, got {}", self.view.zoom);
        }
        for tileset in self.tilesets.iter() {
            tileset.layout.validate().with_context(|| format!("Tileset '{}' has an invalid layout", tileset.name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use egui::Color32;

    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let config = AppConfig::from_json(r#"{ "window": { "title": "Test" } }"#).unwrap();
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, WindowConfig::default().width);
        assert_eq!(config.view, ViewConfig::default());
        assert_eq!(config.tilesets.len(), 2);
        assert_eq!(config.palette_colors, None);
    }

    #[test]
    fn tilesets_are_read() {
        let json = r#"{
            "tilesets": [
                { "name": "Caves", "seed": 3, "layout": { "columns": 5, "rows": 2, "tile_total": 9 } }
            ]
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        let [caves] = config.tilesets.as_slice() else {
            panic!("expected exactly one tileset, got {:?}", config.tilesets);
        };
        assert_eq!(caves.name, "Caves");
        assert_eq!((caves.layout.columns, caves.layout.rows, caves.layout.tile_total), (5, 2, Some(9)));
        assert_eq!(caves.layout.tile_size, TilesetLayout::default().tile_size);
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let json = r#"{ "tilesets": [ { "name": "Broken", "layout": { "columns": 0 } } ] }"#;
        let err = AppConfig::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("Broken"), "unexpected error: {err:#}");
    }

    #[test]
    fn non_positive_zoom_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "view": { "zoom": 0.0 } }"#).is_err());
    }

    #[test]
    fn palette_colors_round_trip_through_json() {
        let colors = PaletteColors { highlight: Color32::YELLOW, highlight_border: Color32::DARK_BLUE };
        let config = AppConfig { palette_colors: Some(colors), ..Default::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap().palette_colors, Some(colors));
    }
}
