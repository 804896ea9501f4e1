use crate::field::Component;
use crate::potential::Seed;
use crate::reader::{snapshot_path, DomainBounds};
use crate::visualisation::COLORMAPS;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Which dump to read, and how much of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>, // Explicit path, wins over directory + index
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default)]
    pub bounds: DomainBounds,
}

fn default_directory() -> PathBuf {
    PathBuf::from("data")
}

impl InputConfig {
    fn validate(&self) -> Result<()> {
        if self.file.is_none() && self.index.is_none() {
            return Err(anyhow!(
                "[input] needs either 'file' or 'index' (read from '{}')",
                self.directory.display()
            ));
        }
        let b = &self.bounds;
        for (axis, lo, hi) in [("x", b.ix1, b.ix2), ("y", b.jx1, b.jx2)] {
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if lo > hi {
                    return Err(anyhow!(
                        "Bounds along {} are empty ({} > {})",
                        axis,
                        lo,
                        hi
                    ));
                }
            }
        }
        Ok(())
    }

    /// Resolved path of the dump to read
    pub fn path(&self) -> PathBuf {
        match (&self.file, self.index) {
            (Some(file), _) => file.clone(),
            (None, Some(index)) => snapshot_path(&self.directory, index),
            (None, None) => self.directory.clone(),
        }
    }
}

/// Mirroring across the current sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        MirrorConfig { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Flux function integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotentialConfig {
    #[serde(default)]
    pub seed: Seed,
}

/// Plot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationConfig {
    #[serde(default = "default_field")]
    pub field: Component,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_colormap")]
    pub colormap: String,
    #[serde(default = "default_contour_levels")]
    pub contour_levels: usize,
    #[serde(default = "default_image_width")]
    pub image_width: u32,
    #[serde(default = "default_image_height")]
    pub image_height: u32,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_field() -> Component {
    Component::Vx
}

fn default_title() -> String {
    "Outflow speed".to_string()
}

fn default_colormap() -> String {
    "turbo".to_string()
}

fn default_contour_levels() -> usize {
    10
}

fn default_image_width() -> u32 {
    800
}

fn default_image_height() -> u32 {
    400
}

fn default_output() -> PathBuf {
    PathBuf::from("output.png")
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        VisualizationConfig {
            field: default_field(),
            title: default_title(),
            colormap: default_colormap(),
            contour_levels: default_contour_levels(),
            image_width: default_image_width(),
            image_height: default_image_height(),
            output: default_output(),
        }
    }
}

impl VisualizationConfig {
    fn validate(&self) -> Result<()> {
        if !COLORMAPS.contains(&self.colormap.as_str()) {
            return Err(anyhow!(
                "Invalid colormap '{}'. Must be one of: {:?}",
                self.colormap,
                COLORMAPS
            ));
        }
        // Leave room for the colorbar
        if self.image_width < 200 || self.image_height < 100 {
            return Err(anyhow!(
                "Image must be at least 200x100 (width={}, height={})",
                self.image_width,
                self.image_height
            ));
        }
        Ok(())
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub mirror: MirrorConfig,
    #[serde(default)]
    pub potential: PotentialConfig,
    #[serde(default)]
    pub visualization: VisualizationConfig,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.visualization.validate()?;
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("=== Reconnection Plot Configuration ===");
        println!("Input: {}", self.input.path().display());
        let b = &self.input.bounds;
        if *b != DomainBounds::full() {
            println!(
                "  Bounds: x [{:?}, {:?}], y [{:?}, {:?}]",
                b.ix1, b.ix2, b.jx1, b.jx2
            );
        }
        println!(
            "Mirror: {}",
            if self.mirror.enabled { "on" } else { "off" }
        );
        match self.potential.seed {
            Seed::Value(v) => println!("Az seed: {}", v),
            Seed::CornerField => println!("Az seed: 0.5*(bx - by) at (0, jx-1)"),
        }
        println!(
            "Plot: {} with {} Az contours, {}x{} -> {}",
            self.visualization.field,
            self.visualization.contour_levels,
            self.visualization.image_width,
            self.visualization.image_height,
            self.visualization.output.display()
        );
        println!("=======================================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml("[input]\nindex = 10\n").unwrap();
        assert_eq!(config.input.path(), PathBuf::from("data/field-00010.dat"));
        assert!(config.mirror.enabled);
        assert_eq!(config.potential.seed, Seed::Value(0.0));
        assert_eq!(config.visualization.field, Component::Vx);
        assert_eq!(config.visualization.colormap, "turbo");
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [input]
            file = "run/field-00008.dat"
            bounds = { ix1 = 0, ix2 = 1301, jx1 = 0, jx2 = 151 }

            [mirror]
            enabled = false

            [potential]
            seed = "corner_field"

            [visualization]
            field = "bz"
            colormap = "rd_bu"
            contour_levels = 16
            output = "plots/bz.png"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.input.path(), PathBuf::from("run/field-00008.dat"));
        assert_eq!(config.input.bounds, DomainBounds::new(0, 1301, 0, 151));
        assert!(!config.mirror.enabled);
        assert_eq!(config.potential.seed, Seed::CornerField);
        assert_eq!(config.visualization.field, Component::Bz);
        assert_eq!(config.visualization.contour_levels, 16);
    }

    #[test]
    fn test_seed_value() {
        let config = Config::from_toml("[input]\nindex = 1\n[potential]\nseed = { value = -0.5 }\n")
            .unwrap();
        assert_eq!(config.potential.seed, Seed::Value(-0.5));
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Config::from_toml("[input]\ndirectory = \"data\"\n").is_err());
    }

    #[test]
    fn test_bad_colormap_rejected() {
        let toml = "[input]\nindex = 1\n[visualization]\ncolormap = \"jet\"\n";
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_bad_component_rejected() {
        let toml = "[input]\nindex = 1\n[visualization]\nfield = \"jz\"\n";
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_empty_bounds_rejected() {
        let toml = "[input]\nindex = 1\nbounds = { ix1 = 5, ix2 = 2 }\n";
        assert!(Config::from_toml(toml).is_err());
    }
}
