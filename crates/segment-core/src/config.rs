use segment_detection::color::ColorRange;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub system: SystemConfig,
    pub presets: Vec<ColorRange>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SystemConfig {
    pub log_level: String,
}

impl Config {
    // Load config from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        for preset in &config.presets {
            preset.validate()?;
        }
        Ok(config)
    }

    // Load default config
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_file("config/default.toml")
    }

    // Look a preset up by name.
    pub fn preset(&self, name: &str) -> Option<&ColorRange> {
        self.presets.iter().find(|p| p.name == name)
    }
}

impl Default for Config {
    // In-memory defaults when no file exists. Red covers the 0-10 hue
    // band only; its wraparound near 170-179 is a known limitation.
    // Saturation and value cap at 255, the true byte maximum.
    fn default() -> Self {
        Config {
            system: SystemConfig {
                log_level: "info".to_string(),
            },
            presets: vec![
                ColorRange::new("Red", [0, 100, 80], [10, 255, 255]),
                ColorRange::new("Green", [35, 100, 80], [85, 255, 255]),
                ColorRange::new("Blue", [100, 100, 80], [145, 255, 255]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_three_reference_presets() {
        let config = Config::default();
        assert_eq!(config.presets.len(), 3);

        let red = config.preset("Red").unwrap();
        assert_eq!(red.lower, [0, 100, 80]);
        assert_eq!(red.upper, [10, 255, 255]);

        let green = config.preset("Green").unwrap();
        assert_eq!(green.lower, [35, 100, 80]);
        assert_eq!(green.upper, [85, 255, 255]);

        let blue = config.preset("Blue").unwrap();
        assert_eq!(blue.lower, [100, 100, 80]);
        assert_eq!(blue.upper, [145, 255, 255]);

        for preset in &config.presets {
            assert!(preset.validate().is_ok());
        }
    }

    #[test]
    fn unknown_preset_name_returns_none() {
        assert!(Config::default().preset("Chartreuse").is_none());
    }

    #[test]
    fn parses_presets_from_toml() {
        let toml_str = r#"
            [system]
            log_level = "debug"

            [[presets]]
            name = "Yellow"
            lower = [20, 100, 100]
            upper = [30, 255, 255]
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.system.log_level, "debug");
        assert_eq!(
            config.preset("Yellow"),
            Some(&ColorRange::new("Yellow", [20, 100, 100], [30, 255, 255]))
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.presets, config.presets);
    }
}
