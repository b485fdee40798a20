use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional defaults read from `config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub sierpinski: DepthSettings,
    #[serde(default)]
    pub koch: DepthSettings,
    #[serde(default)]
    pub fern: FernSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub time: Option<f32>,   // Seconds per step
    pub wait: Option<f64>,   // Pause before restarting in infinite mode
    pub scheme: Option<u8>,  // Color scheme 0-9
}

#[derive(Debug, Default, Deserialize)]
pub struct DepthSettings {
    pub depth: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FernSettings {
    pub iterations: Option<usize>,
    pub max_points: Option<usize>,
    pub closed_partition: Option<bool>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termfractal")
            .join("config.toml")
    }
}
