//! Settings loaded from a TOML file. Every field has a default, so an empty file (or no
//! file at all) is a complete configuration.

use crate::colour::Colour;
use crate::generator::RetryPolicy;
use crate::layout::{AutoFit, FontSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub retry: RetryConfig,
    pub card: CardConfig,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl std::str::FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Where and how to reach the models. The API key is deliberately absent; it is only
/// ever read from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub recipe_model: String,
    pub image_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub image_size: String,
    pub image_quality: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            recipe_model: "gpt-4-turbo".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.6,
            max_tokens: 2048,
            image_size: "1024x1024".to_string(),
            image_quality: "standard".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            attempts: 3,
            delay_ms: 1000,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy {
            attempts: config.attempts,
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Canvas width in pixels, used when there is no background image
    pub width: u32,
    /// Canvas height in pixels, used when there is no background image
    pub height: u32,
    /// Margin kept clear of text on every side, in pixels
    pub border: u32,
    pub font: PathBuf,
    /// An image to print the recipe over; its size becomes the card size
    pub background: Option<PathBuf>,
    pub min_font: FontSize,
    pub max_font: FontSize,
    /// Text colour as 8-bit RGB
    pub fill: [u8; 3],
    /// Pixels per inch when placing the card on a PDF page
    pub dpi: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        CardConfig {
            width: 1700,
            height: 2200,
            border: 200,
            font: PathBuf::from("resources/Book Antiqua.ttf"),
            background: None,
            min_font: 1,
            max_font: 1000,
            fill: [0, 0, 0],
            dpi: 200.0,
        }
    }
}

impl CardConfig {
    pub fn autofit(&self) -> AutoFit {
        AutoFit::new(self.min_font, self.max_font).with_fill(Colour::from(self.fill))
    }
}
