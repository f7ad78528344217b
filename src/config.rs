/// Runtime configuration: canvas size, frame pacing, RNG seed, logging and
/// the boss gating toggle.  Loaded from TOML; every field has a default so a
/// partial file is fine.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::entities::Canvas;

pub const MIN_CANVAS_SIDE: i32 = 64;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub canvas_width: i32,
    pub canvas_height: i32,
    /// Milliseconds per frame.
    pub frame_ms: u64,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    pub log_file: String,
    /// Boss only appears on levels divisible by this; always present when absent.
    pub boss_every: Option<u32>,
    pub mute: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 400,
            frame_ms: 33,
            seed: None,
            log_file: "caw_space.log".into(),
            boss_every: None,
            mute: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config TOML")
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width < MIN_CANVAS_SIDE || self.canvas_height < MIN_CANVAS_SIDE {
            bail!(
                "canvas must be at least {MIN_CANVAS_SIDE}x{MIN_CANVAS_SIDE}, got {}x{}",
                self.canvas_width,
                self.canvas_height
            );
        }
        if self.frame_ms == 0 {
            bail!("frame_ms must be greater than zero");
        }
        if self.boss_every == Some(0) {
            bail!("boss_every must be greater than zero when set");
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
    }
}
