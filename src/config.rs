use crate::Args;
use anyhow::{Context, Result};
use boxdude::constants::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) seed: u64,
    pub(crate) enable_color: bool,
    pub(crate) world_width: f32,
    pub(crate) world_height: f32,
    pub(crate) show_instructions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 60,
            seed: 0xC0FFEE_u64,
            enable_color: true,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            show_instructions: true,
        }
    }
}

impl Settings {
    /// Command-line flags win over the settings file.
    pub(crate) fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(fps) = args.fps {
            self.fps_cap = fps;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(w) = args.width {
            self.world_width = w;
        }
        if let Some(h) = args.height {
            self.world_height = h;
        }
        if args.no_color {
            self.enable_color = false;
        }
        if args.no_instructions {
            self.show_instructions = false;
        }
        self.fps_cap = self.fps_cap.clamp(10, 240);
        self
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "boxdude", "Boxdude")
        .context("could not resolve project directories")?;
    let config_dir = proj.config_dir().to_path_buf();
    let data_dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&data_dir).ok();
    Ok(Paths {
        settings_path: config_dir.join("settings.json"),
        log_path: data_dir.join("boxdude.log"),
    })
}

/// Missing file means defaults. A malformed one is logged and ignored.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring malformed settings file");
            Settings::default()
        }
    }
}
