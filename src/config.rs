//! Runtime configuration
//!
//! Settings come from an optional RON file and are then overridden by
//! command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "mode13.ron";

pub const USAGE: &str = "\
Usage: mode13 [OPTIONS] [SCENE]

Arguments:
  [SCENE]  Scene file (.ron) to render; the built-in demo otherwise

Options:
  --config <FILE>  Configuration file [default: mode13.ron]
  --png <FILE>     Render one frame to FILE and exit, no window
  --scale <N>      Window scale factor
  -h, --help       Print this help message";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window size as a multiple of 320x200
    pub window_scale: u32,
    /// Scene to load; the built-in demo when unset
    pub scene: Option<PathBuf>,
    /// env_logger filter; RUST_LOG or "info" when unset
    pub log_filter: Option<String>,
    /// Run the scene's highlight sequence
    pub blink: bool,
    pub blink_period_secs: f32,
    /// Where screenshots go
    pub screenshot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_scale: 3,
            scene: None,
            log_filter: None,
            blink: true,
            blink_period_secs: 1.0,
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

impl Config {
    /// Read a config file. A missing file means defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, options: &Options) {
        if let Some(scene) = &options.scene {
            self.scene = Some(scene.clone());
        }
        if let Some(scale) = options.scale {
            self.window_scale = scale;
        }
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub scene: Option<PathBuf>,
    pub config: PathBuf,
    pub png: Option<PathBuf>,
    pub scale: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scene: None,
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            png: None,
            scale: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Run(Options),
    Help,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Action, ConfigError> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "--config" => options.config = PathBuf::from(value_for(&mut args, "--config")?),
            "--png" => options.png = Some(PathBuf::from(value_for(&mut args, "--png")?)),
            "--scale" => {
                let raw = value_for(&mut args, "--scale")?;
                let scale = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| ConfigError::Usage(format!("--scale expects a positive integer, got '{raw}'")))?;
                options.scale = Some(scale);
            }
            flag if flag.starts_with('-') => {
                return Err(ConfigError::Usage(format!("unknown option '{flag}'")));
            }
            path => {
                if options.scene.is_some() {
                    return Err(ConfigError::Usage(format!("unexpected argument '{path}'")));
                }
                options.scene = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Action::Run(options))
}

fn value_for<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::Usage(format!("{flag} needs a value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_when_missing() {
        let config = Config::load("/nonexistent/mode13.ron").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bundled_config() {
        let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/mode13.ron")).unwrap();
        assert_eq!(config.log_filter.as_deref(), Some("info"));
        assert_eq!(config.screenshot_dir, PathBuf::from("screenshots"));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = ron::from_str("(window_scale: 4, blink: false)").unwrap();
        assert_eq!(config.window_scale, 4);
        assert!(!config.blink);
        assert_eq!(config.blink_period_secs, 1.0);
    }

    #[test]
    fn test_parse_args() {
        let Action::Run(opts) = parse_args(args(&["scene.ron", "--png", "out.png", "--scale", "2"])).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(opts.scene, Some(PathBuf::from("scene.ron")));
        assert_eq!(opts.png, Some(PathBuf::from("out.png")));
        assert_eq!(opts.scale, Some(2));
        assert_eq!(opts.config, PathBuf::from(DEFAULT_CONFIG_PATH));

        assert_eq!(parse_args(args(&["--help"])).unwrap(), Action::Help);
        assert!(parse_args(args(&["--scale", "0"])).is_err());
        assert!(parse_args(args(&["--png"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
        assert!(parse_args(args(&["a.ron", "b.ron"])).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        let options = Options {
            scene: Some(PathBuf::from("x.ron")),
            scale: Some(5),
            ..Options::default()
        };
        config.apply(&options);
        assert_eq!(config.scene, Some(PathBuf::from("x.ron")));
        assert_eq!(config.window_scale, 5);
    }
}
