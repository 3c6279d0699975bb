use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, ArgMatches};
use geometry::{DrawMode, ParseDrawModeError};
use thiserror::Error;

/// Everything the user can tweak from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub mode: DrawMode,
    pub wireframe: bool,
    pub vsync: bool,
    pub vertex_shader: Option<PathBuf>,
    pub fragment_shader: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 800,
            height: 600,
            title: String::from("LearnOpenGL"),
            mode: DrawMode::Indexed,
            wireframe: false,
            vsync: true,
            vertex_shader: None,
            fragment_shader: None,
            log_filter: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0}")]
    Usage(String),

    #[error("invalid value {value:?} for --{flag}: expected a whole number greater than zero")]
    InvalidSize { flag: &'static str, value: String },

    #[error("invalid value {value:?} for --mode: {source}")]
    InvalidMode {
        value: String,
        source: ParseDrawModeError,
    },
}

/// Parses the process arguments. Help, version and usage errors are handled by clap, which
/// prints them and exits.
pub fn cli_main() -> Result<Config, ConfigError> {
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml).version(crate_version!()).get_matches();

    Config::from_matches(&matches)
}

/// Like [`cli_main`], but for an explicit argument list (the first item is the program name),
/// and reporting usage errors instead of exiting.
pub fn parse_from<I, T>(args: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .get_matches_from_safe(args)
        .map_err(|e| ConfigError::Usage(e.message))?;

    Config::from_matches(&matches)
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let mode = match matches.value_of("mode") {
            Some(value) => value.parse().map_err(|source| ConfigError::InvalidMode {
                value: value.to_string(),
                source,
            })?,
            None => defaults.mode,
        };

        Ok(Config {
            width: size_arg(matches, "width", defaults.width)?,
            height: size_arg(matches, "height", defaults.height)?,
            title: matches
                .value_of("title")
                .map(String::from)
                .unwrap_or(defaults.title),
            mode,
            wireframe: matches.is_present("wireframe"),
            vsync: !matches.is_present("no-vsync"),
            vertex_shader: matches.value_of_os("vertex-shader").map(PathBuf::from),
            fragment_shader: matches.value_of_os("fragment-shader").map(PathBuf::from),
            log_filter: matches.value_of("log").map(String::from),
        })
    }
}

fn size_arg(matches: &ArgMatches, flag: &'static str, default: u32) -> Result<u32, ConfigError> {
    let value = match matches.value_of(flag) {
        Some(v) => v,
        None => return Ok(default),
    };

    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidSize {
            flag,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_arguments_gives_the_defaults() {
        assert_eq!(parse_from(vec!["glquad"]), Ok(Config::default()));
    }

    #[test]
    fn every_option_is_picked_up() {
        let config = parse_from(vec![
            "glquad",
            "--width", "1024",
            "--height", "768",
            "--title", "quad",
            "--mode", "arrays",
            "--wireframe",
            "--no-vsync",
            "--vertex-shader", "a.vert",
            "--fragment-shader", "b.frag",
            "--log", "debug",
        ])
        .unwrap();

        assert_eq!(
            config,
            Config {
                width: 1024,
                height: 768,
                title: String::from("quad"),
                mode: DrawMode::Arrays,
                wireframe: true,
                vsync: false,
                vertex_shader: Some(PathBuf::from("a.vert")),
                fragment_shader: Some(PathBuf::from("b.frag")),
                log_filter: Some(String::from("debug")),
            }
        );
    }

    #[test]
    fn short_flags() {
        let config = parse_from(vec!["glquad", "-w", "-m", "Arrays"]).unwrap();

        assert!(config.wireframe);
        assert_eq!(config.mode, DrawMode::Arrays);
    }

    #[test]
    fn zero_and_garbage_sizes_are_rejected() {
        assert_eq!(
            parse_from(vec!["glquad", "--width", "0"]),
            Err(ConfigError::InvalidSize { flag: "width", value: String::from("0") })
        );
        assert_eq!(
            parse_from(vec!["glquad", "--height", "5.5"]),
            Err(ConfigError::InvalidSize { flag: "height", value: String::from("5.5") })
        );
        assert!(parse_from(vec!["glquad", "--height", "tall"]).is_err());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        match parse_from(vec!["glquad", "--mode", "strips"]) {
            Err(ConfigError::InvalidMode { value, .. }) => assert_eq!(value, "strips"),
            other => panic!("expected InvalidMode, got {:?}", other),
        }
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        match parse_from(vec!["glquad", "--fullscreen"]) {
            Err(ConfigError::Usage(message)) => assert!(message.contains("--fullscreen")),
            other => panic!("expected a usage error, got {:?}", other),
        }
    }
}
