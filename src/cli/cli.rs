use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::app_config::AppConfig;
use crate::config::constants::DATA_DIR_ENV_VAR;

#[derive(Parser)]
#[command(author, version, about = "Keep collections of places on a map", long_about = None)]
pub struct Args {
    #[arg(short, long, env = DATA_DIR_ENV_VAR, help = "Directory holding the saved maps")]
    data_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List saved maps
    List,
    /// Create a new map by placing markers interactively
    Create {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show the places of a map and how the camera frames them
    View { index: usize },
    /// Delete a map
    Delete { index: usize },
    /// Write the places of a map to a CSV file
    Export { index: usize, path: PathBuf },
    /// Add the demo maps
    Sample,
    /// Move an unreadable data file aside and start fresh
    Recover,
}

impl Args {
    pub fn data_dir(&self) -> Option<&PathBuf> {
        self.data_dir.as_ref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn app_config(&self) -> AppConfig {
        match self.data_dir() {
            Some(dir) => AppConfig::with_data_dir(dir),
            None => AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_description() {
        let args = Args::try_parse_from(["mymaps", "--data-dir", "/tmp/m", "create", "Trip", "-d", "Summer"]).unwrap();

        assert_eq!(
            args.command(),
            &Command::Create { title: "Trip".to_string(), description: "Summer".to_string() }
        );
        assert_eq!(args.app_config().data_file_path(), PathBuf::from("/tmp/m/user_maps.json"));
    }

    #[test]
    fn parses_index_commands() {
        let args = Args::try_parse_from(["mymaps", "--debug-logging", "delete", "2"]).unwrap();

        assert!(args.debug_logging());
        assert_eq!(args.command(), &Command::Delete { index: 2 });
        assert!(Args::try_parse_from(["mymaps", "view", "minus-one"]).is_err());
    }
}
