use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind::NotFound;

use clap::ArgMatches;
use colored::Colorize;
use serde::{Deserialize, Serialize};

const CONFIG: &str = "config";
const DEFAULT_CONFIG_DIR: &str = "/.carlot/";

#[derive(Deserialize, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub host: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub verify_host: bool,
    pub api_version: Option<String>,
}

fn get_config_path(file: &str, dir: Option<&str>) -> OsString {
    let mut path = dir.map_or_else(
        || {
            home::home_dir().map_or_else(
                || panic!("{} Impossible to get your home dir!", "\u{2716}".bright_red()),
                std::path::PathBuf::into_os_string,
            )
        },
        OsString::from,
    );

    path.push(DEFAULT_CONFIG_DIR.to_owned() + file);
    path
}

fn get_config_file_or_write<T>(file: &str, dir: Option<&str>, value: T) -> String
where
    T: Sized + serde::Serialize,
{
    let path = get_config_path(file, dir);
    fs::read_to_string(&path).unwrap_or_else(|error| {
        if error.kind() == NotFound {
            let data = serde_json::to_string(&value).expect("Saved");
            fs::write(&path, &data).expect("Failed to write data");
            data
        } else {
            panic!("{} Couldn't read config file", "\u{2716}".bright_red())
        }
    })
}

impl From<&ArgMatches> for Config {
    fn from(value: &ArgMatches) -> Self {
        let config_file = value
            .get_one::<String>(CONFIG)
            .map_or_else(|| "", |s| s.as_str())
            .to_owned();

        let data = if config_file.is_empty() {
            get_config_file_or_write("config.json", None, Self::default())
        } else {
            fs::read_to_string(shellexpand::tilde(&config_file).to_string()).expect("Unable to read file")
        };

        serde_json::from_str(&data).expect("JSON does not have correct format.")
    }
}
