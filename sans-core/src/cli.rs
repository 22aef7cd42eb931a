use clap::{ArgAction, Parser};
use url::Url;

use crate::navigation;
use crate::settings::Settings;

/// Command-line options for the shell.
///
/// `-h` selects the window height, so help is only available as `--help`.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "sans-ui",
    version,
    about = "Native shell hosting a Sans UI web application",
    disable_help_flag = true
)]
pub struct Args {
    /// URL to load (scheme optional)
    #[arg(short = 'u', long, value_name = "URL")]
    pub url: Option<String>,

    /// Window title
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Window width in pixels
    #[arg(short = 'w', long, value_name = "PIXELS", value_parser = clap::value_parser!(i32).range(1..))]
    pub width: Option<i32>,

    /// Window height in pixels
    #[arg(short = 'h', long, value_name = "PIXELS", value_parser = clap::value_parser!(i32).range(1..))]
    pub height: Option<i32>,

    /// Print the JSON Schema of the bridge messages and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub print_schema: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Everything needed to open the main window.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    pub url: Url,
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl LaunchConfig {
    /// Merge explicit command-line values over persisted settings.
    pub fn resolve(args: &Args, settings: &Settings) -> Result<Self, String> {
        let raw_url = args.url.as_deref().unwrap_or(&settings.url);
        let url = navigation::normalize_url(raw_url)?;
        Ok(LaunchConfig {
            url,
            title: args.title.clone().unwrap_or_else(|| settings.title.clone()),
            width: args.width.unwrap_or(settings.window_width).max(1),
            height: args.height.unwrap_or(settings.window_height).max(1),
        })
    }
}
