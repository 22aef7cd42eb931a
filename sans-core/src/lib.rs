pub mod assets;
pub mod bridge;
pub mod cli;
pub mod filter;
pub mod menu;
pub mod navigation;
pub mod protocol;
pub mod settings;

pub const APP_NAME: &str = "Sans UI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = "A native desktop shell for Sans UI applications.";
