mod host;
mod webview;
mod window;

use std::cell::RefCell;
use std::rc::Rc;

use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;

use sans_core::cli::{Args, LaunchConfig};
use sans_core::{protocol, settings};

const APP_ID: &str = "dev.sansui.Shell";

fn main() -> glib::ExitCode {
    env_logger::init();

    let args = Args::parse();

    if args.print_schema {
        return match serde_json::to_string_pretty(&protocol::bridge_schema()) {
            Ok(schema) => {
                println!("{}", schema);
                glib::ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("sans-ui: failed to render schema: {}", e);
                glib::ExitCode::FAILURE
            }
        };
    }

    let settings = settings::load();
    let config = match LaunchConfig::resolve(&args, &settings) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sans-ui: {}", e);
            return glib::ExitCode::FAILURE;
        }
    };
    let settings = Rc::new(RefCell::new(settings));

    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        if let Some(existing) = app.active_window() {
            existing.present();
            return;
        }
        window::build_window(app, &config, settings.clone());
    });

    // Arguments were already consumed by clap
    app.run_with_args::<&str>(&[])
}
