use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;
use webkit6::prelude::*;

use std::cell::RefCell;
use std::rc::Rc;

use sans_core::bridge::{self, Bridge};
use sans_core::cli::LaunchConfig;
use sans_core::menu;
use sans_core::protocol::{BridgeEvent, FileDialogOptions};
use sans_core::settings::{self, Settings};

use crate::host::{self, GtkHost, NOTIFICATION_ACTION};
use crate::webview;

pub fn build_window(app: &adw::Application, config: &LaunchConfig, settings: Rc<RefCell<Settings>>) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(config.title.as_str())
        .default_width(config.width)
        .default_height(config.height)
        .build();

    let header = adw::HeaderBar::new();
    let menu_button = gtk4::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&build_menu_model())
        .primary(true)
        .tooltip_text("Main Menu")
        .build();
    header.pack_end(&menu_button);

    let webview = webview::create_webview(&settings.borrow());

    let toolbar_view = adw::ToolbarView::new();
    toolbar_view.add_top_bar(&header);
    toolbar_view.set_content(Some(&webview));
    window.set_content(Some(&toolbar_view));

    // --- Bridge: page <-> native ---
    let bridge = Rc::new(Bridge::new(GtkHost::new(app, &window, &webview)));
    {
        let bridge = bridge.clone();
        let reply_target = webview.clone();
        webview::attach_bridge(&webview, move |json| {
            run_guarded_ui("bridge-message", || {
                let reply_target = reply_target.clone();
                bridge.handle_message(json, move |response| {
                    match bridge::encode_response(&response) {
                        Ok(json) => webview::deliver(&reply_target, &json),
                        Err(e) => log::error!("{}", e),
                    }
                });
            });
        });
    }

    install_window_actions(&window, &webview, &settings);
    install_app_actions(app, &window, &webview);
    for entry in menu::MENU_ACTIONS {
        app.set_accels_for_action(entry.action, entry.accels);
    }

    // Persist the final window size
    {
        let settings = settings.clone();
        window.connect_close_request(move |window| {
            let mut settings = settings.borrow_mut();
            if settings.remember_window_size {
                settings.window_width = window.default_width();
                settings.window_height = window.default_height();
                if let Err(e) = settings::save(&settings) {
                    log::error!("Failed to save settings: {}", e);
                }
            }
            glib::Propagation::Proceed
        });
    }

    log::info!("Loading {}", config.url);
    webview.load_uri(config.url.as_str());
    window.present();
}

fn build_menu_model() -> gio::Menu {
    let model = gio::Menu::new();
    for section in menu::sections() {
        let section_menu = gio::Menu::new();
        for entry in menu::actions_in(section) {
            section_menu.append(Some(entry.label), Some(entry.action));
        }
        model.append_section(Some(section), &section_menu);
    }
    model
}

fn install_window_actions(
    window: &adw::ApplicationWindow,
    webview: &webkit6::WebView,
    settings: &Rc<RefCell<Settings>>,
) {
    let open = gio::SimpleAction::new("open", None);
    {
        let window = window.clone();
        let webview = webview.clone();
        open.connect_activate(move |_, _| {
            let webview = webview.clone();
            host::pick_file(
                &window,
                &FileDialogOptions::default(),
                Box::new(move |result| match result {
                    Ok(Some(path)) => webview::emit(
                        &webview,
                        &BridgeEvent::FileSelected {
                            file_path: path.to_string_lossy().into_owned(),
                        },
                    ),
                    Ok(None) => {}
                    Err(e) => log::warn!("Open dialog failed: {}", e),
                }),
            );
        });
    }
    window.add_action(&open);

    let reload = gio::SimpleAction::new("reload", None);
    {
        let webview = webview.clone();
        reload.connect_activate(move |_, _| webview.reload());
    }
    window.add_action(&reload);

    let inspect = gio::SimpleAction::new("inspect", None);
    inspect.set_enabled(settings.borrow().enable_developer_extras);
    {
        let webview = webview.clone();
        inspect.connect_activate(move |_, _| webview::show_inspector(&webview));
    }
    window.add_action(&inspect);
}

fn install_app_actions(
    app: &adw::Application,
    window: &adw::ApplicationWindow,
    webview: &webkit6::WebView,
) {
    let about = gio::SimpleAction::new("about", None);
    {
        let window = window.clone();
        about.connect_activate(move |_, _| show_about(&window));
    }
    app.add_action(&about);

    // Close windows rather than quitting outright so close-request handlers run
    let quit = gio::SimpleAction::new("quit", None);
    {
        let app = app.clone();
        quit.connect_activate(move |_, _| {
            for window in app.windows() {
                window.close();
            }
        });
    }
    app.add_action(&quit);

    let notification_action = gio::SimpleAction::new(
        NOTIFICATION_ACTION,
        Some(&<(String, String, u32)>::static_variant_type()),
    );
    {
        let webview = webview.clone();
        notification_action.connect_activate(move |_, parameter| {
            let Some((notification_id, action_id, action_index)) =
                parameter.and_then(|p| p.get::<(String, String, u32)>())
            else {
                log::warn!("Notification action activated without a valid target");
                return;
            };
            webview::emit(
                &webview,
                &BridgeEvent::NotificationAction {
                    notification_id,
                    action_id,
                    action_index,
                },
            );
        });
    }
    app.add_action(&notification_action);
}

fn show_about(window: &adw::ApplicationWindow) {
    let about = adw::AboutDialog::builder()
        .application_name(sans_core::APP_NAME)
        .application_icon("web-browser-symbolic")
        .version(sans_core::APP_VERSION)
        .comments(sans_core::APP_DESCRIPTION)
        .license_type(gtk4::License::Gpl30Only)
        .build();
    about.present(Some(window));
}

fn run_guarded_ui<F: FnOnce()>(label: &str, f: F) {
    if let Err(payload) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "non-string panic payload"
        };
        log::error!("UI callback panic in '{}': {}", label, msg);
    }
}
