use std::cell::Cell;
use std::path::PathBuf;

use gtk4::gio;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use url::Url;
use webkit6::prelude::*;

use sans_core::bridge::{Completion, NativeHost};
use sans_core::filter;
use sans_core::protocol::{self, FileDialogOptions, NotificationOptions};

/// App action that notification buttons activate. Its parameter is
/// `(notification_id, action_id, action_index)`.
pub const NOTIFICATION_ACTION: &str = "notification-action";

/// [`NativeHost`] backed by the main window's GTK widgets.
pub struct GtkHost {
    app: adw::Application,
    window: adw::ApplicationWindow,
    webview: webkit6::WebView,
    next_notification: Cell<u64>,
}

impl GtkHost {
    pub fn new(
        app: &adw::Application,
        window: &adw::ApplicationWindow,
        webview: &webkit6::WebView,
    ) -> Self {
        GtkHost {
            app: app.clone(),
            window: window.clone(),
            webview: webview.clone(),
            next_notification: Cell::new(1),
        }
    }
}

impl NativeHost for GtkHost {
    fn navigate(&self, url: &Url) {
        self.webview.load_uri(url.as_str());
    }

    fn reload(&self) {
        self.webview.reload();
    }

    fn execute_javascript(&self, code: &str, done: Completion<serde_json::Value>) {
        self.webview.evaluate_javascript(
            code,
            None,
            None,
            None::<&gio::Cancellable>,
            move |result| {
                done(
                    result
                        .map(|value| {
                            let json = value.to_json(0);
                            protocol::script_result_from_json(json.as_deref())
                        })
                        .map_err(|e| e.to_string()),
                )
            },
        );
    }

    fn open_file_dialog(&self, options: FileDialogOptions, done: Completion<Option<PathBuf>>) {
        pick_file(&self.window, &options, done);
    }

    fn show_notification(&self, options: NotificationOptions) -> Result<(), String> {
        if !self.app.is_registered() {
            return Err("application is not registered with the session bus".to_string());
        }

        let serial = self.next_notification.get();
        self.next_notification.set(serial + 1);
        let notification_id = format!("sans-notification-{}", serial);

        let notification = gio::Notification::new(&options.title);
        if !options.text.is_empty() {
            notification.set_body(Some(&options.text));
        }
        notification.set_icon(&gio::ThemedIcon::new(&options.icon_name));

        let detailed_action = format!("app.{}", NOTIFICATION_ACTION);
        for (index, action) in options.actions.iter().enumerate() {
            let target = (notification_id.clone(), action.id.clone(), index as u32).to_variant();
            notification.add_button_with_target_value(&action.text, &detailed_action, Some(&target));
        }

        self.app.send_notification(Some(&notification_id), &notification);
        log::info!("Sent notification {} ({})", notification_id, options.title);
        Ok(())
    }
}

/// Show a native open or save dialog parented to `window`.
///
/// Dismissing the dialog completes with `Ok(None)`.
pub fn pick_file(
    window: &adw::ApplicationWindow,
    options: &FileDialogOptions,
    done: Completion<Option<PathBuf>>,
) {
    let dialog = gtk4::FileDialog::builder()
        .title(options.title.as_str())
        .modal(true)
        .build();

    if options.directory.is_dir() {
        dialog.set_initial_folder(Some(&gio::File::for_path(&options.directory)));
    }

    let filters = gio::ListStore::new::<gtk4::FileFilter>();
    for spec in filter::parse_filter_string(&options.filter) {
        let file_filter = gtk4::FileFilter::new();
        file_filter.set_name(Some(&spec.name));
        for pattern in &spec.patterns {
            file_filter.add_pattern(pattern);
        }
        filters.append(&file_filter);
    }
    dialog.set_filters(Some(&filters));

    let on_result = move |result: Result<gio::File, glib::Error>| {
        let outcome = match result {
            Ok(file) => file
                .path()
                .map(Some)
                .ok_or_else(|| format!("Selected file has no local path: {}", file.uri())),
            Err(e)
                if e.matches(gtk4::DialogError::Dismissed)
                    || e.matches(gtk4::DialogError::Cancelled) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.to_string()),
        };
        done(outcome);
    };

    if options.save_dialog {
        dialog.save(Some(window), None::<&gio::Cancellable>, on_result);
    } else {
        dialog.open(Some(window), None::<&gio::Cancellable>, on_result);
    }
}
