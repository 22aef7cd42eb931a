use gtk4::gio;
use gtk4::prelude::*;
use webkit6::prelude::*;

use sans_core::assets::{self, BRIDGE_HANDLER_NAME};
use sans_core::bridge;
use sans_core::protocol::BridgeEvent;
use sans_core::settings::Settings;

/// Build the web view that hosts the application UI.
///
/// The bridge client script is injected into the top frame at document
/// start, so `window.sansBridge` exists before any page script runs.
pub fn create_webview(settings: &Settings) -> webkit6::WebView {
    let user_content_manager = webkit6::UserContentManager::new();

    let script = webkit6::UserScript::new(
        assets::BRIDGE_JS,
        webkit6::UserContentInjectedFrames::TopFrame,
        webkit6::UserScriptInjectionTime::Start,
        &[],
        &[],
    );
    user_content_manager.add_script(&script);

    let webview = webkit6::WebView::builder()
        .user_content_manager(&user_content_manager)
        .hexpand(true)
        .vexpand(true)
        .build();

    if let Some(wk_settings) = webkit6::prelude::WebViewExt::settings(&webview) {
        wk_settings.set_enable_javascript(true);
        wk_settings.set_javascript_can_open_windows_automatically(
            settings.javascript_can_open_windows,
        );
        wk_settings.set_enable_html5_local_storage(settings.enable_local_storage);
        wk_settings.set_enable_developer_extras(settings.enable_developer_extras);
    }

    webview.connect_load_changed(|webview, event| {
        if event == webkit6::LoadEvent::Finished {
            log::info!(
                "Page loaded: {}",
                webview.uri().map(|u| u.to_string()).unwrap_or_default()
            );
        }
    });
    webview.connect_load_failed(|_webview, _event, uri, error| {
        log::warn!("Failed to load {}: {}", uri, error);
        false
    });

    webview
}

/// Route messages posted to `window.webkit.messageHandlers.sansBridge` into
/// `on_message` as raw JSON text.
pub fn attach_bridge<F>(webview: &webkit6::WebView, on_message: F)
where
    F: Fn(&str) + 'static,
{
    let Some(user_content_manager) = webview.user_content_manager() else {
        log::error!("Web view has no user content manager; bridge disabled");
        return;
    };

    user_content_manager.register_script_message_handler(BRIDGE_HANDLER_NAME, None);
    user_content_manager.connect_script_message_received(
        Some(BRIDGE_HANDLER_NAME),
        move |_ucm, value| {
            // The client posts JSON strings; plain objects are accepted too.
            let json = if value.is_string() {
                value.to_str().to_string()
            } else {
                value.to_json(0).map(|j| j.to_string()).unwrap_or_default()
            };
            on_message(&json);
        },
    );
}

/// Hand a JSON payload to the page's bridge client.
pub fn deliver(webview: &webkit6::WebView, json: &str) {
    let script = assets::receive_script(json);
    webview.evaluate_javascript(
        &script,
        None,
        None,
        None::<&gio::Cancellable>,
        |result| {
            if let Err(e) = result {
                log::warn!("Failed to deliver bridge message: {}", e);
            }
        },
    );
}

pub fn emit(webview: &webkit6::WebView, event: &BridgeEvent) {
    match bridge::encode_event(event) {
        Ok(json) => deliver(webview, &json),
        Err(e) => log::error!("{}", e),
    }
}

/// Open the WebKit inspector. Requires `enable_developer_extras`.
pub fn show_inspector(webview: &webkit6::WebView) {
    match webview.inspector() {
        Some(inspector) => inspector.show(),
        None => log::warn!("Web view has no inspector"),
    }
}
