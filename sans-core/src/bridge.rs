use std::path::PathBuf;

use serde_json::Value;
use url::Url;

use crate::navigation;
use crate::protocol::{
    coerce_string, BridgeEvent, BridgeRequest, BridgeResponse, FileDialogOptions,
    NotificationOptions,
};

/// Callback through which a host reports the outcome of an asynchronous call.
pub type Completion<T> = Box<dyn FnOnce(Result<T, String>)>;

/// Native capabilities the bridge forwards to.
///
/// Implemented by the GTK frontend; tests use an in-memory fake. All methods
/// are called on the UI thread, and completions are expected to fire there too.
pub trait NativeHost {
    fn navigate(&self, url: &Url);
    fn reload(&self);
    /// Evaluate `code` in the page. Completes with the script's value as JSON,
    /// `Value::Null` when it is `undefined` or not serializable.
    fn execute_javascript(&self, code: &str, done: Completion<Value>);
    /// Show an open or save dialog. `Ok(None)` means the user cancelled.
    fn open_file_dialog(&self, options: FileDialogOptions, done: Completion<Option<PathBuf>>);
    fn show_notification(&self, options: NotificationOptions) -> Result<(), String>;
}

/// The fixed vocabulary of bridge actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate,
    Reload,
    ExecuteJavaScript,
    OpenFileDialog,
    ShowNotification,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::Navigate,
        Action::Reload,
        Action::ExecuteJavaScript,
        Action::OpenFileDialog,
        Action::ShowNotification,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Navigate => "navigate",
            Action::Reload => "reload",
            Action::ExecuteJavaScript => "executeJavaScript",
            Action::OpenFileDialog => "openFileDialog",
            Action::ShowNotification => "showNotification",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.iter().copied().find(|a| a.name() == name)
    }
}

/// Dispatches bridge requests to a [`NativeHost`] and produces responses.
pub struct Bridge<H> {
    host: H,
}

impl<H: NativeHost> Bridge<H> {
    pub fn new(host: H) -> Self {
        Bridge { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle one raw JSON message from the web content.
    ///
    /// Malformed messages are logged and dropped without a response. Every
    /// well-formed message results in exactly one call to `respond`, possibly
    /// after the host completes an asynchronous operation.
    pub fn handle_message<F>(&self, raw: &str, respond: F)
    where
        F: FnOnce(BridgeResponse) + 'static,
    {
        match BridgeRequest::parse(raw) {
            Ok(request) => self.dispatch(request, respond),
            Err(e) => log::warn!("Dropping bridge message: {} (json: {})", e, raw),
        }
    }

    pub fn dispatch<F>(&self, request: BridgeRequest, respond: F)
    where
        F: FnOnce(BridgeResponse) + 'static,
    {
        let BridgeRequest { id, action, data } = request;
        log::debug!("Bridge request {} -> {}", id, action);

        let Some(known) = Action::from_name(&action) else {
            respond(BridgeResponse::err(id, format!("Unknown action: {}", action)));
            return;
        };

        match known {
            Action::Navigate => {
                let raw_url = coerce_string(data.get("url")).unwrap_or_default();
                match navigation::normalize_url(&raw_url) {
                    Ok(url) => {
                        log::info!("Navigating to {}", url);
                        self.host.navigate(&url);
                        respond(BridgeResponse::ok(id, true));
                    }
                    Err(e) => respond(BridgeResponse::err(id, e)),
                }
            }
            Action::Reload => {
                self.host.reload();
                respond(BridgeResponse::ok(id, true));
            }
            Action::ExecuteJavaScript => {
                let code = coerce_string(data.get("code")).unwrap_or_default();
                if code.is_empty() {
                    respond(BridgeResponse::err(id, "Invalid JavaScript code"));
                    return;
                }
                self.host.execute_javascript(
                    &code,
                    Box::new(move |result| match result {
                        Ok(value) => respond(BridgeResponse::ok(
                            id,
                            serde_json::json!({ "result": value }),
                        )),
                        Err(e) => respond(BridgeResponse::err(
                            id,
                            format!("JavaScript execution failed: {}", e),
                        )),
                    }),
                );
            }
            Action::OpenFileDialog => {
                let options = FileDialogOptions::from_data(&data);
                self.host.open_file_dialog(
                    options,
                    Box::new(move |result| {
                        let path = match result {
                            Ok(Some(path)) => path.to_string_lossy().into_owned(),
                            Ok(None) => String::new(),
                            Err(e) => {
                                log::warn!("File dialog failed: {}", e);
                                String::new()
                            }
                        };
                        respond(BridgeResponse::ok(id, path));
                    }),
                );
            }
            Action::ShowNotification => {
                let options = NotificationOptions::from_data(&data);
                let shown = match self.host.show_notification(options) {
                    Ok(()) => true,
                    Err(e) => {
                        log::error!("Failed to show notification: {}", e);
                        false
                    }
                };
                respond(BridgeResponse::ok(id, shown));
            }
        }
    }
}

/// Serialize a response for delivery to the web content.
pub fn encode_response(response: &BridgeResponse) -> Result<String, String> {
    serde_json::to_string(response).map_err(|e| format!("Failed to serialize response: {}", e))
}

/// Serialize an unsolicited event for delivery to the web content.
pub fn encode_event(event: &BridgeEvent) -> Result<String, String> {
    serde_json::to_string(event).map_err(|e| format!("Failed to serialize event: {}", e))
}
