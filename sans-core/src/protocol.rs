use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Requests: web content → native (sent via postMessage)
// ---------------------------------------------------------------------------

/// A request posted by the web content to the bridge.
///
/// Parsing is lenient: a missing or non-string `id`/`action` becomes an empty
/// string and a missing or non-object `data` becomes an empty map. Only a
/// payload that is not a JSON object at all is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BridgeRequest {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl BridgeRequest {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| format!("Invalid JSON message: {}", e))?;
        let Value::Object(mut object) = value else {
            return Err("Bridge message is not a JSON object".to_string());
        };

        let id = take_string(&mut object, "id");
        let action = take_string(&mut object, "action");
        let data = match object.remove("data") {
            Some(Value::Object(data)) => data,
            _ => Map::new(),
        };

        Ok(BridgeRequest { id, action, data })
    }
}

fn take_string(object: &mut Map<String, Value>, key: &str) -> String {
    match object.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Responses: native → web content (one per request)
// ---------------------------------------------------------------------------

/// Reply to a [`BridgeRequest`]. Exactly one of `data` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BridgeResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeResponse {
    pub fn ok(id: impl Into<String>, data: impl Into<Value>) -> Self {
        BridgeResponse {
            id: id.into(),
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn err(id: impl Into<String>, error: impl Into<String>) -> Self {
        BridgeResponse {
            id: id.into(),
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ---------------------------------------------------------------------------
// Events: native → web content (unsolicited)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BridgeEvent {
    /// A file was picked through the File ▸ Open menu.
    #[serde(rename_all = "camelCase")]
    FileSelected { file_path: String },
    /// The user clicked a button on a notification sent by `showNotification`.
    #[serde(rename_all = "camelCase")]
    NotificationAction {
        notification_id: String,
        action_id: String,
        action_index: u32,
    },
}

/// JSON Schema for every message that crosses the bridge, keyed by direction.
pub fn bridge_schema() -> Value {
    serde_json::json!({
        "request": schemars::schema_for!(BridgeRequest),
        "response": schemars::schema_for!(BridgeResponse),
        "event": schemars::schema_for!(BridgeEvent),
    })
}

/// Convert the JSON text of an evaluated script value into a response value.
///
/// `undefined` has no JSON form and arrives as `None`; it and any text that
/// fails to parse become `null`.
pub fn script_result_from_json(json: Option<&str>) -> Value {
    json.and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Action options
// ---------------------------------------------------------------------------

pub const DEFAULT_DIALOG_TITLE: &str = "Open File";
pub const DEFAULT_DIALOG_FILTER: &str = "All Files (*)";
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Notification";
pub const DEFAULT_NOTIFICATION_ICON: &str = "dialog-information";

/// Options for the `openFileDialog` action.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDialogOptions {
    pub title: String,
    pub directory: PathBuf,
    pub filter: String,
    pub save_dialog: bool,
}

impl Default for FileDialogOptions {
    fn default() -> Self {
        FileDialogOptions {
            title: DEFAULT_DIALOG_TITLE.to_string(),
            directory: default_dialog_directory(),
            filter: DEFAULT_DIALOG_FILTER.to_string(),
            save_dialog: false,
        }
    }
}

impl FileDialogOptions {
    pub fn from_data(data: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        FileDialogOptions {
            title: coerce_string(data.get("title")).unwrap_or(defaults.title),
            directory: coerce_string(data.get("directory"))
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.directory),
            filter: coerce_string(data.get("filter")).unwrap_or(defaults.filter),
            save_dialog: coerce_bool(data.get("saveDialog")).unwrap_or(defaults.save_dialog),
        }
    }
}

/// The user's documents directory, falling back to home, then `/`.
pub fn default_dialog_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationAction {
    pub id: String,
    pub text: String,
}

/// Options for the `showNotification` action.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationOptions {
    pub title: String,
    pub text: String,
    pub icon_name: String,
    pub actions: Vec<NotificationAction>,
}

impl NotificationOptions {
    pub fn from_data(data: &Map<String, Value>) -> Self {
        let actions = match data.get("actions") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| {
                    let item = item.as_object()?;
                    let id = coerce_string(item.get("id")).unwrap_or_default();
                    let text = coerce_string(item.get("text")).unwrap_or_default();
                    // Buttons need both a stable id and a visible label
                    if id.is_empty() || text.is_empty() {
                        return None;
                    }
                    Some(NotificationAction { id, text })
                })
                .collect(),
            _ => Vec::new(),
        };

        NotificationOptions {
            title: coerce_string(data.get("title"))
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TITLE.to_string()),
            text: coerce_string(data.get("text")).unwrap_or_default(),
            icon_name: coerce_string(data.get("iconName"))
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_ICON.to_string()),
            actions,
        }
    }
}

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// Read a value as a string. Numbers and booleans are stringified; `null`,
/// arrays and objects count as absent.
pub fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a value as a bool. `"true"`/`"1"` and non-zero numbers are true.
pub fn coerce_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Some(matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1"
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn parse_full_request() {
        let req = BridgeRequest::parse(
            r#"{"id":"cb_1","action":"navigate","data":{"url":"http://a"}}"#,
        )
        .unwrap();
        assert_eq!(req.id, "cb_1");
        assert_eq!(req.action, "navigate");
        assert_eq!(req.data.get("url"), Some(&json!("http://a")));
    }

    #[test]
    fn parse_missing_fields_default_to_empty() {
        let req = BridgeRequest::parse(r#"{"action":"reload"}"#).unwrap();
        assert_eq!(req.id, "");
        assert!(req.data.is_empty());
    }

    #[test]
    fn parse_non_object_data_becomes_empty_map() {
        let req = BridgeRequest::parse(r#"{"id":"x","action":"reload","data":[1,2]}"#).unwrap();
        assert!(req.data.is_empty());
        let req = BridgeRequest::parse(r#"{"id":7,"action":"reload"}"#).unwrap();
        assert_eq!(req.id, "");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(BridgeRequest::parse("{not json").is_err());
        assert!(BridgeRequest::parse("[1,2,3]").is_err());
        assert!(BridgeRequest::parse("\"text\"").is_err());
    }

    #[test]
    fn response_serializes_only_one_of_data_or_error() {
        let ok = serde_json::to_value(BridgeResponse::ok("a", true)).unwrap();
        assert_eq!(ok, json!({"id": "a", "data": true}));
        let err = serde_json::to_value(BridgeResponse::err("b", "boom")).unwrap();
        assert_eq!(err, json!({"id": "b", "error": "boom"}));
    }

    #[test]
    fn event_uses_camel_case_tags() {
        let event = BridgeEvent::NotificationAction {
            notification_id: "n1".into(),
            action_id: "reply".into(),
            action_index: 1,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "notificationAction",
                "notificationId": "n1",
                "actionId": "reply",
                "actionIndex": 1
            })
        );
        let selected = BridgeEvent::FileSelected {
            file_path: "/tmp/a.txt".into(),
        };
        assert_eq!(
            serde_json::to_value(&selected).unwrap(),
            json!({"type": "fileSelected", "filePath": "/tmp/a.txt"})
        );
    }

    #[test]
    fn responses_and_events_match_schema() {
        let schema = bridge_schema();
        let response_schema = jsonschema::JSONSchema::compile(&schema["response"]).unwrap();
        let event_schema = jsonschema::JSONSchema::compile(&schema["event"]).unwrap();

        let ok = serde_json::to_value(BridgeResponse::ok("1", "/tmp/x")).unwrap();
        let err = serde_json::to_value(BridgeResponse::err("2", "Unknown action: x")).unwrap();
        assert!(response_schema.is_valid(&ok));
        assert!(response_schema.is_valid(&err));
        assert!(!response_schema.is_valid(&json!({"data": true})));

        let event = serde_json::to_value(BridgeEvent::FileSelected {
            file_path: "/tmp/x".into(),
        })
        .unwrap();
        assert!(event_schema.is_valid(&event));
        assert!(!event_schema.is_valid(&json!({"type": "somethingElse"})));
    }

    #[test]
    fn file_dialog_defaults() {
        let opts = FileDialogOptions::from_data(&Map::new());
        assert_eq!(opts.title, "Open File");
        assert_eq!(opts.filter, "All Files (*)");
        assert!(!opts.save_dialog);
        assert_eq!(opts.directory, default_dialog_directory());
    }

    #[test]
    fn file_dialog_options_are_coerced() {
        let opts = FileDialogOptions::from_data(&data(json!({
            "title": "Pick",
            "directory": "/var/tmp",
            "filter": "Text (*.txt)",
            "saveDialog": "true",
        })));
        assert_eq!(opts.title, "Pick");
        assert_eq!(opts.directory, PathBuf::from("/var/tmp"));
        assert_eq!(opts.filter, "Text (*.txt)");
        assert!(opts.save_dialog);

        let opts = FileDialogOptions::from_data(&data(json!({
            "title": 42,
            "directory": "",
            "saveDialog": 0,
        })));
        assert_eq!(opts.title, "42");
        assert_eq!(opts.directory, default_dialog_directory());
        assert!(!opts.save_dialog);
    }

    #[test]
    fn notification_defaults() {
        let opts = NotificationOptions::from_data(&Map::new());
        assert_eq!(opts.title, "Notification");
        assert_eq!(opts.text, "");
        assert_eq!(opts.icon_name, "dialog-information");
        assert!(opts.actions.is_empty());
    }

    #[test]
    fn notification_skips_incomplete_actions() {
        let opts = NotificationOptions::from_data(&data(json!({
            "title": "Build finished",
            "text": "All green",
            "iconName": "emblem-ok",
            "actions": [
                {"id": "open", "text": "Open"},
                {"id": "", "text": "No id"},
                {"id": "no-text"},
                "not an object",
                {"id": 3, "text": "Three"}
            ]
        })));
        assert_eq!(opts.icon_name, "emblem-ok");
        assert_eq!(
            opts.actions,
            vec![
                NotificationAction {
                    id: "open".into(),
                    text: "Open".into()
                },
                NotificationAction {
                    id: "3".into(),
                    text: "Three".into()
                },
            ]
        );
    }

    #[test]
    fn script_results_parse_or_become_null() {
        assert_eq!(script_result_from_json(Some("{\"a\":[1,2]}")), json!({"a": [1, 2]}));
        assert_eq!(script_result_from_json(Some("\"text\"")), json!("text"));
        assert_eq!(script_result_from_json(Some("undefined")), Value::Null);
        assert_eq!(script_result_from_json(None), Value::Null);
    }

    #[test]
    fn coerce_bool_variants() {
        assert_eq!(coerce_bool(Some(&json!(true))), Some(true));
        assert_eq!(coerce_bool(Some(&json!(1))), Some(true));
        assert_eq!(coerce_bool(Some(&json!("TRUE"))), Some(true));
        assert_eq!(coerce_bool(Some(&json!("no"))), Some(false));
        assert_eq!(coerce_bool(Some(&json!(null))), None);
        assert_eq!(coerce_bool(None), None);
    }
}
