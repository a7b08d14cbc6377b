//! JSON request/response dispatch
//!
//! The host speaks one JSON object per line:
//!
//! ```text
//! -> {"id": 1, "command": "validate", "args": {"dsl": "が _N:注文", "locale": "ja"}}
//! <- {"id": 1, "ok": true, "result": {"isValid": false, ...}}
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commands;
use crate::error::{CommandError, ErrorBody, Result};
use crate::state::HostState;

/// Incoming command request
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Echoed back in the response
    #[serde(default)]
    pub id: Value,
    pub command: String,
    #[serde(default)]
    pub args: Value,
}

/// Outgoing response
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: &CommandError) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(ErrorBody::from(error)),
        }
    }
}

/// Command names accepted by [`dispatch`]
pub const COMMANDS: &[&str] = &[
    "linearize",
    "validate",
    "analyze_patterns",
    "suggest_patterns",
    "get_patterns",
    "plan_fix",
    "render_prompt",
    "generate_prompt",
    "to_dsl",
    "parse_dsl",
    "greet",
    "register_macro",
    "remove_macro",
    "list_macros",
];

fn args<T: DeserializeOwned>(value: Value) -> Result<T> {
    // Missing args behave like an empty object
    let value = if value.is_null() {
        Value::Object(Default::default())
    } else {
        value
    };
    serde_json::from_value(value).map_err(|e| CommandError::InvalidArguments(e.to_string()))
}

fn reply<T: Serialize>(result: Result<T>) -> Result<Value> {
    Ok(serde_json::to_value(result?)?)
}

fn run(state: &mut HostState, command: &str, raw: Value) -> Result<Value> {
    match command {
        "linearize" => reply(commands::linearize(state, args(raw)?)),
        "validate" => reply(commands::validate(state, args(raw)?)),
        "analyze_patterns" => reply(commands::analyze_patterns(state, args(raw)?)),
        "suggest_patterns" => reply(commands::suggest_patterns(state, args(raw)?)),
        "get_patterns" => reply(commands::get_patterns(state, args(raw)?)),
        "plan_fix" => reply(commands::plan_fix(state, args(raw)?)),
        "render_prompt" => reply(commands::render_prompt(state, args(raw)?)),
        "generate_prompt" => reply(commands::generate_prompt(state, args(raw)?)),
        "to_dsl" => reply(commands::to_dsl(state, args(raw)?)),
        "parse_dsl" => reply(commands::parse_dsl(state, args(raw)?)),
        "greet" => reply(commands::greet(state, args(raw)?)),
        "register_macro" => reply(commands::register_macro(state, args(raw)?)),
        "remove_macro" => reply(commands::remove_macro(state, args(raw)?)),
        "list_macros" => reply(commands::list_macros(state)),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Run one request against the host state
pub fn dispatch(state: &mut HostState, request: Request) -> Response {
    match run(state, &request.command, request.args) {
        Ok(result) => Response::success(request.id, result),
        Err(e) => {
            log::warn!("Command '{}' failed: {}", request.command, e);
            Response::failure(request.id, &e)
        }
    }
}

/// Handle one line of input, producing one line of output
pub fn handle_line(state: &mut HostState, line: &str) -> String {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(state, request),
        Err(e) => Response::failure(Value::Null, &CommandError::InvalidRequest(e.to_string())),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        log::error!("Failed to serialize response: {}", e);
        r#"{"id":null,"ok":false,"error":{"kind":"serialization","message":"response serialization failed"}}"#
            .to_string()
    })
}
