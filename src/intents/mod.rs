// Presentation -> core boundary
pub mod dispatch;

pub use dispatch::{dispatch, AppOptions, AppState};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PointerEvent;
use crate::models::{ApplyFilterRequest, UpdateSettingsRequest, UserRole};

/// Errors surfaced to the driver
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid JSON intent: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {message}")]
    InvalidArgument { command: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// User intents emitted by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    OpenFilter,
    ApplyFilter(ApplyFilterRequest),
    ClearFilter,
    CloseOverlay,
    Skip,
    Match,
    Pointer { event: PointerEvent },
    OpenMenu,
    OpenMatchList,
    OpenSettings,
    OpenProfile {
        #[serde(default, rename = "coordinatorId")]
        coordinator_id: Option<String>,
    },
    UpdateSettings(UpdateSettingsRequest),
    StartChat,
    MakeCall,
    DismissMatch,
    Tick,
    Snapshot,
}

impl Intent {
    /// Parse one line of driver input.
    ///
    /// Lines starting with `{` are JSON intents; anything else is a terse
    /// command such as `skip`, `drag 150`, or `apply menu=shopping,train`.
    pub fn parse_command(line: &str) -> Result<Vec<Intent>, AppError> {
        let line = line.trim();
        if line.starts_with('{') {
            return Ok(vec![serde_json::from_str(line)?]);
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(vec![Intent::Snapshot]);
        };
        let args: Vec<&str> = words.collect();

        let intent = match command {
            "skip" | "left" => Intent::Skip,
            "match" | "right" => Intent::Match,
            "down" => pointer(command, &args, |x| PointerEvent::Down { x })?,
            "move" => pointer(command, &args, |x| PointerEvent::Move { x })?,
            "up" => Intent::Pointer { event: PointerEvent::Up },
            "cancel" => Intent::Pointer { event: PointerEvent::Cancel },
            "drag" => {
                let offset = number(command, &args)?;
                return Ok(vec![
                    Intent::Pointer { event: PointerEvent::Down { x: 0.0 } },
                    Intent::Pointer { event: PointerEvent::Move { x: offset } },
                    Intent::Pointer { event: PointerEvent::Up },
                ]);
            }
            "filter" => Intent::OpenFilter,
            "apply" => Intent::ApplyFilter(filter_request(&args)?),
            "clear" => Intent::ClearFilter,
            "close" | "back" => Intent::CloseOverlay,
            "menu" => Intent::OpenMenu,
            "matches" => Intent::OpenMatchList,
            "settings" => Intent::OpenSettings,
            "profile" => Intent::OpenProfile {
                coordinator_id: args.first().map(|id| id.to_string()),
            },
            "user" => Intent::UpdateSettings(settings_request(&args)?),
            "chat" => Intent::StartChat,
            "call" => Intent::MakeCall,
            "dismiss" | "later" => Intent::DismissMatch,
            "tick" => Intent::Tick,
            "show" => Intent::Snapshot,
            other => return Err(AppError::UnknownCommand(other.to_string())),
        };

        Ok(vec![intent])
    }
}

fn number(command: &str, args: &[&str]) -> Result<f64, AppError> {
    let raw = args.first().ok_or_else(|| AppError::InvalidArgument {
        command: command.to_string(),
        message: "expected a number".to_string(),
    })?;
    raw.parse().map_err(|_| AppError::InvalidArgument {
        command: command.to_string(),
        message: format!("not a number: {}", raw),
    })
}

fn pointer(
    command: &str,
    args: &[&str],
    event: impl FnOnce(f64) -> PointerEvent,
) -> Result<Intent, AppError> {
    Ok(Intent::Pointer {
        event: event(number(command, args)?),
    })
}

/// `apply service=spot menu=shopping,train time=weekend`
fn filter_request(args: &[&str]) -> Result<ApplyFilterRequest, AppError> {
    let mut request = ApplyFilterRequest::default();

    for arg in args {
        let (dimension, values) = arg.split_once('=').ok_or_else(|| AppError::InvalidArgument {
            command: "apply".to_string(),
            message: format!("expected dimension=values, got {}", arg),
        })?;
        let values = values.split(',').map(str::to_string);

        match dimension {
            "service" => request.service_types.extend(values),
            "menu" => request.support_menus.extend(values),
            "time" => request.available_times.extend(values),
            other => {
                return Err(AppError::InvalidArgument {
                    command: "apply".to_string(),
                    message: format!("unknown dimension: {}", other),
                })
            }
        }
    }

    Ok(request)
}

/// `user <role> <name...>`
fn settings_request(args: &[&str]) -> Result<UpdateSettingsRequest, AppError> {
    let (role, name) = args.split_first().ok_or_else(|| AppError::InvalidArgument {
        command: "user".to_string(),
        message: "expected <role> <name>".to_string(),
    })?;
    let role: UserRole = role.parse().map_err(|e| AppError::InvalidArgument {
        command: "user".to_string(),
        message: format!("{}", e),
    })?;

    Ok(UpdateSettingsRequest {
        name: name.join(" "),
        role,
    })
}
