//! Application-Layer: Controller, State, Events, Modi und Handler.

pub mod command_log;
pub mod controller;
pub mod error;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod modes;
/// Canvas State und Sessions
pub mod state;
pub mod surface;

pub use command_log::{CommandLog, LoggedCommand};
pub use controller::CanvasController;
pub use error::{CanvasError, MissingEntity};
pub use events::{CanvasCommand, CanvasEffect, CanvasIntent};
pub use modes::{CanvasMode, ModeKind, ModeManager};
pub use state::{CanvasState, SessionId};
pub use surface::{CanvasMarcher, CanvasSurface};
