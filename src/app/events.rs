//! CanvasIntent-, CanvasCommand- und CanvasEffect-Enums für den Intent/Command-Datenfluss.

mod command;
mod effect;
mod intent;

pub use command::CanvasCommand;
pub use effect::{
    CanvasEffect, CommitItemResult, CommitRequest, ShapeAssignment, ShapePersistKind,
    ShapePersistRequest,
};
pub use intent::{
    CanvasIntent, CanvasKey, LineEndpoint, Modifiers, ModifiedObject, PointerButton, ShapeRef,
};
