//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Feld-Konfiguration und die Szene, die zwischen Canvas-Kern
//! und Render-Host geteilt werden.

pub mod options;
mod scene;

pub use options::FieldOptions;
pub use options::{FIELD_HEIGHT, FIELD_WIDTH, STEP_SIZE};
pub use scene::{
    CursorStyle, GraphicHandle, PathwayStyle, SceneGraph, SceneNode, SceneNodeKind,
};
