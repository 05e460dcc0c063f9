//! Drill Canvas Editor Library.
//! Interaktiver Canvas-Kern (Modi, Verteilung, Pathway-Vorschau, Shape-Editor)
//! als Library exportiert für Host-Anbindung und Tests.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    CanvasCommand, CanvasController, CanvasEffect, CanvasError, CanvasIntent, CanvasState,
    ModeKind, SessionId,
};
pub use core::{
    Marcher, MarcherId, MarcherPage, MarcherPageUpdate, Page, PageId, Roster, Shape, ShapeId,
    ShapePage, ShapePageId, ShapePageMarcher,
};
pub use drill_canvas_geometry as geometry;
pub use shared::{FieldOptions, GraphicHandle, SceneGraph};
