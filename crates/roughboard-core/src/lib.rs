//! Roughboard Core Library
//!
//! Platform-agnostic shape model, hit-testing, undo/redo history and
//! pointer interaction for the Roughboard whiteboard.

pub mod board;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod sketch;
pub mod tools;

pub use board::Board;
pub use config::{BoardConfig, HitPrecedence, HitTolerance};
pub use error::{BoardError, BoardResult};
pub use history::HistoryStack;
pub use input::{HistoryCommand, KeyEvent, Modifiers, PointerEvent};
pub use selection::{CursorKind, Handle, Interaction, InteractionMode, Position};
pub use shapes::{Hit, Shape, ShapeCollection, ShapeId, ShapeKind, ShapeStyle, Sloppiness};
pub use sketch::{Sketch, SketchFill};
pub use tools::ToolKind;
