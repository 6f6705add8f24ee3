//! Board controller: owns the shapes, their history and the pointer
//! interaction state.

use crate::config::BoardConfig;
use crate::history::HistoryStack;
use crate::input::{HistoryCommand, KeyEvent, PointerEvent, history_command};
use crate::selection::{CursorKind, Interaction, Position, cursor_for_position, resized_coordinates};
use crate::shapes::{ShapeCollection, ShapeId, ShapeStyle};
use crate::tools::ToolKind;
use kurbo::{Line, Point};

/// A whiteboard: shapes with undo/redo, driven by pointer and key events.
///
/// Every mutating call leaves the board ready to be redrawn from
/// [`Board::shapes`]; triggering the redraw is up to the caller.
#[derive(Debug, Clone)]
pub struct Board {
    history: HistoryStack<ShapeCollection>,
    tool: ToolKind,
    style: ShapeStyle,
    interaction: Interaction,
    config: BoardConfig,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create an empty board with `config`.
    pub fn with_config(config: BoardConfig) -> Self {
        let history = match config.max_history {
            Some(max_len) => HistoryStack::bounded(ShapeCollection::new(), max_len.max(1)),
            None => HistoryStack::new(ShapeCollection::new()),
        };
        Self {
            history,
            tool: ToolKind::default(),
            style: config.default_style.clone(),
            interaction: Interaction::Idle,
            config,
        }
    }

    /// The shapes of the current history snapshot.
    pub fn shapes(&self) -> &ShapeCollection {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryStack<ShapeCollection> {
        &self.history
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. Any interaction in progress is finished first.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("Switching tool {:?} -> {:?}", self.tool, tool);
        }
        self.finish_interaction();
        self.tool = tool;
    }

    /// Style applied to shapes drawn from now on.
    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The shape currently being drawn, moved or resized.
    pub fn selected(&self) -> Option<ShapeId> {
        self.interaction.selected()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Dispatch a pointer event. Returns the cursor to show afterwards.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> CursorKind {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down(position);
                self.cursor_at(position)
            }
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => {
                self.pointer_up();
                self.cursor_at(position)
            }
        }
    }

    /// Dispatch a key event. Returns the history command it triggered, if
    /// the key was an undo or redo chord.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<HistoryCommand> {
        let command = history_command(event)?;
        match command {
            HistoryCommand::Undo => self.undo(),
            HistoryCommand::Redo => self.redo(),
        };
        Some(command)
    }

    /// Start drawing, moving or resizing depending on the tool and what is
    /// under the pointer.
    pub fn pointer_down(&mut self, point: Point) {
        if !self.interaction.is_idle() {
            log::warn!("Pointer down during {:?}, ending it first", self.interaction.mode());
        }
        self.finish_interaction();

        match self.tool.shape_kind() {
            Some(kind) => {
                let id = self.shapes().next_id();
                let shapes = self
                    .shapes()
                    .appended(kind, Line::new(point, point), self.style.clone());
                self.history.push(shapes, false);
                self.interaction = Interaction::Drawing { id };
                log::debug!("Drawing {:?} {} from {:?}", kind, id, point);
            }
            None => {
                let Some(hit) = self.shapes().hit_test_with(point, &self.config) else {
                    return;
                };
                let Some(origin) = self.shapes().get(hit.id).map(|shape| shape.diagonal()) else {
                    return;
                };
                // Start a new history step; the drag overwrites it.
                self.history.push_with(ShapeCollection::clone, false);
                self.interaction = match hit.position {
                    Position::Inside => Interaction::Moving {
                        id: hit.id,
                        offset: point - origin.p0,
                        origin,
                    },
                    Position::Handle(handle) => Interaction::Resizing {
                        id: hit.id,
                        handle,
                        origin,
                    },
                };
                log::debug!(
                    "{:?} shape {} (grabbed at {})",
                    self.interaction.mode(),
                    hit.id,
                    hit.position.as_str()
                );
            }
        }
    }

    /// Follow the pointer with the active interaction. Returns the hover
    /// cursor.
    pub fn pointer_move(&mut self, point: Point) -> CursorKind {
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Drawing { id } => {
                if let Some(start) = self.shapes().get(id).map(|shape| shape.start()) {
                    self.overwrite(id, Line::new(start, point));
                } else {
                    log::warn!("Drawing shape {} vanished from the collection", id);
                }
            }
            Interaction::Moving { id, offset, origin } => {
                let start = point - offset;
                let size = origin.p1 - origin.p0;
                self.overwrite(id, Line::new(start, start + size));
            }
            Interaction::Resizing { id, handle, origin } => {
                self.overwrite(id, resized_coordinates(point, handle, origin));
            }
        }
        self.cursor_at(point)
    }

    /// Finish the interaction. Drawn and resized shapes get their anchors
    /// normalized.
    pub fn pointer_up(&mut self) {
        let interaction = std::mem::take(&mut self.interaction);
        match interaction {
            Interaction::Idle => {}
            Interaction::Drawing { id } | Interaction::Resizing { id, .. } => {
                let normalized = self.shapes().get(id).map(|shape| shape.normalized());
                match normalized {
                    Some(shape) => {
                        let shapes = self.shapes().replaced(shape);
                        self.history.push(shapes, true);
                        log::debug!("Finished {:?} shape {}", interaction.mode(), id);
                    }
                    None => log::warn!("Released shape {} is not in the collection", id),
                }
            }
            Interaction::Moving { id, .. } => {
                log::debug!("Finished moving shape {}", id);
            }
        }
    }

    /// Step back in history. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.finish_interaction();
        let undone = self.history.undo();
        log::debug!(
            "Undo {} (index {})",
            if undone { "applied" } else { "ignored" },
            self.history.index()
        );
        undone
    }

    /// Step forward in history. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.finish_interaction();
        let redone = self.history.redo();
        log::debug!(
            "Redo {} (index {})",
            if redone { "applied" } else { "ignored" },
            self.history.index()
        );
        redone
    }

    /// Cursor for hovering `point` with the current tool.
    pub fn cursor_at(&self, point: Point) -> CursorKind {
        if self.tool != ToolKind::Selection {
            return CursorKind::Default;
        }
        if let Interaction::Resizing { handle, .. } = self.interaction {
            return handle.cursor();
        }
        cursor_for_position(
            self.shapes()
                .hit_test_with(point, &self.config)
                .map(|hit| hit.position),
        )
    }

    /// Replace the current snapshot with one where shape `id` has new anchors.
    fn overwrite(&mut self, id: ShapeId, diagonal: Line) {
        let Some(shape) = self.shapes().get(id).map(|shape| shape.with_diagonal(diagonal)) else {
            log::warn!("Cannot update missing shape {}", id);
            return;
        };
        log::trace!("Shape {} -> {:?}", id, diagonal);
        let shapes = self.shapes().replaced(shape);
        self.history.push(shapes, true);
    }

    /// Release any running drag so its shape is left normalized in the
    /// current snapshot.
    fn finish_interaction(&mut self) {
        if !self.interaction.is_idle() {
            self.pointer_up();
        }
    }
}
