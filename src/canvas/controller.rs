//! Headless interaction controller for the schema canvas.
//!
//! The controller owns the viewport (pan, zoom) and the pointer gesture
//! state machine, and translates pointer and keyboard input into store
//! commands. It is deliberately free of any rendering concern: the view
//! layer performs hit testing against its own geometry and reports what
//! the pointer landed on as a [`HitTarget`], so the whole interaction
//! protocol is testable without a window.

use tracing::debug;
use uuid::Uuid;

use crate::core::command::Command;
use crate::core::document::{Relationship, SchemaDocument};
use crate::core::geometry::{
    clamp_zoom, screen_to_world, snap_to_grid, Point, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};
use crate::core::store::SchemaStore;

/// Minimum table size a resize gesture can reach.
pub const MIN_TABLE_WIDTH: f64 = 160.0;
pub const MIN_TABLE_HEIGHT: f64 = 120.0;
/// Minimum bookmark size a resize gesture can reach.
pub const MIN_BOOKMARK_WIDTH: f64 = 200.0;
pub const MIN_BOOKMARK_HEIGHT: f64 = 120.0;

/// Rendered table height assumed when testing bookmark membership. The
/// stored height tracks the resize handle, not the rendered card, so the
/// membership check uses a fixed estimate of the visible height instead.
pub const HEIGHT_ESTIMATE: f64 = 200.0;

/// Zoom factor applied by the explicit zoom buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.2;

/// What the pointer landed on, as resolved by the view layer's hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Table { id: Uuid },
    TableResizeHandle { id: Uuid },
    ColumnConnector { table: Uuid, column: Uuid },
    BookmarkHeader { id: Uuid },
    BookmarkBody { id: Uuid },
    BookmarkResizeHandle { id: Uuid },
    Relationship { id: Uuid },
    Canvas,
}

/// Keys the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Z,
    Y,
    C,
    V,
}

/// A keyboard event, with the platform command/ctrl modifier folded into
/// one flag by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifier: bool,
    pub shift: bool,
}

/// The pointer gesture in progress.
///
/// Drag and resize gestures capture a document snapshot on pointer down;
/// the snapshot becomes the single undo entry when the gesture ends
/// having changed something.
#[derive(Clone, Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    DragTable {
        id: Uuid,
        offset: Point,
        snapshot: SchemaDocument,
        moved: bool,
    },
    DragBookmark {
        id: Uuid,
        snapshot: SchemaDocument,
        moved: bool,
    },
    ResizeTable {
        id: Uuid,
        start: (f64, f64),
        origin_world: Point,
        snapshot: SchemaDocument,
        changed: bool,
    },
    ResizeBookmark {
        id: Uuid,
        start: (f64, f64),
        origin_world: Point,
        snapshot: SchemaDocument,
        changed: bool,
    },
    Connecting {
        source_table: Uuid,
        source_col: Uuid,
        start: Point,
        cursor: Point,
    },
    Panning {
        grab: Point,
    },
}

/// Viewport and gesture state for one canvas.
#[derive(Debug)]
pub struct CanvasController {
    gesture: Gesture,
    pan: Point,
    zoom: f64,
    canvas_origin: Point,
    hovered_table: Option<Uuid>,
    selected_relationship: Option<Uuid>,
    last_world: Point,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            pan: Point::ZERO,
            zoom: 1.0,
            canvas_origin: Point::ZERO,
            hovered_table: None,
            selected_relationship: None,
            last_world: Point::ZERO,
        }
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn hovered_table(&self) -> Option<Uuid> {
        self.hovered_table
    }

    pub fn selected_relationship(&self) -> Option<Uuid> {
        self.selected_relationship
    }

    /// The canvas element's screen offset, needed to map pointer
    /// coordinates into world space.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    /// Hover tracking is driven by the view's enter/leave events.
    pub fn set_hovered_table(&mut self, table: Option<Uuid>) {
        self.hovered_table = table;
    }

    /// Endpoints of the in-progress connection gesture in world space,
    /// for drawing the rubber-band line from the pressed connector to the
    /// pointer. `None` outside the gesture.
    pub fn connection_preview(&self) -> Option<(Point, Point)> {
        if let Gesture::Connecting { start, cursor, .. } = &self.gesture {
            Some((*start, *cursor))
        } else {
            None
        }
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen_to_world(screen, self.canvas_origin, self.pan, self.zoom)
    }

    pub fn pointer_down(&mut self, store: &SchemaStore, hit: HitTarget, screen: Point) {
        let world = self.screen_to_world(screen);
        self.last_world = world;

        match hit {
            HitTarget::Table { id } => {
                if let Some(table) = store.document().table(id) {
                    self.gesture = Gesture::DragTable {
                        id,
                        offset: world - table.position,
                        snapshot: store.snapshot(),
                        moved: false,
                    };
                }
            }
            HitTarget::TableResizeHandle { id } => {
                if let Some(table) = store.document().table(id) {
                    self.gesture = Gesture::ResizeTable {
                        id,
                        start: (table.width, table.height),
                        origin_world: world,
                        snapshot: store.snapshot(),
                        changed: false,
                    };
                }
            }
            HitTarget::ColumnConnector { table, column } => {
                self.gesture = Gesture::Connecting {
                    source_table: table,
                    source_col: column,
                    start: world,
                    cursor: world,
                };
            }
            HitTarget::BookmarkHeader { id } => {
                if store.document().bookmark(id).is_some() {
                    self.gesture = Gesture::DragBookmark {
                        id,
                        snapshot: store.snapshot(),
                        moved: false,
                    };
                }
            }
            HitTarget::BookmarkResizeHandle { id } => {
                if let Some(bookmark) = store.document().bookmark(id) {
                    self.gesture = Gesture::ResizeBookmark {
                        id,
                        start: (bookmark.width, bookmark.height),
                        origin_world: world,
                        snapshot: store.snapshot(),
                        changed: false,
                    };
                }
            }
            HitTarget::Relationship { id } => {
                self.selected_relationship = Some(id);
            }
            // A bookmark's body swallows the click: no pan, no drag.
            HitTarget::BookmarkBody { .. } => {}
            HitTarget::Canvas => {
                self.selected_relationship = None;
                self.gesture = Gesture::Panning {
                    grab: screen - self.pan,
                };
            }
        }
    }

    pub fn pointer_move(&mut self, store: &mut SchemaStore, screen: Point) {
        if let Gesture::Panning { grab } = self.gesture {
            self.pan = screen - grab;
            return;
        }

        let world = self.screen_to_world(screen);
        let last_world = self.last_world;
        self.last_world = world;

        match &mut self.gesture {
            Gesture::DragTable {
                id, offset, moved, ..
            } => {
                let target = snap_to_grid(world - *offset);
                let current = store.document().table(*id).map(|t| t.position);
                if let Some(position) = current
                    && position != target
                {
                    store.dispatch(Command::MoveTable {
                        id: *id,
                        position: target,
                    });
                    *moved = true;
                }
            }
            Gesture::DragBookmark { id, moved, .. } => {
                let delta = world - last_world;
                if delta.x != 0.0 || delta.y != 0.0 {
                    store.dispatch(Command::MoveBookmark {
                        id: *id,
                        dx: delta.x,
                        dy: delta.y,
                    });
                    *moved = true;
                }
            }
            Gesture::ResizeTable {
                id,
                start,
                origin_world,
                changed,
                ..
            } => {
                let delta = world - *origin_world;
                let width = (start.0 + delta.x).max(MIN_TABLE_WIDTH);
                let height = (start.1 + delta.y).max(MIN_TABLE_HEIGHT);
                let current = store.document().table(*id).map(|t| (t.width, t.height));
                if current.is_some_and(|dims| dims != (width, height)) {
                    store.dispatch(Command::ResizeTable {
                        id: *id,
                        width,
                        height,
                    });
                    *changed = true;
                }
            }
            Gesture::ResizeBookmark {
                id,
                start,
                origin_world,
                changed,
                ..
            } => {
                let delta = world - *origin_world;
                let width = (start.0 + delta.x).max(MIN_BOOKMARK_WIDTH);
                let height = (start.1 + delta.y).max(MIN_BOOKMARK_HEIGHT);
                let current = store
                    .document()
                    .bookmark(*id)
                    .map(|b| (b.width, b.height));
                if current.is_some_and(|dims| dims != (width, height)) {
                    store.dispatch(Command::ResizeBookmark {
                        id: *id,
                        width,
                        height,
                    });
                    *changed = true;
                }
            }
            Gesture::Connecting { cursor, .. } => {
                *cursor = world;
            }
            Gesture::Idle | Gesture::Panning { .. } => {}
        }
    }

    pub fn pointer_up(&mut self, store: &mut SchemaStore, hit: HitTarget) {
        match std::mem::take(&mut self.gesture) {
            Gesture::DragTable {
                id,
                snapshot,
                moved,
                ..
            } => {
                if moved {
                    store.dispatch(Command::PushHistory { snapshot });
                }
                self.settle_bookmark_membership(store, id);
            }
            Gesture::DragBookmark {
                snapshot, moved, ..
            } => {
                if moved {
                    store.dispatch(Command::PushHistory { snapshot });
                }
            }
            Gesture::ResizeTable {
                snapshot, changed, ..
            }
            | Gesture::ResizeBookmark {
                snapshot, changed, ..
            } => {
                if changed {
                    store.dispatch(Command::PushHistory { snapshot });
                }
            }
            Gesture::Connecting {
                source_table,
                source_col,
                ..
            } => {
                if let HitTarget::ColumnConnector { table, column } = hit
                    && table != source_table
                {
                    store.dispatch(Command::AddRelationship {
                        relationship: Relationship::new(source_table, source_col, table, column),
                    });
                } else {
                    debug!("connection gesture dropped without a target");
                }
            }
            Gesture::Panning { .. } | Gesture::Idle => {}
        }
    }

    /// The pointer left the canvas: end whatever gesture was running as
    /// if the button was released over empty space.
    pub fn pointer_leave(&mut self, store: &mut SchemaStore) {
        self.hovered_table = None;
        self.pointer_up(store, HitTarget::Canvas);
    }

    /// A dropped table joins the first bookmark whose frame contains its
    /// visual center, or leaves its bookmark when dropped outside.
    fn settle_bookmark_membership(&self, store: &mut SchemaStore, table_id: Uuid) {
        let Some(table) = store.document().table(table_id) else {
            return;
        };
        let center = Point::new(
            table.position.x + table.width / 2.0,
            table.position.y + HEIGHT_ESTIMATE / 2.0,
        );
        let target = store
            .document()
            .bookmarks
            .iter()
            .find(|b| b.bounds().contains(center))
            .map(|b| b.id);
        if target != table.bookmark_id {
            store.dispatch(Command::AssignTableToBookmark {
                table_id,
                bookmark_id: target,
            });
        }
    }

    /// Scroll-wheel zoom. Positive `delta_y` (scrolling down) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom = clamp_zoom(self.zoom * factor);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = clamp_zoom(self.zoom * BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = clamp_zoom(self.zoom / BUTTON_ZOOM_STEP);
    }

    pub fn reset_view(&mut self) {
        self.pan = Point::ZERO;
        self.zoom = 1.0;
    }

    /// Pan so the table's card sits centered in a viewport of the given
    /// pixel size, at the current zoom.
    pub fn focus_on_table(&mut self, store: &SchemaStore, id: Uuid, viewport: (f64, f64)) {
        if let Some(table) = store.document().table(id) {
            self.pan = Point::new(
                viewport.0 / 2.0 - (table.position.x + 120.0) * self.zoom,
                viewport.1 / 2.0 - (table.position.y + 100.0) * self.zoom,
            );
        }
    }

    pub fn key_down(&mut self, store: &mut SchemaStore, input: KeyInput) {
        match input.key {
            Key::Delete | Key::Backspace => {
                if let Some(id) = self.selected_relationship.take() {
                    store.dispatch(Command::DeleteRelationship { id });
                }
            }
            Key::Z if input.modifier && input.shift => store.dispatch(Command::Redo),
            Key::Z if input.modifier => store.dispatch(Command::Undo),
            Key::Y if input.modifier => store.dispatch(Command::Redo),
            Key::C if input.modifier => {
                if let Some(id) = self.hovered_table {
                    store.dispatch(Command::CopyTable { id });
                }
            }
            Key::V if input.modifier => store.dispatch(Command::PasteTable),
            _ => {}
        }
    }

    /// Context-menu action: create a table under the cursor.
    pub fn add_table_at(&self, store: &mut SchemaStore, screen: Point) {
        store.dispatch(Command::AddTable {
            position: Some(self.screen_to_world(screen)),
        });
    }

    /// Context-menu action: create a bookmark frame under the cursor.
    pub fn add_bookmark_at(&self, store: &mut SchemaStore, screen: Point) {
        store.dispatch(Command::AddBookmark {
            at: Some(self.screen_to_world(screen)),
        });
    }
}
