//! Per-window drag sessions: pointer deltas, edge snap zones, preview.

use super::{Point, StackManager, Viewport, VisualState, WinRect, WindowId};
use crate::constants::SNAP_EDGE_THRESHOLD;

/// Half-screen snap target hit while dragging near a vertical screen edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapHalf {
    Left,
    Right,
}

/// Ephemeral state of one in-progress window relocation, pointer-down to
/// pointer-up.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub window: WindowId,
    pub pointer_start: Point,
    pub rect_start: WinRect,
    pub pending_snap: Option<SnapHalf>,
    /// Set once the first movement has demoted a maximized window; the
    /// un-maximize happens at most once per session.
    unmaximized: bool,
}

/// The single shared overlay hinting at the pending snap target.
///
/// Purely a projection of the active session's `pending_snap`; hidden
/// whenever no drag session is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapPreview {
    rect: Option<WinRect>,
}

impl SnapPreview {
    pub fn rect(&self) -> Option<WinRect> {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.rect.is_some()
    }

    fn project(&mut self, snap: Option<SnapHalf>, viewport: Viewport) {
        self.rect = snap.map(|half| match half {
            SnapHalf::Left => viewport.left_half(),
            SnapHalf::Right => viewport.right_half(),
        });
    }

    fn hide(&mut self) {
        self.rect = None;
    }
}

/// Translates continuous pointer movement into geometry updates and snap
/// decisions for exactly one window at a time.
///
/// Only one session may exist system-wide; a `begin` while one is active is
/// rejected, which also keeps the shared [`SnapPreview`] and the
/// embedded-content interaction flag single-writer.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    preview: SnapPreview,
    /// Pointer interaction on embedded third-party content surfaces; turned
    /// off for the duration of a drag so they cannot steal input capture.
    embedded_interaction: bool,
    snap_threshold: u16,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            session: None,
            preview: SnapPreview::default(),
            embedded_interaction: true,
            snap_threshold: SNAP_EDGE_THRESHOLD,
        }
    }

    /// Edge-zone width in layout units. Terminal front-ends use a
    /// cell-scale zone; the default matches the pixel metaphor.
    pub fn set_snap_threshold(&mut self, threshold: u16) {
        self.snap_threshold = threshold;
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> &SnapPreview {
        &self.preview
    }

    pub fn embedded_interaction_enabled(&self) -> bool {
        self.embedded_interaction
    }

    /// Starts a session for `window`. No-op while another session is active
    /// or when the window does not exist.
    pub fn begin(&mut self, stack: &mut StackManager, window: WindowId, pointer: Point) {
        if self.session.is_some() {
            tracing::debug!(window_id = ?window, "drag rejected, session already active");
            return;
        }
        let Some(record) = stack.get(window) else {
            return;
        };
        let rect_start = record.rect;
        stack.focus(window);
        self.embedded_interaction = false;
        self.session = Some(DragSession {
            window,
            pointer_start: pointer,
            rect_start,
            pending_snap: None,
            unmaximized: false,
        });
        tracing::debug!(window_id = ?window, ?pointer, "drag begun");
    }

    /// Applies the pointer delta to the dragged window's origin and
    /// re-evaluates the snap zones. No-op without an active session.
    pub fn update(&mut self, stack: &mut StackManager, viewport: Viewport, pointer: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(record) = stack.get_mut(session.window) else {
            // Window closed mid-drag; shut the session down cleanly.
            self.session = None;
            self.preview.hide();
            self.embedded_interaction = true;
            return;
        };

        // Dragging a maximized window demotes it at the current pointer
        // position, restoring the pre-maximize size. Once per session.
        if !session.unmaximized && record.visual == VisualState::Maximized {
            session.unmaximized = true;
            record.visual = VisualState::Normal;
            if let Some(saved) = record.saved_rect {
                record.rect.width = saved.width;
                record.rect.height = saved.height;
                session.rect_start.width = saved.width;
                session.rect_start.height = saved.height;
            }
        }

        // Moving a snapped window returns it to free-form placement; a
        // release in an edge zone re-snaps it below.
        if matches!(
            record.visual,
            VisualState::SnappedLeft | VisualState::SnappedRight
        ) {
            record.visual = VisualState::Normal;
        }

        let dx = pointer.x - session.pointer_start.x;
        let dy = pointer.y - session.pointer_start.y;
        record.rect.x = session.rect_start.x + dx;
        record.rect.y = session.rect_start.y + dy;

        session.pending_snap = if pointer.x < self.snap_threshold as i32 {
            Some(SnapHalf::Left)
        } else if pointer.x > (viewport.width as i32) - (self.snap_threshold as i32) {
            Some(SnapHalf::Right)
        } else {
            None
        };
        self.preview.project(session.pending_snap, viewport);
    }

    /// Ends the session: commits a pending snap to the exact half-screen
    /// rectangle, otherwise leaves the window where the drag put it.
    pub fn end(&mut self, stack: &mut StackManager, viewport: Viewport) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.preview.hide();
        self.embedded_interaction = true;
        let Some(record) = stack.get_mut(session.window) else {
            return;
        };
        match session.pending_snap {
            Some(SnapHalf::Left) => {
                record.saved_rect = Some(session.rect_start);
                record.rect = viewport.left_half();
                record.visual = VisualState::SnappedLeft;
            }
            Some(SnapHalf::Right) => {
                record.saved_rect = Some(session.rect_start);
                record.rect = viewport.right_half();
                record.visual = VisualState::SnappedRight;
            }
            None => {}
        }
        tracing::debug!(window_id = ?session.window, snap = ?session.pending_snap, "drag ended");
    }

    /// Safety net for input sources that vanish without a pointer-up
    /// (terminal focus loss): commits like [`end`](Self::end) so the
    /// embedded-content flag and preview can never stay stuck.
    pub fn force_end(&mut self, stack: &mut StackManager, viewport: Viewport) {
        if self.session.is_some() {
            tracing::debug!("force-ending lingering drag session");
            self.end(stack, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::AppKind;

    const VIEWPORT: Viewport = Viewport {
        width: 1280,
        height: 800,
        chrome_height: 85,
    };

    fn setup() -> (StackManager, DragController, WindowId) {
        let mut stack = StackManager::new();
        let id = stack.create(AppKind::Notepad, VIEWPORT);
        (stack, DragController::new(), id)
    }

    #[test]
    fn update_moves_origin_only() {
        let (mut stack, mut drag, id) = setup();
        let start = stack.get(id).unwrap().rect;
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(410, 280));
        let rect = stack.get(id).unwrap().rect;
        assert_eq!(rect.x, start.x + 10);
        assert_eq!(rect.y, start.y - 20);
        assert_eq!(rect.width, start.width);
        assert_eq!(rect.height, start.height);
    }

    #[test]
    fn negative_positions_are_accepted() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(-900, -900));
        let rect = stack.get(id).unwrap().rect;
        assert!(rect.x < 0);
        assert!(rect.y < 0);
        drag.end(&mut stack, VIEWPORT);
    }

    #[test]
    fn second_begin_is_rejected_while_active() {
        let (mut stack, mut drag, first) = setup();
        let second = stack.create(AppKind::Terminal, VIEWPORT);
        let second_rect = stack.get(second).unwrap().rect;
        drag.begin(&mut stack, first, Point::new(400, 300));
        drag.begin(&mut stack, second, Point::new(100, 100));
        assert_eq!(drag.session().unwrap().window, first);
        drag.update(&mut stack, VIEWPORT, Point::new(500, 300));
        assert_eq!(stack.get(second).unwrap().rect, second_rect);
    }

    #[test]
    fn left_edge_commits_left_half() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(10, 300));
        assert_eq!(drag.session().unwrap().pending_snap, Some(SnapHalf::Left));
        assert!(drag.preview().is_visible());
        assert_eq!(drag.preview().rect(), Some(VIEWPORT.left_half()));
        drag.end(&mut stack, VIEWPORT);
        let record = stack.get(id).unwrap();
        assert_eq!(record.rect, VIEWPORT.left_half());
        assert_eq!(record.visual, VisualState::SnappedLeft);
        assert!(!drag.preview().is_visible());
    }

    #[test]
    fn right_edge_commits_right_half() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(1270, 300));
        drag.end(&mut stack, VIEWPORT);
        let record = stack.get(id).unwrap();
        assert_eq!(record.rect, VIEWPORT.right_half());
        assert_eq!(record.visual, VisualState::SnappedRight);
    }

    #[test]
    fn mid_screen_release_keeps_free_placement() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(600, 350));
        let dragged = stack.get(id).unwrap().rect;
        drag.end(&mut stack, VIEWPORT);
        let record = stack.get(id).unwrap();
        assert_eq!(record.rect, dragged);
        assert_eq!(record.visual, VisualState::Normal);
    }

    #[test]
    fn dragging_a_snapped_window_to_mid_screen_restores_normal() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(10, 300));
        drag.end(&mut stack, VIEWPORT);
        assert_eq!(stack.get(id).unwrap().visual, VisualState::SnappedLeft);

        drag.begin(&mut stack, id, Point::new(100, 100));
        drag.update(&mut stack, VIEWPORT, Point::new(600, 350));
        drag.end(&mut stack, VIEWPORT);
        let record = stack.get(id).unwrap();
        assert_eq!(record.visual, VisualState::Normal);
        assert_eq!(record.rect.x, VIEWPORT.left_half().x + 500);
    }

    #[test]
    fn snap_zone_can_be_left_again() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(5, 300));
        drag.update(&mut stack, VIEWPORT, Point::new(640, 300));
        assert_eq!(drag.session().unwrap().pending_snap, None);
        assert!(!drag.preview().is_visible());
    }

    #[test]
    fn dragging_maximized_window_unmaximizes_once() {
        let (mut stack, mut drag, id) = setup();
        let original = stack.get(id).unwrap().rect;
        stack.maximize(id, VIEWPORT);
        drag.begin(&mut stack, id, Point::new(400, 0));
        drag.update(&mut stack, VIEWPORT, Point::new(400, 40));
        let record = stack.get(id).unwrap();
        assert_eq!(record.visual, VisualState::Normal);
        assert_eq!(record.rect.width, original.width);
        assert_eq!(record.rect.height, original.height);
    }

    #[test]
    fn update_and_end_without_begin_are_noops() {
        let (mut stack, mut drag, id) = setup();
        let rect = stack.get(id).unwrap().rect;
        drag.update(&mut stack, VIEWPORT, Point::new(0, 0));
        drag.end(&mut stack, VIEWPORT);
        assert_eq!(stack.get(id).unwrap().rect, rect);
    }

    #[test]
    fn embedded_interaction_disabled_only_during_drag() {
        let (mut stack, mut drag, id) = setup();
        assert!(drag.embedded_interaction_enabled());
        drag.begin(&mut stack, id, Point::new(400, 300));
        assert!(!drag.embedded_interaction_enabled());
        drag.force_end(&mut stack, VIEWPORT);
        assert!(drag.embedded_interaction_enabled());
        assert!(drag.session().is_none());
    }

    #[test]
    fn window_closed_mid_drag_clears_session() {
        let (mut stack, mut drag, id) = setup();
        drag.begin(&mut stack, id, Point::new(400, 300));
        stack.close(id);
        drag.update(&mut stack, VIEWPORT, Point::new(500, 300));
        assert!(drag.session().is_none());
        assert!(drag.embedded_interaction_enabled());
        assert!(!drag.preview().is_visible());
    }
}
