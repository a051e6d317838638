//! The desktop facade: the only window-management surface other subsystems
//! (command dispatcher, click routing, voice layer) call into.

use super::{
    AppKind, DragController, DragSession, Point, SnapPreview, StackManager, Viewport, WindowId,
    WindowRecord,
};

/// Transition signals consumed by the assistant-orb docking indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEvent {
    BecameEmpty,
    BecameNonEmpty,
}

/// One desktop session: the owned aggregate of the stack and the drag
/// controller, constructed once and passed by reference to callers.
#[derive(Debug)]
pub struct Desktop {
    stack: StackManager,
    drag: DragController,
    viewport: Viewport,
    // queue of empty/non-empty transitions; callers drain via `take_events`
    events: Vec<DesktopEvent>,
}

impl Desktop {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            stack: StackManager::new(),
            drag: DragController::new(),
            viewport,
            events: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_snap_edge_threshold(&mut self, threshold: u16) {
        self.drag.set_snap_threshold(threshold);
    }

    pub fn open_window(&mut self, kind: AppKind) -> WindowId {
        let was_empty = self.stack.is_empty();
        let id = self.stack.create(kind, self.viewport);
        if was_empty {
            self.events.push(DesktopEvent::BecameNonEmpty);
        }
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        if !self.stack.contains(id) {
            return;
        }
        self.stack.close(id);
        if self.stack.is_empty() {
            self.events.push(DesktopEvent::BecameEmpty);
        }
    }

    pub fn close_all(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        self.stack.close_all();
        self.events.push(DesktopEvent::BecameEmpty);
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        self.stack.minimize(id);
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        self.stack.maximize(id, self.viewport);
    }

    pub fn focus_window(&mut self, id: WindowId) {
        self.stack.focus(id);
    }

    pub fn begin_drag(&mut self, id: WindowId, pointer: Point) {
        self.drag.begin(&mut self.stack, id, pointer);
    }

    pub fn update_drag(&mut self, pointer: Point) {
        self.drag.update(&mut self.stack, self.viewport, pointer);
    }

    pub fn end_drag(&mut self) {
        self.drag.end(&mut self.stack, self.viewport);
    }

    pub fn force_end_drag(&mut self) {
        self.drag.force_end(&mut self.stack, self.viewport);
    }

    pub fn active_window_count(&self) -> usize {
        self.stack.open_count()
    }

    /// Drain and return the empty/non-empty transitions since the last call.
    pub fn take_events(&mut self) -> Vec<DesktopEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    pub fn snap_preview(&self) -> &SnapPreview {
        self.drag.preview()
    }

    pub fn embedded_interaction_enabled(&self) -> bool {
        self.drag.embedded_interaction_enabled()
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.stack.focused()
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.stack.get(id)
    }

    pub fn draw_order(&self) -> Vec<WindowId> {
        self.stack.draw_order()
    }

    pub fn minimized_windows(&self) -> Vec<WindowId> {
        self.stack.minimized()
    }

    pub fn window_at(&self, point: Point) -> Option<WindowId> {
        self.stack.window_at(point)
    }

    /// Top-most open window of the given kind, minimized ones included;
    /// used by refresh flows that re-open an app in place.
    pub fn find_by_kind(&self, kind: &AppKind) -> Option<WindowId> {
        self.stack
            .iter()
            .filter(|record| &record.kind == kind)
            .max_by_key(|record| record.stack_index)
            .map(|record| record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::VisualState;

    fn desktop() -> Desktop {
        Desktop::new(Viewport::new(1280, 800, 85))
    }

    #[test]
    fn empty_transitions_fire_once_per_edge() {
        let mut desk = desktop();
        let a = desk.open_window(AppKind::Notepad);
        let b = desk.open_window(AppKind::Terminal);
        assert_eq!(desk.take_events(), vec![DesktopEvent::BecameNonEmpty]);
        desk.close_window(a);
        assert!(desk.take_events().is_empty());
        desk.close_window(b);
        assert_eq!(desk.take_events(), vec![DesktopEvent::BecameEmpty]);
        // closing an already-closed id emits nothing
        desk.close_window(b);
        assert!(desk.take_events().is_empty());
    }

    #[test]
    fn close_all_empties_and_signals() {
        let mut desk = desktop();
        desk.open_window(AppKind::Notepad);
        desk.open_window(AppKind::Browser);
        desk.take_events();
        desk.close_all();
        assert_eq!(desk.active_window_count(), 0);
        assert_eq!(desk.take_events(), vec![DesktopEvent::BecameEmpty]);
        desk.close_all();
        assert!(desk.take_events().is_empty());
    }

    #[test]
    fn scenario_three_windows_focus_and_close() {
        let mut desk = desktop();
        let a = desk.open_window(AppKind::Notepad);
        let b = desk.open_window(AppKind::Terminal);
        let c = desk.open_window(AppKind::Browser);
        desk.focus_window(a);
        let idx = |desk: &Desktop, id| desk.window(id).unwrap().stack_index;
        assert!(idx(&desk, a) > idx(&desk, c));
        assert!(desk.window(a).unwrap().focused);
        assert!(!desk.window(b).unwrap().focused);
        assert!(!desk.window(c).unwrap().focused);
        desk.close_window(b);
        assert_eq!(desk.active_window_count(), 2);
        assert!(desk.window(a).unwrap().focused);
    }

    #[test]
    fn drag_protocol_routes_through_facade() {
        let mut desk = desktop();
        let id = desk.open_window(AppKind::Notepad);
        desk.begin_drag(id, Point::new(400, 300));
        desk.update_drag(Point::new(5, 300));
        desk.end_drag();
        let record = desk.window(id).unwrap();
        assert_eq!(record.visual, VisualState::SnappedLeft);
        assert_eq!(record.rect, desk.viewport().left_half());
    }

    #[test]
    fn find_by_kind_prefers_top_most() {
        let mut desk = desktop();
        let first = desk.open_window(AppKind::Photos);
        let second = desk.open_window(AppKind::Photos);
        assert_eq!(desk.find_by_kind(&AppKind::Photos), Some(second));
        desk.focus_window(first);
        assert_eq!(desk.find_by_kind(&AppKind::Photos), Some(first));
        assert_eq!(desk.find_by_kind(&AppKind::Settings), None);
    }
}
