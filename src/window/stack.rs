//! Ordered window collection: stacking indices, exclusive focus, lifecycle.

use std::collections::BTreeMap;

use super::{AppKind, Viewport, VisualState, WindowId, WindowRecord};

/// Owns every [`WindowRecord`] of a desktop session.
///
/// Stacking indices come from a single monotonic counter shared by `create`
/// and `focus`; indices are never reused and never compacted after a close.
/// Every operation addressed by id tolerates a missing id as a silent no-op;
/// windows may be closed out from under a queued operation.
#[derive(Debug, Default)]
pub struct StackManager {
    windows: BTreeMap<WindowId, WindowRecord>,
    stack_counter: u64,
    id_counter: u64,
    open_count: usize,
}

impl StackManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, kind: AppKind, viewport: Viewport) -> WindowId {
        self.id_counter += 1;
        let id = WindowId(self.id_counter);
        self.stack_counter += 1;
        let record = WindowRecord {
            id,
            rect: kind.default_rect(viewport),
            kind,
            saved_rect: None,
            stack_index: self.stack_counter,
            visual: VisualState::Normal,
            focused: false,
        };
        tracing::debug!(window_id = ?id, stack_index = record.stack_index, "opened window");
        self.windows.insert(id, record);
        self.open_count += 1;
        self.focus(id);
        id
    }

    /// Moves `id` to the top of the stack and gives it exclusive focus.
    ///
    /// Focusing a minimized window restores it to `Normal` first (taskbar
    /// click semantics).
    pub fn focus(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            return;
        }
        for record in self.windows.values_mut() {
            record.focused = false;
        }
        self.stack_counter += 1;
        let top = self.stack_counter;
        if let Some(record) = self.windows.get_mut(&id) {
            record.focused = true;
            record.stack_index = top;
            if record.visual == VisualState::Minimized {
                record.visual = VisualState::Normal;
            }
        }
    }

    /// Hides `id` from the render order. The record keeps its stack index
    /// and geometry; focus falls back to the top-most non-minimized window.
    pub fn minimize(&mut self, id: WindowId) {
        let Some(record) = self.windows.get_mut(&id) else {
            return;
        };
        record.visual = VisualState::Minimized;
        if record.focused {
            record.focused = false;
            self.focus_fallback();
        }
        tracing::debug!(window_id = ?id, "minimized window");
    }

    /// Toggles between full work area and the saved pre-maximize geometry.
    /// A second toggle restores the first exactly, barring external changes.
    pub fn maximize(&mut self, id: WindowId, viewport: Viewport) {
        let Some(record) = self.windows.get_mut(&id) else {
            return;
        };
        if record.visual == VisualState::Maximized {
            if let Some(saved) = record.saved_rect.take() {
                record.rect = saved;
            }
            record.visual = VisualState::Normal;
        } else {
            record.saved_rect = Some(record.rect);
            record.rect = viewport.work_area();
            record.visual = VisualState::Maximized;
        }
        tracing::debug!(window_id = ?id, state = ?record.visual, "toggled maximize");
    }

    /// Removes `id`. Remaining stack indices are untouched; the open count
    /// clamps at zero.
    pub fn close(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        self.open_count = self.open_count.saturating_sub(1);
        self.focus_fallback();
        tracing::debug!(window_id = ?id, remaining = self.open_count, "closed window");
    }

    pub fn close_all(&mut self) {
        self.windows.clear();
        self.open_count = 0;
    }

    /// Gives focus to the top-most non-minimized window when nothing holds it.
    fn focus_fallback(&mut self) {
        if self.windows.values().any(|record| record.focused) {
            return;
        }
        let top = self
            .windows
            .values()
            .filter(|record| !record.is_minimized())
            .max_by_key(|record| record.stack_index)
            .map(|record| record.id);
        if let Some(id) = top
            && let Some(record) = self.windows.get_mut(&id)
        {
            record.focused = true;
        }
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.windows
            .values()
            .find(|record| record.focused)
            .map(|record| record.id)
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.values()
    }

    /// Render order: ascending stack index, minimized windows skipped.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut ids: Vec<_> = self
            .windows
            .values()
            .filter(|record| !record.is_minimized())
            .map(|record| (record.stack_index, record.id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn minimized(&self) -> Vec<WindowId> {
        let mut ids: Vec<_> = self
            .windows
            .values()
            .filter(|record| record.is_minimized())
            .map(|record| (record.stack_index, record.id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Top-most non-minimized window containing `point`, if any.
    pub fn window_at(&self, point: super::Point) -> Option<WindowId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|id| self.windows.get(id).is_some_and(|w| w.rect.contains(point)))
    }
}
