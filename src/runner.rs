//! Interactive session loop: routes terminal events onto the shell.
//!
//! Pointer events become the explicit three-call drag protocol
//! (`begin_drag` / `update_drag` / `end_drag`); keys feed the orb's typed
//! command prompt; `FocusLost` is the safety net that force-ends a
//! lingering drag when the input source vanishes without a pointer-up.

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::constants::{CHROME_HEIGHT, TERMINAL_SNAP_EDGE_THRESHOLD};
use crate::dispatch;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::media::MediaStore;
use crate::shell::Shell;
use crate::speech::Voice;
use crate::ui::{self, HitRegions};
use crate::window::{Point, Viewport, WindowId};

pub struct Runner<S: MediaStore, V: Voice> {
    shell: Shell<S, V>,
    input: String,
    hits: HitRegions,
}

impl<S: MediaStore, V: Voice> Runner<S, V> {
    pub fn new(mut shell: Shell<S, V>) -> Self {
        shell
            .desktop_mut()
            .set_snap_edge_threshold(TERMINAL_SNAP_EDGE_THRESHOLD);
        Self {
            shell,
            input: String::new(),
            hits: HitRegions::default(),
        }
    }

    pub fn shell(&self) -> &Shell<S, V> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell<S, V> {
        &mut self.shell
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Applies one terminal event. Returns `true` when the session should
    /// end.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return true;
                }
                self.handle_key(key.code);
                self.shell.shutdown_requested()
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::FocusLost => {
                self.shell.force_end_drag();
                false
            }
            Event::Resize(width, height) => {
                self.shell
                    .desktop_mut()
                    .set_viewport(Viewport::new(*width, *height, CHROME_HEIGHT));
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                if !self.input.is_empty() {
                    let transcript = self.input.to_lowercase();
                    self.input.clear();
                    self.shell.orb_mut().set_listening(false);
                    dispatch::dispatch(&mut self.shell, &transcript);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if self.input.is_empty() {
                    self.shell.orb_mut().set_listening(true);
                }
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let point = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_press(mouse.column, mouse.row, point);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.shell.update_drag(point);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.shell.end_drag();
            }
            _ => {}
        }
    }

    fn handle_press(&mut self, x: u16, y: u16, point: Point) {
        // Window controls and title bars only count for the top-most window
        // under the pointer; anything beneath is occluded.
        if let Some(top) = HitRegions::hit(&self.hits.bodies, x, y) {
            if self.button_of(&self.hits.close_buttons, top, x, y) {
                self.shell.close_window(top);
            } else if self.button_of(&self.hits.max_buttons, top, x, y) {
                self.shell.toggle_maximize(top);
            } else if self.button_of(&self.hits.min_buttons, top, x, y) {
                self.shell.minimize_window(top);
            } else if self.button_of(&self.hits.title_bars, top, x, y) {
                self.shell.begin_drag(top, point);
            } else {
                self.shell.focus_window(top);
            }
            return;
        }
        if let Some(id) = HitRegions::hit(&self.hits.taskbar_items, x, y) {
            // restores a minimized window
            self.shell.focus_window(id);
            return;
        }
        // Hit regions are a frame old; fall back to live geometry so a
        // press that lands between frames still focuses the window.
        if let Some(id) = self.shell.desktop().window_at(point) {
            self.shell.focus_window(id);
        }
    }

    fn button_of(&self, list: &[(WindowId, Rect)], id: WindowId, x: u16, y: u16) -> bool {
        list.iter()
            .any(|(owner, rect)| *owner == id && ui::rect_contains(*rect, x, y))
    }
}

/// Runs the shell session until shutdown, Ctrl+Q, or an I/O failure.
pub fn run_shell<B, D, S, V>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    runner: &mut Runner<S, V>,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    <B as Backend>::Error: std::fmt::Display,
    D: crate::event_loop::InputDriver,
    S: MediaStore,
    V: Voice,
{
    let size = terminal.size().map_err(|e| io::Error::other(e.to_string()))?;
    runner
        .shell_mut()
        .desktop_mut()
        .set_viewport(Viewport::new(size.width, size.height, CHROME_HEIGHT));
    runner.shell_mut().init();

    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.run(|_, event| {
        if let Some(event) = event {
            if runner.handle_event(&event) {
                return Ok(ControlFlow::Quit);
            }
        } else {
            let input = runner.input.clone();
            let shell = &runner.shell;
            let mut hits = HitRegions::default();
            terminal
                .draw(|frame| {
                    hits = ui::render(frame, shell, &input);
                })
                .map_err(|e| io::Error::other(e.to_string()))?;
            runner.hits = hits;
        }
        Ok(ControlFlow::Continue)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_loop::InputDriver;
    use crate::media::MemoryMediaStore;
    use crate::speech::RecordingVoice;
    use crate::window::AppKind;
    use crossterm::event::{KeyEvent, MouseEvent};
    use ratatui::backend::TestBackend;

    fn runner() -> Runner<MemoryMediaStore, RecordingVoice> {
        let mut shell = Shell::new(
            Viewport::new(120, 40, CHROME_HEIGHT),
            MemoryMediaStore::new(),
            RecordingVoice::default(),
        );
        shell.set_url_launcher(|_| {});
        Runner::new(shell)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    struct Scripted {
        events: Vec<Event>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(self.events.remove(0))
        }
    }

    #[test]
    fn run_shell_greets_draws_and_quits() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut driver = Scripted {
            events: vec![Event::Key(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::CONTROL,
            ))],
        };
        let mut runner = runner();
        run_shell(
            &mut terminal,
            &mut driver,
            &mut runner,
            Duration::from_millis(0),
        )
        .unwrap();
        assert_eq!(
            runner.shell().voice().spoken.first().unwrap(),
            "blueshell initialized. Welcome back."
        );
    }

    #[test]
    fn typed_transcript_dispatches_on_enter() {
        let mut runner = runner();
        for c in "open notepad".chars() {
            runner.handle_event(&press(KeyCode::Char(c)));
        }
        assert!(runner.shell().orb().listening());
        runner.handle_event(&press(KeyCode::Enter));
        assert_eq!(runner.shell().desktop().active_window_count(), 1);
        assert!(!runner.shell().orb().listening());
        assert!(runner.input().is_empty());
    }

    #[test]
    fn ctrl_q_quits() {
        let mut runner = runner();
        let quit = runner.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL,
        )));
        assert!(quit);
    }

    #[test]
    fn focus_lost_force_ends_drag() {
        let mut runner = runner();
        let id = runner.shell_mut().open_app(AppKind::Notepad);
        runner.shell_mut().begin_drag(id, Point::new(10, 10));
        assert!(runner.shell().desktop().drag_session().is_some());
        runner.handle_event(&Event::FocusLost);
        assert!(runner.shell().desktop().drag_session().is_none());
        assert!(runner.shell().desktop().embedded_interaction_enabled());
    }

    #[test]
    fn press_falls_back_to_live_geometry_when_regions_are_stale() {
        let mut runner = runner();
        // Notepad fills the work area; the browser sits inset within it.
        let notepad = runner.shell_mut().open_app(AppKind::Notepad);
        let browser = runner.shell_mut().open_app(AppKind::Browser);
        assert_eq!(runner.shell().desktop().focused(), Some(browser));
        let corner = runner.shell().desktop().window(notepad).unwrap().rect;
        assert!(!runner
            .shell()
            .desktop()
            .window(browser)
            .unwrap()
            .rect
            .contains(Point::new(corner.x, corner.y)));
        // No frame has rendered, so every hit-region list is empty.
        runner.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            corner.x as u16,
            corner.y as u16,
        ));
        assert_eq!(runner.shell().desktop().focused(), Some(notepad));
    }

    #[test]
    fn drag_and_release_moves_via_mouse_events() {
        let mut runner = runner();
        let id = runner.shell_mut().open_app(AppKind::Notepad);
        let start = runner.shell().desktop().window(id).unwrap().rect;
        // Seed hit regions the way a frame render would.
        runner.hits.bodies.push((
            id,
            Rect::new(start.x as u16, start.y as u16, start.width, start.height),
        ));
        runner
            .hits
            .title_bars
            .push((id, Rect::new(start.x as u16, start.y as u16, start.width, 1)));
        runner.handle_event(&mouse(
            MouseEventKind::Down(MouseButton::Left),
            start.x as u16 + 2,
            start.y as u16,
        ));
        runner.handle_event(&mouse(
            MouseEventKind::Drag(MouseButton::Left),
            start.x as u16 + 7,
            start.y as u16 + 3,
        ));
        runner.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 60, 20));
        let rect = runner.shell().desktop().window(id).unwrap().rect;
        assert_eq!(rect.x, start.x + 5);
        assert_eq!(rect.y, start.y + 3);
    }
}
