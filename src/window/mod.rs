pub mod drag;
pub mod stack;
mod window_manager;

use ratatui::prelude::Rect;

pub use drag::{DragController, DragSession, SnapHalf, SnapPreview};
pub use stack::StackManager;
pub use window_manager::{Desktop, DesktopEvent};

/// Signed window rectangle: signed origin with unsigned size.
///
/// Positions may go negative or past the viewport while a window is being
/// dragged off-screen; that placement is accepted, never corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl WinRect {
    pub fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clips to `bounds` for rendering into a terminal buffer.
    pub fn visible(&self, bounds: Rect) -> Rect {
        let bx = bounds.x as i32;
        let by = bounds.y as i32;
        let x0 = self.x.max(bx);
        let y0 = self.y.max(by);
        let x1 = (self.x + self.width as i32).min(bx + bounds.width as i32);
        let y1 = (self.y + self.height as i32).min(by + bounds.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x < self.x + self.width as i32
            && p.y >= self.y
            && p.y < self.y + self.height as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The drawable desktop surface, in abstract layout units.
///
/// `chrome_height` is the fixed bottom chrome (taskbar + orb strip); the
/// work area excludes it, so maximized and snapped windows never cover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub chrome_height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16, chrome_height: u16) -> Self {
        Self {
            width,
            height,
            chrome_height,
        }
    }

    pub fn available_height(&self) -> u16 {
        self.height.saturating_sub(self.chrome_height)
    }

    pub fn work_area(&self) -> WinRect {
        WinRect::new(0, 0, self.width, self.available_height())
    }

    pub fn left_half(&self) -> WinRect {
        WinRect::new(0, 0, self.width / 2, self.available_height())
    }

    pub fn right_half(&self) -> WinRect {
        let half = self.width / 2;
        WinRect::new(
            half as i32,
            0,
            self.width.saturating_sub(half),
            self.available_height(),
        )
    }
}

/// Closed set of application kinds the shell can open.
///
/// Each kind carries its default-geometry policy as data rather than a
/// string-keyed lookup; `Custom` carries the stored app's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppKind {
    Browser,
    Notepad,
    Terminal,
    Calculator,
    Settings,
    Photos,
    AppStudio,
    Custom(String),
}

impl AppKind {
    /// Initial placement for a freshly opened window of this kind.
    ///
    /// The browser gets a larger viewport-relative box; photos and the app
    /// studio have their own fixed footprints; everything else is a fixed
    /// box centered on the work area. Sizes never exceed the work area.
    pub fn default_rect(&self, viewport: Viewport) -> WinRect {
        let work = viewport.work_area();
        match self {
            AppKind::Browser => WinRect::new(
                (work.width as i32) * 20 / 100,
                (work.height as i32) * 20 / 100,
                (work.width as u32 * 60 / 100) as u16,
                (work.height as u32 * 60 / 100) as u16,
            ),
            AppKind::Photos => centered(work, 700, 500),
            AppKind::AppStudio => centered(work, 600, 550),
            AppKind::Custom(_) => WinRect::new(
                100.min(work.width as i32 / 8),
                100.min(work.height as i32 / 8),
                600.min(work.width),
                500.min(work.height),
            ),
            _ => centered(work, 500, 400),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            AppKind::Browser => "Google Search",
            AppKind::Notepad => "Notepad",
            AppKind::Terminal => "Terminal",
            AppKind::Calculator => "Calculator",
            AppKind::Settings => "Settings",
            AppKind::Photos => "Photos",
            AppKind::AppStudio => "App Studio",
            AppKind::Custom(name) => name,
        }
    }
}

fn centered(work: WinRect, width: u16, height: u16) -> WinRect {
    let width = width.min(work.width);
    let height = height.min(work.height);
    WinRect::new(
        (work.width as i32 - width as i32) / 2,
        (work.height as i32 - height as i32) / 2,
        width,
        height,
    )
}

/// Opaque window identity. Monotonic within a desktop session; unique even
/// for windows opened back-to-back in the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    Minimized,
    Maximized,
    SnappedLeft,
    SnappedRight,
}

#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: AppKind,
    pub rect: WinRect,
    /// Geometry snapshot taken just before a maximize or snap transition,
    /// restored on toggle or when a drag un-maximizes the window.
    pub saved_rect: Option<WinRect>,
    /// Paint/interaction order; higher draws on top. Never reused.
    pub stack_index: u64,
    pub visual: VisualState,
    pub focused: bool,
}

impl WindowRecord {
    pub fn title(&self) -> &str {
        self.kind.title()
    }

    pub fn is_minimized(&self) -> bool {
        self.visual == VisualState::Minimized
    }
}
