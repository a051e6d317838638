//! Shared crate-wide constants.

/// Width (in layout units) of the left/right screen-edge zones that arm a
/// half-screen snap while a window is being dragged.
///
/// Matches the pixel metaphor of the desktop; terminal front-ends override
/// it with [`TERMINAL_SNAP_EDGE_THRESHOLD`] because 30 cells would swallow
/// a third of a typical 80-column viewport.
pub const SNAP_EDGE_THRESHOLD: u16 = 30;

/// Cell-scale snap zone used when the desktop is driven by terminal mouse
/// events.
pub const TERMINAL_SNAP_EDGE_THRESHOLD: u16 = 3;

/// Rows reserved at the bottom of the terminal for the taskbar and the
/// assistant orb strip. The work area, maximized windows, and the snap
/// preview all stop above this chrome.
pub const CHROME_HEIGHT: u16 = 2;

/// Height in rows of a window's title bar, the grab surface for drags.
pub const TITLE_BAR_HEIGHT: u16 = 1;
