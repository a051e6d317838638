use ratatui::style::Color;

// Centralized theme colors. The shell leans on a neon-on-dark palette;
// keep these as small helpers so widgets never hardcode RGB.

pub const NEON_RGB: (u8, u8, u8) = (0, 243, 255);
pub const NEON_ALT_RGB: (u8, u8, u8) = (255, 0, 255);

pub fn neon() -> Color {
    let (r, g, b) = NEON_RGB;
    Color::Rgb(r, g, b)
}

pub fn neon_alt() -> Color {
    let (r, g, b) = NEON_ALT_RGB;
    Color::Rgb(r, g, b)
}

pub fn desktop_bg() -> Color {
    Color::Rgb(6, 10, 24)
}

pub fn window_bg() -> Color {
    Color::Rgb(16, 22, 40)
}

pub fn window_fg() -> Color {
    Color::White
}

pub fn title_active_bg() -> Color {
    neon()
}

pub fn title_active_fg() -> Color {
    Color::Black
}

pub fn title_inactive_bg() -> Color {
    Color::DarkGray
}

pub fn title_inactive_fg() -> Color {
    Color::Gray
}

pub fn snap_preview_bg() -> Color {
    Color::Rgb(0, 80, 90)
}

pub fn taskbar_bg() -> Color {
    Color::Rgb(10, 14, 30)
}

pub fn taskbar_fg() -> Color {
    Color::Gray
}

pub fn orb_listening() -> Color {
    neon_alt()
}
