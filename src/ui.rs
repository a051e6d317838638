//! Desktop painting: wallpaper layer, windows in ascending stack order,
//! snap preview overlay, taskbar chrome, and the assistant orb.
//!
//! Rendering also produces the frame's [`HitRegions`] so the runner can map
//! pointer events back onto windows and controls without re-deriving
//! layout. Every draw is clipped to the visible frame; window rectangles
//! may extend past any edge.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::constants::{CHROME_HEIGHT, TITLE_BAR_HEIGHT};
use crate::media::MediaStore;
use crate::shell::Shell;
use crate::speech::Voice;
use crate::state::OrbPlacement;
use crate::theme;
use crate::window::WindowId;

const CONTROLS: &str = "[-][□][×]";
const CONTROL_WIDTH: u16 = 3;

/// Pointer targets produced while painting one frame, in paint order.
#[derive(Debug, Default)]
pub struct HitRegions {
    pub title_bars: Vec<(WindowId, Rect)>,
    pub min_buttons: Vec<(WindowId, Rect)>,
    pub max_buttons: Vec<(WindowId, Rect)>,
    pub close_buttons: Vec<(WindowId, Rect)>,
    pub bodies: Vec<(WindowId, Rect)>,
    pub taskbar_items: Vec<(WindowId, Rect)>,
}

impl HitRegions {
    /// Topmost hit wins: regions were pushed bottom-to-top.
    pub fn hit(list: &[(WindowId, Rect)], x: u16, y: u16) -> Option<WindowId> {
        list.iter()
            .rev()
            .find(|(_, rect)| rect_contains(*rect, x, y))
            .map(|(id, _)| *id)
    }
}

pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

fn clip(rect: Rect, bounds: Rect) -> Option<Rect> {
    let clipped = rect.intersection(bounds);
    (clipped.width > 0 && clipped.height > 0).then_some(clipped)
}

pub fn render<S: MediaStore, V: Voice>(
    frame: &mut Frame,
    shell: &Shell<S, V>,
    input: &str,
) -> HitRegions {
    let area = frame.area();
    let mut hits = HitRegions::default();

    render_wallpaper(frame, shell, area);

    let work_bounds = Rect {
        height: area.height.saturating_sub(CHROME_HEIGHT),
        ..area
    };

    for id in shell.desktop().draw_order() {
        render_window(frame, shell, id, work_bounds, &mut hits);
    }

    render_snap_preview(frame, shell, work_bounds);
    render_chrome(frame, shell, input, area, &mut hits);
    render_centered_orb(frame, shell, area);

    hits
}

fn render_wallpaper<S: MediaStore, V: Voice>(frame: &mut Frame, shell: &Shell<S, V>, area: Rect) {
    let fill = if shell.wallpaper().is_some() { "░" } else { " " };
    let line = fill.repeat(area.width as usize);
    let lines: Vec<Line> = (0..area.height).map(|_| Line::from(line.clone())).collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme::desktop_bg()).fg(theme::neon())),
        area,
    );
}

fn render_window<S: MediaStore, V: Voice>(
    frame: &mut Frame,
    shell: &Shell<S, V>,
    id: WindowId,
    bounds: Rect,
    hits: &mut HitRegions,
) {
    let Some(record) = shell.desktop().window(id) else {
        return;
    };
    let Some(visible) = clip_signed(record, bounds) else {
        return;
    };

    frame.render_widget(Clear, visible);
    frame.render_widget(
        Block::new().style(Style::default().bg(theme::window_bg()).fg(theme::window_fg())),
        visible,
    );

    // Title bar only paints when the window's top row is on screen.
    let top_visible = record.rect.y >= bounds.y as i32;
    if top_visible && visible.height >= TITLE_BAR_HEIGHT {
        let title_row = Rect {
            height: TITLE_BAR_HEIGHT,
            ..visible
        };
        let (bg, fg) = if record.focused {
            (theme::title_active_bg(), theme::title_active_fg())
        } else {
            (theme::title_inactive_bg(), theme::title_inactive_fg())
        };
        let style = Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD);
        let content = shell.window_content(id);
        let icon = content.as_ref().map(|c| c.icon).unwrap_or("·");
        frame.render_widget(
            Paragraph::new(format!(" {icon} {}", record.title())).style(style),
            title_row,
        );

        let controls_width = CONTROL_WIDTH * 3;
        if title_row.width > controls_width {
            let controls_x = title_row.x + title_row.width - controls_width;
            let controls = Rect {
                x: controls_x,
                y: title_row.y,
                width: controls_width,
                height: TITLE_BAR_HEIGHT,
            };
            frame.render_widget(Paragraph::new(CONTROLS).style(style), controls);
            let button = |slot: u16| Rect {
                x: controls_x + slot * CONTROL_WIDTH,
                y: title_row.y,
                width: CONTROL_WIDTH,
                height: TITLE_BAR_HEIGHT,
            };
            hits.min_buttons.push((id, button(0)));
            hits.max_buttons.push((id, button(1)));
            hits.close_buttons.push((id, button(2)));
            hits.title_bars.push((
                id,
                Rect {
                    width: title_row.width - controls_width,
                    ..title_row
                },
            ));
        } else {
            hits.title_bars.push((id, title_row));
        }
    }

    if let Some(content) = shell.window_content(id) {
        let body_y = if top_visible {
            visible.y + TITLE_BAR_HEIGHT
        } else {
            visible.y
        };
        let body = Rect {
            y: body_y,
            height: visible.height.saturating_sub(body_y - visible.y),
            ..visible
        };
        if body.height > 0 {
            frame.render_widget(
                Paragraph::new(content.body)
                    .style(Style::default().bg(theme::window_bg()).fg(theme::window_fg())),
                body,
            );
        }
    }

    hits.bodies.push((id, visible));
}

fn clip_signed(record: &crate::window::WindowRecord, bounds: Rect) -> Option<Rect> {
    let visible = record.rect.visible(bounds);
    (visible.width > 0 && visible.height > 0).then_some(visible)
}

fn render_snap_preview<S: MediaStore, V: Voice>(
    frame: &mut Frame,
    shell: &Shell<S, V>,
    bounds: Rect,
) {
    let Some(rect) = shell.desktop().snap_preview().rect() else {
        return;
    };
    let Some(preview) = clip(rect.visible(bounds), bounds) else {
        return;
    };
    frame.render_widget(Clear, preview);
    frame.render_widget(
        Block::new().style(Style::default().bg(theme::snap_preview_bg()).fg(theme::neon())),
        preview,
    );
}

fn render_chrome<S: MediaStore, V: Voice>(
    frame: &mut Frame,
    shell: &Shell<S, V>,
    input: &str,
    area: Rect,
    hits: &mut HitRegions,
) {
    if area.height < CHROME_HEIGHT {
        return;
    }
    let taskbar = Rect {
        x: area.x,
        y: area.y + area.height - CHROME_HEIGHT,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Block::new().style(Style::default().bg(theme::taskbar_bg()).fg(theme::taskbar_fg())),
        taskbar,
    );

    // Minimized windows reappear as taskbar buttons.
    let mut x = taskbar.x + 1;
    for id in shell.desktop().minimized_windows() {
        let Some(record) = shell.desktop().window(id) else {
            continue;
        };
        let label = format!("[{}]", record.title());
        let width =
            (label.chars().count() as u16).min((taskbar.x + taskbar.width).saturating_sub(x));
        if width == 0 {
            break;
        }
        let item = Rect {
            x,
            y: taskbar.y,
            width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(label).style(Style::default().bg(theme::taskbar_bg()).fg(theme::neon())),
            item,
        );
        hits.taskbar_items.push((id, item));
        x = x.saturating_add(width + 1);
    }

    // Clock, right-aligned in the chrome like the original system tray.
    let clock = chrono::Local::now().format("%H:%M").to_string();
    let clock_width = clock.len() as u16;
    if taskbar.width > clock_width + 1 {
        frame.render_widget(
            Paragraph::new(clock).style(Style::default().bg(theme::taskbar_bg()).fg(theme::neon())),
            Rect {
                x: taskbar.x + taskbar.width - clock_width - 1,
                y: taskbar.y,
                width: clock_width,
                height: 1,
            },
        );
    }

    // Orb strip: status + typed-command prompt.
    let orb_row = Rect {
        x: area.x,
        y: taskbar.y + 1,
        width: area.width,
        height: 1,
    };
    let orb_fg = if shell.orb().listening() {
        theme::orb_listening()
    } else {
        theme::neon()
    };
    frame.render_widget(
        Paragraph::new(format!("● {}  > {input}", shell.orb().status_text()))
            .style(Style::default().bg(theme::taskbar_bg()).fg(orb_fg)),
        orb_row,
    );
}

fn render_centered_orb<S: MediaStore, V: Voice>(frame: &mut Frame, shell: &Shell<S, V>, area: Rect) {
    if shell.orb().placement() != OrbPlacement::Centered {
        return;
    }
    let width = 40.min(area.width);
    let height = 3.min(area.height);
    let card = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, card);
    frame.render_widget(
        Paragraph::new(shell.orb().status_text().to_string())
            .block(Block::bordered().title(" ● "))
            .style(Style::default().bg(theme::desktop_bg()).fg(theme::neon())),
        card,
    );
}
