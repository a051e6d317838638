//! Static per-application content templates.
//!
//! Presentation only: each open window's body is a block of text generated
//! from the shell's data (note, gallery, custom apps). No behavior lives
//! here; clicks and commands are routed by the runner and dispatcher.

use indoc::{formatdoc, indoc};
use serde::{Deserialize, Serialize};

use crate::media::{MediaKind, MediaRecord, WallpaperPref};
use crate::window::AppKind;

/// A user-authored app saved through the App Studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomApp {
    pub name: String,
    pub icon: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct AppContent {
    pub title: String,
    pub icon: &'static str,
    pub body: String,
}

/// Shell data the templates render from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentContext<'a> {
    pub note: &'a str,
    pub custom_apps: &'a [CustomApp],
    pub gallery: &'a [MediaRecord],
    pub wallpaper: Option<WallpaperPref>,
    pub browser_query: Option<&'a str>,
}

pub fn content_for(kind: &AppKind, ctx: ContentContext<'_>) -> AppContent {
    match kind {
        AppKind::Browser => AppContent {
            title: kind.title().to_string(),
            icon: "◉",
            body: formatdoc! {"

                        G o o g l e

                [ {query} ]

                Type `search for <query>` at the orb to search.
                ",
                query = ctx.browser_query.unwrap_or("Search Google or type a URL..."),
            },
        },
        AppKind::Notepad => AppContent {
            title: kind.title().to_string(),
            icon: "✎",
            body: if ctx.note.is_empty() {
                "Start typing...".to_string()
            } else {
                ctx.note.to_string()
            },
        },
        AppKind::Terminal => AppContent {
            title: kind.title().to_string(),
            icon: ">_",
            body: terminal_body(),
        },
        AppKind::Calculator => AppContent {
            title: kind.title().to_string(),
            icon: "∑",
            // The original embedded a third-party calculator surface; its
            // pointer interaction is suspended during drags.
            body: indoc! {"
                [ embedded scientific calculator ]

                Pointer interaction is disabled while a window drag
                is in progress.
                "}
            .to_string(),
        },
        AppKind::Settings => AppContent {
            title: kind.title().to_string(),
            icon: "⚙",
            body: indoc! {"
                Shell Settings

                Voice commands:
                  • \"open google\"        - opens browser
                  • \"open photos\"        - opens gallery
                  • \"search for <query>\" - web search
                  • \"close all windows\"  - clean desktop
                "}
            .to_string(),
        },
        AppKind::Photos => AppContent {
            title: kind.title().to_string(),
            icon: "🖼",
            body: photos_body(ctx),
        },
        AppKind::AppStudio => AppContent {
            title: kind.title().to_string(),
            icon: "{}",
            body: app_studio_body(ctx.custom_apps),
        },
        AppKind::Custom(name) => {
            let app = ctx.custom_apps.iter().find(|app| &app.name == name);
            AppContent {
                title: name.clone(),
                icon: "★",
                body: app.map(|app| app.body.clone()).unwrap_or_default(),
            }
        }
    }
}

fn terminal_body() -> String {
    let host = hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "blueshell".to_string());
    let user = std::env::var("USER").unwrap_or_else(|_| "user".to_string());
    formatdoc! {"
        {user}@{host}:~$ system status
        ✓ System: ONLINE
        ✓ AI Core: ACTIVE
        ✓ Storage: HIGH CAPACITY (blob store)
        {user}@{host}:~$ _
        "}
}

fn photos_body(ctx: ContentContext<'_>) -> String {
    let mut body = String::from("Gallery (blob storage)\n\n");
    if ctx.gallery.is_empty() {
        body.push_str("No photos or videos yet.\n");
        return body;
    }
    for record in ctx.gallery {
        let marker = match record.kind {
            MediaKind::Video => "▶",
            MediaKind::Image => "·",
        };
        let active = ctx
            .wallpaper
            .is_some_and(|pref| pref.media_id == record.id);
        let suffix = if active { "  [wallpaper]" } else { "" };
        body.push_str(&format!("  {marker} {}{suffix}\n", record.name));
    }
    body
}

fn app_studio_body(custom_apps: &[CustomApp]) -> String {
    let mut body = indoc! {"
        App Studio

        Saved apps:
        "}
    .to_string();
    if custom_apps.is_empty() {
        body.push_str("  No apps yet.\n");
    }
    for app in custom_apps {
        body.push_str(&format!("  {} {}\n", app.icon, app.name));
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notepad_shows_saved_note() {
        let ctx = ContentContext {
            note: "remember the milk",
            ..Default::default()
        };
        let content = content_for(&AppKind::Notepad, ctx);
        assert_eq!(content.body, "remember the milk");
        let empty = content_for(&AppKind::Notepad, ContentContext::default());
        assert_eq!(empty.body, "Start typing...");
    }

    #[test]
    fn photos_marks_current_wallpaper() {
        let gallery = vec![MediaRecord {
            id: 42,
            name: "dunes.png".into(),
            kind: MediaKind::Image,
            data: Vec::new(),
            thumbnail: None,
        }];
        let ctx = ContentContext {
            gallery: &gallery,
            wallpaper: Some(WallpaperPref {
                media_id: 42,
                kind: MediaKind::Image,
            }),
            ..Default::default()
        };
        let content = content_for(&AppKind::Photos, ctx);
        assert!(content.body.contains("dunes.png"));
        assert!(content.body.contains("[wallpaper]"));
    }

    #[test]
    fn custom_kind_resolves_stored_body() {
        let apps = vec![CustomApp {
            name: "rocket".into(),
            icon: "★".into(),
            body: "liftoff".into(),
        }];
        let ctx = ContentContext {
            custom_apps: &apps,
            ..Default::default()
        };
        let content = content_for(&AppKind::Custom("rocket".into()), ctx);
        assert_eq!(content.title, "rocket");
        assert_eq!(content.body, "liftoff");
    }

    #[test]
    fn browser_seeds_query() {
        let ctx = ContentContext {
            browser_query: Some("rust window manager"),
            ..Default::default()
        };
        let content = content_for(&AppKind::Browser, ctx);
        assert!(content.body.contains("rust window manager"));
    }
}
