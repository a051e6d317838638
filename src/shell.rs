//! The desktop session aggregate: window manager, voice, media store,
//! custom apps, note, wallpaper, and the assistant orb.
//!
//! One `Shell` is constructed per session and passed by reference to the
//! runner and dispatcher; there is no ambient global state.

use std::collections::BTreeMap;

use crate::apps::{AppContent, ContentContext, CustomApp, content_for};
use crate::media::{MediaRecord, MediaStore, WallpaperPref};
use crate::speech::Voice;
use crate::state::OrbState;
use crate::window::{AppKind, Desktop, DesktopEvent, Point, Viewport, WindowId};

const NOTE_KEY: &str = "note";
const CUSTOM_APPS_KEY: &str = "custom_apps";

pub struct Shell<S: MediaStore, V: Voice> {
    desktop: Desktop,
    voice: V,
    store: S,
    orb: OrbState,
    custom_apps: Vec<CustomApp>,
    note: String,
    wallpaper: Option<WallpaperPref>,
    gallery: Vec<MediaRecord>,
    browser_queries: BTreeMap<WindowId, String>,
    launch_url: Box<dyn FnMut(&str)>,
    shutdown_requested: bool,
}

/// Default launcher: hands the URL to the system browser.
fn system_url_launcher(url: &str) {
    if let Err(err) = webbrowser::open(url) {
        tracing::warn!(%err, %url, "external browser launch failed");
    }
}

impl<S: MediaStore, V: Voice> Shell<S, V> {
    /// Builds the session and hydrates persisted state (note, custom apps,
    /// wallpaper preference, gallery). Store failures are survivable: the
    /// shell starts from defaults and logs the cause.
    pub fn new(viewport: Viewport, store: S, voice: V) -> Self {
        let mut shell = Self {
            desktop: Desktop::new(viewport),
            voice,
            store,
            orb: OrbState::new(),
            custom_apps: Vec::new(),
            note: String::new(),
            wallpaper: None,
            gallery: Vec::new(),
            browser_queries: BTreeMap::new(),
            launch_url: Box::new(system_url_launcher),
            shutdown_requested: false,
        };
        shell.hydrate();
        shell
    }

    fn hydrate(&mut self) {
        match self.store.load_config::<String>(NOTE_KEY) {
            Ok(Some(note)) => self.note = note,
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "note load failed"),
        }
        match self.store.load_config::<Vec<CustomApp>>(CUSTOM_APPS_KEY) {
            Ok(Some(apps)) => self.custom_apps = apps,
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "custom app load failed"),
        }
        match self.store.load_wallpaper_pref() {
            Ok(pref) => self.wallpaper = pref,
            Err(err) => tracing::warn!(%err, "wallpaper preference load failed"),
        }
        self.refresh_gallery();
    }

    pub fn init(&mut self) {
        self.speak("blueshell initialized. Welcome back.");
    }

    /// Speaks through the provider and mirrors the utterance on the orb.
    pub fn speak(&mut self, text: &str) {
        self.voice.speak(text);
        self.orb.set_status(text);
    }

    // --- window management -------------------------------------------------

    pub fn open_app(&mut self, kind: AppKind) -> WindowId {
        let id = self.desktop.open_window(kind);
        self.pump_desktop_events();
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.browser_queries.remove(&id);
        self.desktop.close_window(id);
        self.pump_desktop_events();
    }

    pub fn close_all_windows(&mut self) {
        self.browser_queries.clear();
        self.desktop.close_all();
        self.pump_desktop_events();
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        self.desktop.minimize_window(id);
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        self.desktop.toggle_maximize(id);
    }

    pub fn focus_window(&mut self, id: WindowId) {
        self.desktop.focus_window(id);
    }

    pub fn begin_drag(&mut self, id: WindowId, pointer: Point) {
        self.desktop.begin_drag(id, pointer);
    }

    pub fn update_drag(&mut self, pointer: Point) {
        self.desktop.update_drag(pointer);
    }

    pub fn end_drag(&mut self) {
        self.desktop.end_drag();
    }

    pub fn force_end_drag(&mut self) {
        self.desktop.force_end_drag();
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    pub fn orb(&self) -> &OrbState {
        &self.orb
    }

    pub fn orb_mut(&mut self) -> &mut OrbState {
        &mut self.orb
    }

    fn pump_desktop_events(&mut self) {
        for event in self.desktop.take_events() {
            match event {
                DesktopEvent::BecameNonEmpty => self.orb.dock(),
                DesktopEvent::BecameEmpty => self.orb.undock(),
            }
        }
    }

    // --- browser -----------------------------------------------------------

    /// Opens a browser window pre-seeded with `query` and launches the
    /// external search, like the original's "search for" voice flow.
    pub fn open_search(&mut self, query: &str) -> WindowId {
        let id = self.open_app(AppKind::Browser);
        self.browser_queries.insert(id, query.to_string());
        let encoded = query.trim().replace(' ', "+");
        let url = format!("https://www.google.com/search?q={encoded}");
        (self.launch_url)(&url);
        id
    }

    pub fn open_external(&mut self, url: &str) {
        (self.launch_url)(url);
    }

    /// Replaces the external URL launcher; tests record instead of
    /// spawning a real browser.
    pub fn set_url_launcher<F: FnMut(&str) + 'static>(&mut self, launcher: F) {
        self.launch_url = Box::new(launcher);
    }

    // --- notepad -----------------------------------------------------------

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn save_note(&mut self, text: &str) {
        self.note = text.to_string();
        if let Err(err) = self.store.save_config(NOTE_KEY, &self.note) {
            tracing::warn!(%err, "note save failed");
        }
        self.refresh_app(AppKind::Notepad);
    }

    // --- custom apps (App Studio) ------------------------------------------

    pub fn custom_apps(&self) -> &[CustomApp] {
        &self.custom_apps
    }

    pub fn save_custom_app(&mut self, app: CustomApp) {
        if app.name.trim().is_empty() || app.body.trim().is_empty() {
            self.speak("Missing details");
            return;
        }
        let name = app.name.clone();
        self.custom_apps.push(app);
        self.persist_custom_apps();
        self.speak(&format!("App {name} saved"));
        self.refresh_app(AppKind::AppStudio);
    }

    pub fn delete_custom_app(&mut self, index: usize) {
        if index >= self.custom_apps.len() {
            return;
        }
        self.custom_apps.remove(index);
        self.persist_custom_apps();
        self.speak("App deleted");
        self.refresh_app(AppKind::AppStudio);
    }

    pub fn launch_custom_app(&mut self, index: usize) {
        let Some(app) = self.custom_apps.get(index) else {
            return;
        };
        let name = app.name.clone();
        self.open_app(AppKind::Custom(name.clone()));
        self.speak(&format!("Launching {name}"));
    }

    fn persist_custom_apps(&mut self) {
        if let Err(err) = self.store.save_config(CUSTOM_APPS_KEY, &self.custom_apps) {
            tracing::warn!(%err, "custom app save failed");
        }
    }

    // --- photos / wallpaper ------------------------------------------------

    pub fn gallery(&self) -> &[MediaRecord] {
        &self.gallery
    }

    pub fn wallpaper(&self) -> Option<WallpaperPref> {
        self.wallpaper
    }

    pub fn upload_media(&mut self, record: MediaRecord) {
        let spoken = match record.kind {
            crate::media::MediaKind::Video => "Large video uploaded.",
            crate::media::MediaKind::Image => "Photo uploaded.",
        };
        match self.store.put(record) {
            Ok(()) => {
                self.speak(spoken);
                self.refresh_gallery();
                self.refresh_app(AppKind::Photos);
            }
            Err(err) => {
                tracing::warn!(%err, "media put failed");
                self.speak("Storage Error: File might be too massive even for the store.");
            }
        }
    }

    pub fn set_wallpaper_from_store(&mut self, id: u64) {
        match self.store.get(id) {
            Ok(Some(record)) => {
                let pref = WallpaperPref {
                    media_id: record.id,
                    kind: record.kind,
                };
                self.wallpaper = Some(pref);
                if let Err(err) = self.store.save_wallpaper_pref(pref) {
                    tracing::warn!(%err, "wallpaper preference save failed");
                }
                self.refresh_app(AppKind::Photos);
                self.speak("Wallpaper updated");
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "wallpaper lookup failed"),
        }
    }

    pub fn delete_media(&mut self, id: u64) {
        if let Err(err) = self.store.delete(id) {
            tracing::warn!(%err, "media delete failed");
            return;
        }
        self.speak("Deleted.");
        self.refresh_gallery();
        self.refresh_app(AppKind::Photos);
    }

    fn refresh_gallery(&mut self) {
        match self.store.get_all() {
            Ok(records) => self.gallery = records,
            Err(err) => tracing::warn!(%err, "gallery load failed"),
        }
    }

    /// Closes and re-opens the top-most window of `kind` so its template is
    /// regenerated (the original rebuilt the DOM node).
    fn refresh_app(&mut self, kind: AppKind) {
        if let Some(id) = self.desktop.find_by_kind(&kind) {
            self.close_window(id);
            self.open_app(kind);
        }
    }

    // --- content -----------------------------------------------------------

    pub fn window_content(&self, id: WindowId) -> Option<AppContent> {
        let record = self.desktop.window(id)?;
        let ctx = ContentContext {
            note: &self.note,
            custom_apps: &self.custom_apps,
            gallery: &self.gallery,
            wallpaper: self.wallpaper,
            browser_query: self.browser_queries.get(&id).map(String::as_str),
        };
        Some(content_for(&record.kind, ctx))
    }

    // --- lifecycle ---------------------------------------------------------

    pub fn request_shutdown(&mut self) {
        self.speak("Shutting down blueshell.");
        self.shutdown_requested = true;
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }
}
