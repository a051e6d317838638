use blueshell::apps::CustomApp;
use blueshell::dispatch::dispatch;
use blueshell::media::{FsMediaStore, MediaKind, MediaRecord, MediaStore, WallpaperPref};
use blueshell::shell::Shell;
use blueshell::speech::RecordingVoice;
use blueshell::window::{AppKind, Viewport};

fn record(id: u64, name: &str, kind: MediaKind) -> MediaRecord {
    MediaRecord {
        id,
        name: name.to_string(),
        kind,
        data: vec![0u8; 64],
        thumbnail: Some(vec![1u8; 8]),
    }
}

#[test]
fn fs_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = FsMediaStore::open(dir.path()).unwrap();
        store.put(record(10, "dunes.png", MediaKind::Image)).unwrap();
        store.put(record(20, "surf.mp4", MediaKind::Video)).unwrap();
        store
            .save_wallpaper_pref(WallpaperPref {
                media_id: 10,
                kind: MediaKind::Image,
            })
            .unwrap();
        store.delete(20).unwrap();
    }
    let store = FsMediaStore::open(dir.path()).unwrap();
    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "dunes.png");
    assert_eq!(all[0].data.len(), 64);
    assert_eq!(store.load_wallpaper_pref().unwrap().unwrap().media_id, 10);
    assert!(store.get(20).unwrap().is_none());
}

#[test]
fn session_state_rehydrates_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let viewport = Viewport::new(1280, 800, 85);
    {
        let store = FsMediaStore::open(dir.path()).unwrap();
        let mut shell = Shell::new(viewport, store, RecordingVoice::default());
        shell.save_note("buy more ram");
        shell.save_custom_app(CustomApp {
            name: "rocket".into(),
            icon: "★".into(),
            body: "liftoff".into(),
        });
        shell.upload_media(record(99, "sky.png", MediaKind::Image));
        shell.set_wallpaper_from_store(99);
    }
    let store = FsMediaStore::open(dir.path()).unwrap();
    let shell = Shell::new(viewport, store, RecordingVoice::default());
    assert_eq!(shell.note(), "buy more ram");
    assert_eq!(shell.custom_apps().len(), 1);
    assert_eq!(shell.gallery().len(), 1);
    assert_eq!(shell.wallpaper().unwrap().media_id, 99);
}

#[test]
fn voice_flow_from_greeting_to_empty_desktop() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsMediaStore::open(dir.path()).unwrap();
    let mut shell = Shell::new(Viewport::new(1280, 800, 85), store, RecordingVoice::default());
    shell.init();
    dispatch(&mut shell, "open google");
    dispatch(&mut shell, "open photos");
    assert_eq!(shell.desktop().active_window_count(), 2);
    assert!(shell.desktop().find_by_kind(&AppKind::Browser).is_some());
    dispatch(&mut shell, "close all");
    assert_eq!(shell.desktop().active_window_count(), 0);
    let spoken = &shell.voice().spoken;
    assert_eq!(spoken[0], "blueshell initialized. Welcome back.");
    assert_eq!(spoken.last().unwrap(), "All windows closed");
}

#[test]
fn deleting_wallpaper_media_keeps_pref_but_empties_gallery() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsMediaStore::open(dir.path()).unwrap();
    let mut shell = Shell::new(Viewport::new(1280, 800, 85), store, RecordingVoice::default());
    shell.upload_media(record(7, "sky.png", MediaKind::Image));
    shell.set_wallpaper_from_store(7);
    shell.delete_media(7);
    assert!(shell.gallery().is_empty());
    // preference is only rewritten when a new wallpaper is chosen
    assert_eq!(shell.wallpaper().unwrap().media_id, 7);
}
