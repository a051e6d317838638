//! Flat transcript-to-action matcher.
//!
//! Transcripts arrive lowercase from the recognition layer (or the orb's
//! typed prompt). Matching is substring-based and ordered; the first hit
//! wins, mirroring the original command table.

use crate::media::MediaStore;
use crate::shell::Shell;
use crate::speech::Voice;
use crate::window::AppKind;

pub fn dispatch<S: MediaStore, V: Voice>(shell: &mut Shell<S, V>, cmd: &str) {
    let cmd = cmd.to_lowercase();
    tracing::debug!(%cmd, "dispatching transcript");

    if contains_any(&cmd, &["open google", "open search", "open browser"]) {
        shell.open_app(AppKind::Browser);
        shell.speak("Opening Google Search");
    } else if cmd.contains("open terminal") {
        shell.open_app(AppKind::Terminal);
        shell.speak("Opening Terminal");
    } else if cmd.contains("open youtube") {
        shell.open_external("https://www.youtube.com/");
        shell.speak("Opening youtube");
    } else if contains_any(&cmd, &["open notes", "open notepad"]) {
        shell.open_app(AppKind::Notepad);
        shell.speak("Opening Notepad");
    } else if cmd.contains("open calculator") {
        shell.open_app(AppKind::Calculator);
        shell.speak("Opening Calculator");
    } else if contains_any(&cmd, &["open photos", "open photo"]) {
        shell.open_app(AppKind::Photos);
        shell.speak("Opening Photos");
    } else if contains_any(&cmd, &["open app studio", "app studio"]) {
        shell.open_app(AppKind::AppStudio);
        shell.speak("Opening App Studio");
    } else if cmd.contains("open settings") {
        shell.open_app(AppKind::Settings);
        shell.speak("Opening Settings");
    } else if contains_any(&cmd, &["change wallpaper", "wallpaper"]) {
        shell.open_app(AppKind::Photos);
        shell.speak("Opening Photos to change wallpaper");
    } else if contains_any(&cmd, &["close all", "close windows"]) {
        shell.close_all_windows();
        shell.speak("All windows closed");
    } else if cmd.contains("save note") {
        let text = cmd.replace("save note", "").trim().to_string();
        shell.save_note(&text);
        shell.speak("Note saved");
    } else if contains_any(&cmd, &["what time", "time"]) {
        let now = chrono::Local::now().format("%H:%M:%S");
        shell.speak(&format!("The current time is {now}"));
    } else if contains_any(&cmd, &["shutdown", "shut down"]) {
        shell.request_shutdown();
    } else if contains_any(&cmd, &["hello", "hi"]) {
        shell.speak("Hello! How can I help you today?");
    } else if cmd.contains("search for") {
        let query = cmd.replace("search for", "").trim().to_string();
        shell.open_search(&query);
        shell.speak(&format!("Searching for {query}"));
    } else {
        shell.speak(&format!("I heard: {cmd}."));
    }
}

fn contains_any(cmd: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| cmd.contains(needle))
}
