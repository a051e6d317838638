//! High-capacity media storage for wallpapers and photos, plus the small
//! key-value config side table (wallpaper preference, note, custom apps).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

pub type MediaResult<T> = Result<T, MediaStoreError>;

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("media store io failure: {0}")]
    Io(#[from] io::Error),
    #[error("media record is not valid json: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One stored blob. `data` holds the raw payload (the original kept data
/// URLs; here it is the file bytes); `thumbnail` is an optional reduced
/// rendition for gallery views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: u64,
    pub name: String,
    pub kind: MediaKind,
    pub data: Vec<u8>,
    pub thumbnail: Option<Vec<u8>>,
}

impl MediaRecord {
    /// Millisecond timestamp id, matching the original's `Date.now()` keys.
    pub fn fresh_id() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Wallpaper preference persisted across sessions: which media record is
/// the current wallpaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperPref {
    pub media_id: u64,
    pub kind: MediaKind,
}

/// Asynchronous-in-spirit blob store, completed synchronously here: every
/// operation reports success or failure through its `Result`. Only the
/// photos/wallpaper flows use it.
pub trait MediaStore {
    fn put(&mut self, record: MediaRecord) -> MediaResult<()>;
    fn get(&self, id: u64) -> MediaResult<Option<MediaRecord>>;
    fn get_all(&self) -> MediaResult<Vec<MediaRecord>>;
    fn delete(&mut self, id: u64) -> MediaResult<()>;

    fn save_config<T: Serialize>(&mut self, key: &str, value: &T) -> MediaResult<()>;
    fn load_config<T: DeserializeOwned>(&self, key: &str) -> MediaResult<Option<T>>;

    fn save_wallpaper_pref(&mut self, pref: WallpaperPref) -> MediaResult<()> {
        self.save_config("wallpaper", &pref)
    }

    fn load_wallpaper_pref(&self) -> MediaResult<Option<WallpaperPref>> {
        self.load_config("wallpaper")
    }
}

/// Filesystem-backed store: one JSON file per media record under
/// `<root>/media/`, config keys under `<root>/config/`.
#[derive(Debug)]
pub struct FsMediaStore {
    media_dir: PathBuf,
    config_dir: PathBuf,
}

impl FsMediaStore {
    pub fn open(root: &Path) -> MediaResult<Self> {
        let media_dir = root.join("media");
        let config_dir = root.join("config");
        fs::create_dir_all(&media_dir)?;
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            media_dir,
            config_dir,
        })
    }

    fn media_path(&self, id: u64) -> PathBuf {
        self.media_dir.join(format!("{id}.json"))
    }

    fn config_path(&self, key: &str) -> PathBuf {
        self.config_dir.join(format!("{key}.json"))
    }
}

impl MediaStore for FsMediaStore {
    fn put(&mut self, record: MediaRecord) -> MediaResult<()> {
        let path = self.media_path(record.id);
        fs::write(&path, serde_json::to_vec(&record)?)?;
        tracing::debug!(id = record.id, path = %path.display(), "stored media record");
        Ok(())
    }

    fn get(&self, id: u64) -> MediaResult<Option<MediaRecord>> {
        let path = self.media_path(id);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn get_all(&self) -> MediaResult<Vec<MediaRecord>> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.media_dir)? {
            let entry = entry?;
            if entry.path().extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let bytes = fs::read(entry.path())?;
            records.push(serde_json::from_slice::<MediaRecord>(&bytes)?);
        }
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn delete(&mut self, id: u64) -> MediaResult<()> {
        match fs::remove_file(self.media_path(id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn save_config<T: Serialize>(&mut self, key: &str, value: &T) -> MediaResult<()> {
        fs::write(self.config_path(key), serde_json::to_vec(value)?)?;
        Ok(())
    }

    fn load_config<T: DeserializeOwned>(&self, key: &str) -> MediaResult<Option<T>> {
        match fs::read(self.config_path(key)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    media: BTreeMap<u64, MediaRecord>,
    config: BTreeMap<String, serde_json::Value>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaStore for MemoryMediaStore {
    fn put(&mut self, record: MediaRecord) -> MediaResult<()> {
        self.media.insert(record.id, record);
        Ok(())
    }

    fn get(&self, id: u64) -> MediaResult<Option<MediaRecord>> {
        Ok(self.media.get(&id).cloned())
    }

    fn get_all(&self) -> MediaResult<Vec<MediaRecord>> {
        Ok(self.media.values().cloned().collect())
    }

    fn delete(&mut self, id: u64) -> MediaResult<()> {
        self.media.remove(&id);
        Ok(())
    }

    fn save_config<T: Serialize>(&mut self, key: &str, value: &T) -> MediaResult<()> {
        self.config.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    fn load_config<T: DeserializeOwned>(&self, key: &str) -> MediaResult<Option<T>> {
        self.config
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(Into::into)
    }
}
