use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// File name of the flash slot inside the application state directory.
pub const FLASH_FILE_NAME: &str = "flash_message.json";

/// Single-slot storage for one pending flash message.
///
/// The slot holds at most one raw payload; a write replaces whatever was
/// there. Readers never see a partially applied operation.
pub trait FlashSlot {
    /// Current payload, `None` when the slot is empty.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the payload.
    fn write(&self, raw: &str) -> io::Result<()>;

    /// Empty the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> io::Result<()>;
}

/// Flash slot backed by a single file.
///
/// Survives process restarts, which is what lets a message stashed just
/// before quitting (or a crash mid-navigation) still show up once on the
/// next launch.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Slot at the default location under the user state directory,
    /// e.g. `~/.local/state/wikiterm/flash_message.json`.
    ///
    /// Falls back to the local data directory, then the current directory,
    /// if no state directory is available on this platform.
    pub fn in_state_dir() -> Self {
        let base = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("wikiterm").join(FLASH_FILE_NAME),
        }
    }

    /// Slot at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlashSlot for FileSlot {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, raw: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory flash slot.
///
/// Used by tests and as a fallback when no writable state directory
/// exists; messages then survive navigation but not the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlashSlot for MemorySlot {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.value.lock().clone())
    }

    fn write(&self, raw: &str) -> io::Result<()> {
        *self.value.lock() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.value.lock() = None;
        Ok(())
    }
}
