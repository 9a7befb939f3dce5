use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Output locations currently being generated. At most one writer per location.
#[derive(Debug, Default)]
pub struct LocationLocks {
    held: Mutex<HashSet<PathBuf>>,
}

impl LocationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `location`, or returns `None` if another generation holds it.
    pub fn try_acquire(self: &Arc<Self>, location: &Path) -> Option<LocationGuard> {
        let key = lock_key(location);
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(key.clone()) {
            return None;
        }
        Some(LocationGuard {
            locks: Arc::clone(self),
            key,
        })
    }

    pub fn is_held(&self, location: &Path) -> bool {
        let key = lock_key(location);
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }
}

/// Absolute, lexically normalized form of `location`: `.` is dropped and `..` cancels the
/// component before it, so every spelling of one file maps to one key. Symlinks are not resolved.
fn lock_key(location: &Path) -> PathBuf {
    let absolute = std::path::absolute(location).unwrap_or_else(|_| location.to_path_buf());
    let mut key = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(key.components().next_back(), Some(Component::Normal(_))) {
                    key.pop();
                } else if !key.has_root() {
                    key.push(component);
                }
            }
            other => key.push(other),
        }
    }
    key
}

/// Releases its location when dropped.
#[derive(Debug)]
pub struct LocationGuard {
    locks: Arc<LocationLocks>,
    key: PathBuf,
}

impl Drop for LocationGuard {
    fn drop(&mut self) {
        self.locks
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
