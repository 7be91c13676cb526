// src/io.rs
//! Text file loading for shader sources and other sketch assets.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::{PlaygroundError, Result};

/// Reads a whole UTF-8 file.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| map_io_error(path, source))
}

/// Reads every file in order, stopping at the first failure.
pub fn load_text_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Vec<String>> {
    paths.into_iter().map(read_text_file).collect()
}

/// Starts reading `path` on a background thread.
pub fn read_text_file_deferred(path: impl Into<PathBuf>) -> DeferredText {
    let path = path.into();
    let (sender, receiver) = mpsc::channel();

    log::debug!("Loading {} in the background", path.display());
    let worker_path = path.clone();
    thread::spawn(move || {
        // the receiver may be gone if the caller stopped waiting
        let _ = sender.send(read_text_file(&worker_path));
    });

    DeferredText { path, receiver }
}

/// A file being read by [`read_text_file_deferred`].
pub struct DeferredText {
    path: PathBuf,
    receiver: Receiver<Result<String>>,
}

impl DeferredText {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the result once the read has finished, without blocking.
    ///
    /// The result is handed out once; later calls return `None`.
    pub fn try_take(&mut self) -> Option<Result<String>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks until the read finishes.
    pub fn wait(self) -> Result<String> {
        self.receiver.recv().unwrap_or_else(|_| {
            Err(PlaygroundError::Io {
                path: self.path.clone(),
                source: std::io::Error::other("loader thread exited without a result"),
            })
        })
    }
}

fn map_io_error(path: &Path, source: std::io::Error) -> PlaygroundError {
    if source.kind() == std::io::ErrorKind::NotFound {
        log::error!("File not found: {}", path.display());
        PlaygroundError::FileNotFound(path.to_path_buf())
    } else {
        log::error!("Failed to read {}: {source}", path.display());
        PlaygroundError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("canvas_playground_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_text_file() {
        let path = temp_file("shader.wgsl", "fn vs_main() {}");
        assert_eq!(read_text_file(&path).unwrap(), "fn vs_main() {}");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = read_text_file("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, PlaygroundError::FileNotFound(path) if path.ends_with("exist.txt")));
    }

    #[test]
    fn test_directory_is_io_error() {
        let err = read_text_file(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, PlaygroundError::Io { .. }));
    }

    #[test]
    fn test_load_text_files_in_order() {
        let a = temp_file("a.txt", "first");
        let b = temp_file("b.txt", "second");
        assert_eq!(load_text_files([&a, &b]).unwrap(), vec!["first", "second"]);

        assert!(load_text_files([a.as_path(), Path::new("missing.txt")]).is_err());
        fs::remove_file(a).unwrap();
        fs::remove_file(b).unwrap();
    }

    #[test]
    fn test_deferred_read() {
        let path = temp_file("deferred.txt", "later");
        let deferred = read_text_file_deferred(&path);
        assert_eq!(deferred.path(), path.as_path());
        assert_eq!(deferred.wait().unwrap(), "later");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_deferred_try_take_once() {
        let path = temp_file("once.txt", "value");
        let mut deferred = read_text_file_deferred(&path);

        let mut taken = None;
        while taken.is_none() {
            taken = deferred.try_take();
            thread::yield_now();
        }
        assert_eq!(taken.unwrap().unwrap(), "value");
        assert!(deferred.try_take().is_none());
        fs::remove_file(path).unwrap();
    }
}
