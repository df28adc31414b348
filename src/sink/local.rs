use std::fs;
use std::path::{Path, PathBuf};

use super::SinkError;

// ---

/// Writes telemetry files into a local directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct LocalSink {
    dir: PathBuf,
}

impl LocalSink {
    // ---
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf, SinkError> {
        // ---
        let write_err = |path: &Path, source| SinkError::Write {
            path: path.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|e| write_err(&self.dir, e))?;

        let path = self.dir.join(name);
        fs::write(&path, data).map_err(|e| write_err(&path, e))?;

        tracing::info!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::sink::Sink;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hvac-sink-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_write_creates_directory() {
        // ---
        let dir = scratch_dir("nested/output");
        let _ = fs::remove_dir_all(&dir);

        let sink = LocalSink::new(&dir);
        let path = sink.write("run.json", b"[]").unwrap();

        assert_eq!(path, dir.join("run.json"));
        assert_eq!(fs::read(&path).unwrap(), b"[]");
    }

    #[test]
    fn test_persist_through_gateway() {
        // ---
        let dir = scratch_dir("gateway");
        let sink = Sink::Local(LocalSink::new(&dir));

        let location =
            tokio_test::block_on(sink.persist("run.jsonl", b"{}\n".to_vec())).unwrap();

        assert!(location.ends_with("run.jsonl"));
        assert_eq!(fs::read(dir.join("run.jsonl")).unwrap(), b"{}\n");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        // ---
        let blocker = scratch_dir("blocker");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, b"occupied").unwrap();

        let err = LocalSink::new(&blocker).write("run.json", b"[]").unwrap_err();
        assert!(matches!(err, SinkError::Write { .. }));
    }
}
