use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ResumeRef;

const RESUME_DIR: &str = "resumes";
const NAME_LEN: usize = 24;

/// Holds uploaded resumes. Contents are never inspected.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn store(&self, bytes: Vec<u8>) -> io::Result<ResumeRef>;
    async fn retrieve(&self, reference: &ResumeRef) -> io::Result<Vec<u8>>;
    async fn remove(&self, reference: &ResumeRef) -> io::Result<()>;
}

fn fresh_reference() -> ResumeRef {
    let name: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NAME_LEN)
        .map(char::from)
        .collect();
    ResumeRef::new(format!("{RESUME_DIR}/{name}"))
}

/// Returns the file name of a well-formed reference, rejecting anything that
/// could escape the resume directory.
fn file_name(reference: &ResumeRef) -> io::Result<&str> {
    reference
        .as_str()
        .strip_prefix(RESUME_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|name| name.len() == NAME_LEN && name.chars().all(|c| c.is_ascii_alphanumeric()))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("malformed resume reference: {}", reference),
            )
        })
}

/// Stores resumes as files under `<root>/resumes/`
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, reference: &ResumeRef) -> io::Result<PathBuf> {
        Ok(self.root.join(RESUME_DIR).join(file_name(reference)?))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, bytes: Vec<u8>) -> io::Result<ResumeRef> {
        tokio::fs::create_dir_all(self.root.join(RESUME_DIR)).await?;

        let reference = fresh_reference();
        let path = self.path_for(&reference)?;
        tokio::fs::write(&path, bytes).await?;

        debug!("Stored resume at {}", path.display());
        Ok(reference)
    }

    async fn retrieve(&self, reference: &ResumeRef) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(reference)?).await
    }

    async fn remove(&self, reference: &ResumeRef) -> io::Result<()> {
        tokio::fs::remove_file(self.path_for(reference)?).await
    }
}

/// Keeps resumes in memory; used by tests and `serve --in-memory`
#[derive(Default)]
pub struct InMemoryFileStorage {
    files: Mutex<HashMap<ResumeRef, Vec<u8>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.files.lock().await.len()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(&self, bytes: Vec<u8>) -> io::Result<ResumeRef> {
        let reference = fresh_reference();
        self.files.lock().await.insert(reference.clone(), bytes);
        Ok(reference)
    }

    async fn retrieve(&self, reference: &ResumeRef) -> io::Result<Vec<u8>> {
        file_name(reference)?;
        self.files
            .lock()
            .await
            .get(reference)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no resume at {}", reference)))
    }

    async fn remove(&self, reference: &ResumeRef) -> io::Result<()> {
        self.files.lock().await.remove(reference);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_references_outside_the_resume_directory() {
        for raw in ["../etc/passwd", "resumes/../../secret", "resumes/", "other/abcdefghijklmnopqrstuvwx"] {
            assert!(file_name(&ResumeRef::new(raw)).is_err(), "{raw} should be rejected");
        }
        let fresh = fresh_reference();
        assert!(file_name(&fresh).is_ok());
    }

    #[actix_web::test]
    async fn local_storage_round_trips_and_removes() {
        let root = std::env::temp_dir().join(format!("job-board-test-{}", std::process::id()));
        let storage = LocalFileStorage::new(&root);

        let reference = storage.store(b"%PDF-1.7 resume".to_vec()).await.expect("store");
        assert!(reference.as_str().starts_with("resumes/"));
        assert_eq!(storage.retrieve(&reference).await.expect("retrieve"), b"%PDF-1.7 resume");

        storage.remove(&reference).await.expect("remove");
        assert!(storage.retrieve(&reference).await.is_err());

        let _ = std::fs::remove_dir_all(root);
    }
}
