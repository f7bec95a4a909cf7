//! Pet reports persisted as a single JSON document.
//!
//! The whole directory is held in memory behind an async mutex and written
//! back after every mutation. A missing or unreadable document starts an
//! empty directory.

use std::path::{Path, PathBuf};

use pawmap_core::directory::PetDirectory;
use pawmap_core::pet::PetReport;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode pet directory: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct PetStore {
    path: PathBuf,
    pets: Mutex<PetDirectory>,
}

impl PetStore {
    /// Load the document at `path`, or start empty if it is missing or
    /// cannot be parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let pets = load_document(&path).await;
        tracing::info!(path = %path.display(), count = pets.len(), "Pet store opened");
        Self {
            path,
            pets: Mutex::new(pets),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every report in insertion order.
    pub async fn list(&self) -> PetDirectory {
        self.pets.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.pets.lock().await.len()
    }

    /// Add or replace a report and persist.
    pub async fn insert(&self, report: PetReport) -> Result<PetReport, StoreError> {
        let mut pets = self.pets.lock().await;
        let mut next = pets.clone();
        next.insert(report.clone());
        self.commit(&mut pets, next).await?;
        Ok(report)
    }

    /// Flip a report between lost and found. `None` when the id is unknown.
    pub async fn toggle_status(&self, id: &str) -> Result<Option<PetReport>, StoreError> {
        let mut pets = self.pets.lock().await;
        let mut next = pets.clone();
        let Some(report) = next.get_mut(id) else {
            return Ok(None);
        };
        report.status = report.status.toggled();
        let updated = report.clone();
        self.commit(&mut pets, next).await?;
        Ok(Some(updated))
    }

    /// Remove a report. `None` when the id is unknown.
    pub async fn remove(&self, id: &str) -> Result<Option<PetReport>, StoreError> {
        let mut pets = self.pets.lock().await;
        let mut next = pets.clone();
        let Some(removed) = next.remove(id) else {
            return Ok(None);
        };
        self.commit(&mut pets, next).await?;
        Ok(Some(removed))
    }

    /// Write `next` to disk, then make it the live directory. The live
    /// directory is unchanged if the write fails.
    async fn commit(&self, live: &mut PetDirectory, next: PetDirectory) -> Result<(), StoreError> {
        self.persist(&next).await?;
        *live = next;
        Ok(())
    }

    async fn persist(&self, pets: &PetDirectory) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(pets)?;
        let tmp = self.path.with_extension("json.tmp");

        let write = async {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&tmp, &body).await?;
            tokio::fs::rename(&tmp, &self.path).await
        };
        write.await.map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

async fn load_document(path: &Path) -> PetDirectory {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return PetDirectory::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Pet store unreadable, starting empty");
            return PetDirectory::new();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Pet store corrupt, starting empty");
        PetDirectory::new()
    })
}

#[cfg(test)]
mod tests {
    use pawmap_core::pet::{NewPetFields, PetStatus};
    use pawmap_core::types::LatLng;

    use super::*;

    fn report(submission_time: i64) -> PetReport {
        NewPetFields {
            name: "Mittens".into(),
            contact: "555-0101".into(),
            description: "grey tabby".into(),
            location: LatLng::new(31.47, 74.33),
            submission_time,
        }
        .into_report("/uploads/m.png".into())
    }

    #[tokio::test]
    async fn missing_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PetStore::open(dir.path().join("data.json")).await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let store = PetStore::open(&path).await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let store = PetStore::open(&path).await;
        store.insert(report(1000)).await.unwrap();
        store.insert(report(2000)).await.unwrap();
        let toggled = store.toggle_status("pet_1000").await.unwrap().unwrap();
        assert_eq!(toggled.status, PetStatus::Found);
        assert!(store.remove("pet_2000").await.unwrap().is_some());

        let reopened = PetStore::open(&path).await;
        let pets = reopened.list().await;
        assert_eq!(pets.len(), 1);
        assert_eq!(pets.get("pet_1000").unwrap().status, PetStatus::Found);
    }

    #[tokio::test]
    async fn unknown_ids_return_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = PetStore::open(dir.path().join("data.json")).await;
        assert!(store.toggle_status("pet_404").await.unwrap().is_none());
        assert!(store.remove("pet_404").await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    /// A store whose document sits under a regular file, so every write fails.
    async fn unwritable_store(dir: &tempfile::TempDir) -> PetStore {
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, b"").await.unwrap();
        PetStore::open(blocker.join("data.json")).await
    }

    #[tokio::test]
    async fn failed_insert_leaves_directory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = unwritable_store(&dir).await;

        let err = store.insert(report(1000)).await.unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.len().await, 0);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn failed_toggle_and_remove_leave_directory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = PetStore::open(&path).await;
        store.insert(report(1000)).await.unwrap();

        // Replace the document with a directory so the final rename fails.
        tokio::fs::remove_file(&path).await.unwrap();
        tokio::fs::create_dir(&path).await.unwrap();
        tokio::fs::write(path.join("keep"), b"").await.unwrap();

        assert!(store.toggle_status("pet_1000").await.is_err());
        assert!(store.remove("pet_1000").await.is_err());

        let pets = store.list().await;
        assert_eq!(pets.len(), 1);
        assert_eq!(pets.get("pet_1000").unwrap().status, PetStatus::Lost);
    }

    #[tokio::test]
    async fn len_counts_reports() {
        let dir = tempfile::tempdir().unwrap();
        let store = PetStore::open(dir.path().join("data.json")).await;
        assert_eq!(store.len().await, 0);
        store.insert(report(1000)).await.unwrap();
        store.insert(report(2000)).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
