//! File-backed store with read-modify-write updates

use crate::models::{Comment, CuratedList, Revision, StoreData, create_comment, now_timestamp};
use serde_json::Value;
use std::path::{Path, PathBuf};
use threadvault_core::{Error, PathKey, Result};
use tokio::sync::Mutex;
use tracing::instrument;

/// Local store persisted as one JSON file.
///
/// Every update reads the file, applies the change and writes it back
/// through a temporary file and rename. Updates within one process are
/// serialized; across processes the last write wins.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file has been created yet
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Read the store file, `None` when it does not exist
    pub async fn read(&self) -> Result<Option<StoreData>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(e)),
        };

        let data = serde_json::from_str(&content).map_err(|e| {
            Error::parse_error(format!("Invalid store file {}: {}", self.path.display(), e))
        })?;
        Ok(Some(data))
    }

    /// Read the store file, or an empty store when it does not exist
    pub async fn load(&self) -> Result<StoreData> {
        Ok(self.read().await?.unwrap_or_default())
    }

    #[instrument(skip(self, data), fields(file = ?self.path), name = "store_write")]
    async fn write(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        let content = serde_json::to_string_pretty(data)?;
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(Error::io)?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(Error::io)?;

        log::debug!("Store written to {}", self.path.display());
        Ok(())
    }

    /// Apply `change` to the current contents and persist the result
    pub async fn update<T>(&self, change: impl FnOnce(&mut StoreData) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.load().await?;
        let result = change(&mut data)?;
        self.write(&data).await?;
        Ok(result)
    }

    // Comments

    /// Comments for a tweet in a list.
    ///
    /// Empty when the store file, the list or the entry is missing, or the
    /// file cannot be read.
    pub async fn load_tweet_comments(&self, list_id: &str, tweet_path: &str) -> Vec<Comment> {
        match self.read().await {
            Ok(Some(data)) => data
                .list(list_id)
                .and_then(|list| list.tweet_comments.get(tweet_path))
                .cloned()
                .unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::error!("Failed to load comments: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the comments for a tweet in a list.
    ///
    /// Returns `false` without writing when the store file or the list does
    /// not exist, or when the store cannot be read or written.
    pub async fn save_tweet_comments(
        &self,
        list_id: &str,
        tweet_path: &str,
        comments: Vec<Comment>,
    ) -> bool {
        match self.try_save_tweet_comments(list_id, tweet_path, comments).await {
            Ok(saved) => saved,
            Err(e) => {
                log::error!("Failed to save comments: {}", e);
                false
            }
        }
    }

    async fn try_save_tweet_comments(
        &self,
        list_id: &str,
        tweet_path: &str,
        comments: Vec<Comment>,
    ) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(mut data) = self.read().await? else {
            return Ok(false);
        };
        let Some(list) = data.list_mut(list_id) else {
            return Ok(false);
        };

        list.tweet_comments.insert(tweet_path.to_string(), comments);
        self.write(&data).await?;
        Ok(true)
    }

    /// Append a new comment to a tweet in a list
    pub async fn add_comment(&self, list_id: &str, tweet_path: &str, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(Error::validation_error("Comment content must not be empty"));
        }
        let comment = create_comment(content);

        self.update(|data| {
            let list = data
                .list_mut(list_id)
                .ok_or_else(|| Error::list_not_found(list_id))?;
            list.tweet_comments
                .entry(tweet_path.to_string())
                .or_default()
                .push(comment.clone());
            Ok(comment)
        })
        .await
    }

    // Lists

    pub async fn create_list(&self, name: &str) -> Result<CuratedList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation_error("List name must not be empty"));
        }
        let list = CuratedList::new(name);

        let created = self
            .update(|data| {
                data.lists.push(list.clone());
                Ok(list)
            })
            .await?;
        log::info!("Created list '{}' ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn lists(&self) -> Result<Vec<CuratedList>> {
        Ok(self.load().await?.lists)
    }

    pub async fn get_list(&self, id: &str) -> Result<CuratedList> {
        self.load()
            .await?
            .list(id)
            .cloned()
            .ok_or_else(|| Error::list_not_found(id))
    }

    pub async fn delete_list(&self, id: &str) -> Result<()> {
        self.update(|data| {
            let before = data.lists.len();
            data.lists.retain(|l| l.id != id);
            if data.lists.len() == before {
                return Err(Error::list_not_found(id));
            }
            Ok(())
        })
        .await
    }

    /// Add a tweet path-key to a list; already present keys are not repeated
    pub async fn add_to_list(&self, id: &str, tweet_path: &str) -> Result<CuratedList> {
        let key: PathKey = tweet_path.parse()?;
        let item = key.to_string();

        self.update(|data| {
            let list = data.list_mut(id).ok_or_else(|| Error::list_not_found(id))?;
            if !list.contains(&item) {
                list.items.push(item);
            }
            Ok(list.clone())
        })
        .await
    }

    pub async fn remove_from_list(&self, id: &str, tweet_path: &str) -> Result<CuratedList> {
        self.update(|data| {
            let list = data.list_mut(id).ok_or_else(|| Error::list_not_found(id))?;
            list.items.retain(|item| item != tweet_path);
            Ok(list.clone())
        })
        .await
    }

    // Revisions

    /// Store an edited copy of a document, replacing any previous revision
    #[instrument(skip(self, document), name = "store_save_revision")]
    pub async fn save_revision(
        &self,
        document_id: &str,
        document: Value,
        base_hash: &str,
    ) -> Result<Revision> {
        let revision = Revision {
            document_id: document_id.to_string(),
            saved_at: now_timestamp(),
            base_hash: base_hash.to_string(),
            document,
        };

        self.update(|data| {
            data.revisions
                .insert(document_id.to_string(), revision.clone());
            Ok(revision)
        })
        .await
    }

    pub async fn get_revision(&self, document_id: &str) -> Result<Option<Revision>> {
        Ok(self.load().await?.revisions.remove(document_id))
    }

    pub async fn revisions(&self) -> Result<Vec<Revision>> {
        Ok(self.load().await?.revisions.into_values().collect())
    }

    /// Remove a revision; `false` when there was none
    pub async fn delete_revision(&self, document_id: &str) -> Result<bool> {
        if !self.exists().await {
            return Ok(false);
        }
        self.update(|data| Ok(data.revisions.remove(document_id).is_some()))
            .await
    }
}
