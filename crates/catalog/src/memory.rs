//! In-process [`ItemStore`] with the same unique-name rule as the real collection.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{database::ItemStore, errors::AppError, models::Item};

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    pub async fn snapshot(&self) -> Vec<Item> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        let items = self.items.lock().await;
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.name == item.name) {
                return Err(AppError::DuplicateName(item.name.clone()));
            }
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.items.lock().await.len() as u64)
    }

    async fn insert_many(&self, batch: &[Item]) -> Result<usize, AppError> {
        let mut items = self.items.lock().await;
        for item in batch {
            if items.iter().any(|existing| existing.name == item.name) {
                return Err(AppError::DuplicateName(item.name.clone()));
            }
            items.push(item.clone());
        }
        Ok(batch.len())
    }

    async fn list(&self) -> Result<Vec<Item>, AppError> {
        Ok(self.snapshot().await)
    }
}
