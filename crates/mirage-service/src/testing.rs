//! Test doubles shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::traits::storage::StorageProvider;

/// An object store that keeps objects in memory and counts calls.
#[derive(Debug, Default)]
pub(crate) struct RecordingStorage {
    objects: Mutex<HashMap<String, Bytes>>,
    puts: AtomicUsize,
    deletes: AtomicUsize,
    fail_deletes: AtomicBool,
}

impl RecordingStorage {
    pub(crate) fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub(crate) fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub(crate) fn holds(&self, url: &str) -> bool {
        self.key_from_url(url)
            .is_some_and(|key| self.objects.lock().unwrap().contains_key(&key))
    }
}

#[async_trait]
impl StorageProvider for RecordingStorage {
    fn provider_type(&self) -> &str {
        "recording"
    }

    fn public_base_url(&self) -> &str {
        "http://media.test"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<String> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(self.url_for(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::internal("delete refused"));
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
