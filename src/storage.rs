//! Local file storage for uploaded invoice PDFs.
//!
//! Invoices are written below a configurable root directory under
//! `reservations/<id>.pdf` and the relative path is recorded on the
//! reservation. Re-uploading overwrites the previous file.

use std::path::{Path, PathBuf};

use crate::domain::ReservationId;
use crate::error::ApiError;

/// Filesystem store for invoice PDFs.
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    root: PathBuf,
}

impl InvoiceStore {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Relative storage path for a reservation's invoice.
    #[must_use]
    pub fn invoice_path(id: ReservationId) -> String {
        format!("reservations/{id}.pdf")
    }

    /// Stores the invoice bytes and returns the relative path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when the directory cannot be created
    /// or the file cannot be written.
    pub async fn save(&self, id: ReservationId, bytes: &[u8]) -> Result<String, ApiError> {
        let relative = Self::invoice_path(id);
        let full = self.root.join(&relative);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&full, bytes)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(relative)
    }

    /// Loads a previously stored invoice by its relative path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] when the path escapes the store root
    /// or the file cannot be read.
    pub async fn load(&self, relative: &str) -> Result<Vec<u8>, ApiError> {
        // Paths come from our own database rows, but reject traversal
        // anyway.
        if Path::new(relative)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ApiError::Storage(format!("invalid invoice path: {relative}")));
        }
        tokio::fs::read(self.root.join(relative))
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let root = std::env::temp_dir().join(format!("invoices-{}", uuid::Uuid::new_v4()));
        let store = InvoiceStore::new(root.clone());
        let id = ReservationId::new();

        let Ok(path) = store.save(id, b"%PDF-1.4 test").await else {
            panic!("save failed");
        };
        assert_eq!(path, format!("reservations/{id}.pdf"));

        let Ok(bytes) = store.load(&path).await else {
            panic!("load failed");
        };
        assert_eq!(bytes, b"%PDF-1.4 test");

        let _ = tokio::fs::remove_dir_all(root).await;
    }

    #[tokio::test]
    async fn load_rejects_path_traversal() {
        let store = InvoiceStore::new(std::env::temp_dir());
        assert!(store.load("../etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn load_missing_file_is_storage_error() {
        let store = InvoiceStore::new(std::env::temp_dir());
        let result = store.load("reservations/does-not-exist.pdf").await;
        assert!(matches!(result, Err(ApiError::Storage(_))));
    }
}
