//! Local disk storage for uploaded PDFs.
//!
//! Files are written as `{dir}/{upload_id}.pdf`. There is no retention
//! policy: stored files stay until removed out of band.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use futures::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use voice2pdf_core::pdf_upload::{self, PDF_SIGNATURE};

use crate::error::{AppError, AppResult};

/// A PDF persisted by [`PdfStore::save`].
#[derive(Debug, Clone)]
pub struct StoredPdf {
    pub upload_id: Uuid,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Writes uploaded PDFs into a single directory.
#[derive(Debug, Clone)]
pub struct PdfStore {
    dir: PathBuf,
}

impl PdfStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the stored file for `upload_id`.
    pub fn path_for(&self, upload_id: &Uuid) -> PathBuf {
        self.dir.join(pdf_upload::stored_file_name(upload_id))
    }

    /// Create the storage directory if needed and check it is writable.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let metadata = tokio::fs::metadata(&self.dir).await?;
        if metadata.permissions().readonly() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{} is read-only", self.dir.display()),
            ));
        }
        Ok(())
    }

    /// Stream `body` to disk under `upload_id`.
    ///
    /// The leading bytes are buffered until the PDF signature can be checked,
    /// so a non-PDF body is refused before any file is created. If reading or
    /// writing fails afterwards, the partial file is removed.
    pub async fn save<S, E>(&self, upload_id: Uuid, body: S) -> AppResult<StoredPdf>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<AppError>,
    {
        let mut body = std::pin::pin!(body);

        let mut head = Vec::with_capacity(PDF_SIGNATURE.len());
        while head.len() < PDF_SIGNATURE.len() {
            match body.next().await {
                Some(chunk) => head.extend_from_slice(&chunk.map_err(Into::<AppError>::into)?),
                None => break,
            }
        }
        pdf_upload::validate_signature(&head)?;

        let path = self.path_for(&upload_id);
        let result = write_file(&path, &head, body.as_mut()).await;

        match result {
            Ok(size_bytes) => Ok(StoredPdf {
                upload_id,
                path,
                size_bytes,
            }),
            Err(err) => {
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = %remove_err,
                        "Failed to remove partial upload"
                    );
                }
                Err(err)
            }
        }
    }
}

async fn write_file<S, E>(
    path: &Path,
    head: &[u8],
    mut rest: std::pin::Pin<&mut S>,
) -> AppResult<u64>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<AppError>,
{
    let disk_error =
        |e: std::io::Error| AppError::InternalError(format!("{}: {e}", path.display()));

    let mut file = tokio::fs::File::create(path).await.map_err(disk_error)?;
    file.write_all(head).await.map_err(disk_error)?;
    let mut written = head.len() as u64;

    while let Some(chunk) = rest.next().await {
        let chunk = chunk.map_err(Into::<AppError>::into)?;
        file.write_all(&chunk).await.map_err(disk_error)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(disk_error)?;
    file.sync_all().await.map_err(disk_error)?;
    Ok(written)
}
