//! libSQL corpus store.
//!
//! The [`Storage`] struct wraps a local libSQL database holding ingested
//! document chunks with their provenance metadata, plus an FTS5 index used
//! by the query surface. The crawl process is the sole writer; no
//! multi-process locking is provided.

mod migrations;

use std::path::Path;

use chrono::Utc;
use libsql::{Connection, Database, params};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use sitecorpus_shared::{Document, Result, SiteCorpusError};

/// Primary storage handle wrapping a libSQL database.
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
}

impl Storage {
    /// Open or create a corpus database at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SiteCorpusError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| SiteCorpusError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| SiteCorpusError::Storage(e.to_string()))?;

        let storage = Self { db, conn };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Run pending schema migrations.
    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                tracing::info!(
                    version = migration.version,
                    description = migration.description,
                    "applying migration"
                );
                self.conn.execute_batch(migration.sql).await.map_err(|e| {
                    SiteCorpusError::Storage(format!(
                        "migration v{} failed: {e}",
                        migration.version
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Get the current schema version, or 0 if no migrations have been applied.
    async fn get_schema_version(&self) -> u32 {
        let result = self
            .conn
            .query("SELECT MAX(version) FROM schema_migrations", params![])
            .await;

        match result {
            Ok(mut rows) => {
                if let Ok(Some(row)) = rows.next().await {
                    row.get::<u32>(0).unwrap_or(0)
                } else {
                    0
                }
            }
            Err(_) => 0, // Table doesn't exist yet
        }
    }

    // -----------------------------------------------------------------------
    // Document operations
    // -----------------------------------------------------------------------

    /// Insert one document chunk.
    pub async fn insert_document(&self, doc: &Document) -> Result<()> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now().to_rfc3339();
        let hash = content_hash(&doc.content);

        self.conn
            .execute(
                "INSERT INTO documents (id, source, title, chunk_index, image_urls, content, content_hash, ingested_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id.as_str(),
                    doc.metadata.source.as_str(),
                    doc.metadata.title.as_str(),
                    doc.metadata.chunk_index as i64,
                    doc.metadata.image_urls.as_str(),
                    doc.content.as_str(),
                    hash.as_str(),
                    now.as_str(),
                ],
            )
            .await
            .map_err(|e| SiteCorpusError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Insert a batch of documents. An empty batch is a no-op.
    ///
    /// Documents are stored verbatim; re-ingesting the same URL produces
    /// duplicate rows, since dedup happens at crawl time by URL.
    pub async fn ingest_documents(&self, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            tracing::debug!("no documents to ingest");
            return Ok(());
        }

        for doc in documents {
            self.insert_document(doc).await?;
        }

        tracing::info!(count = documents.len(), "documents ingested");
        Ok(())
    }

    /// Total number of stored document chunks.
    pub async fn document_count(&self) -> Result<usize> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM documents", params![])
            .await
            .map_err(|e| SiteCorpusError::Storage(e.to_string()))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let count: i64 = row
                    .get(0)
                    .map_err(|e| SiteCorpusError::Storage(e.to_string()))?;
                Ok(count as usize)
            }
            Ok(None) => Ok(0),
            Err(e) => Err(SiteCorpusError::Storage(e.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Query surface
    // -----------------------------------------------------------------------

    /// Full-text search over the corpus, returning the top `limit` documents.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<DocumentHit>> {
        let mut rows = self
            .conn
            .query(
                "SELECT d.content, d.source, d.title, d.image_urls, rank
                 FROM documents_fts fts
                 JOIN documents d ON d.rowid = fts.rowid
                 WHERE documents_fts MATCH ?1
                 ORDER BY rank
                 LIMIT ?2",
                params![query, limit],
            )
            .await
            .map_err(|e| SiteCorpusError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            results.push(DocumentHit {
                content: row
                    .get::<String>(0)
                    .map_err(|e| SiteCorpusError::Storage(e.to_string()))?,
                source: row
                    .get::<String>(1)
                    .map_err(|e| SiteCorpusError::Storage(e.to_string()))?,
                title: row
                    .get::<String>(2)
                    .map_err(|e| SiteCorpusError::Storage(e.to_string()))?,
                image_urls: row
                    .get::<String>(3)
                    .map_err(|e| SiteCorpusError::Storage(e.to_string()))?,
                score: row.get::<f64>(4).unwrap_or(0.0),
            });
        }
        Ok(results)
    }
}

/// A query hit, serialized for downstream tool consumption.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentHit {
    /// Chunk text.
    pub content: String,
    /// Page URL the chunk came from.
    pub source: String,
    /// Page title.
    pub title: String,
    /// Comma-joined image URLs from the source page.
    pub image_urls: String,
    /// FTS5 rank score (lower is better).
    pub score: f64,
}

/// SHA-256 hash of chunk content, stored for diagnostics.
fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
