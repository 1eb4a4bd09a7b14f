use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::frontmatter;

/// Slugs that may be joined into a document path.
static DOCUMENT_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Blog,
    Project,
}

impl ContentKind {
    /// Directory under the content root holding this kind's documents.
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Project => "projects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedContent {
    pub content: String,
    pub frontmatter: Map<String, Value>,
}

/// Looks up long-form bodies: an on-disk document first, then the catalog.
pub struct ContentResolver {
    content_dir: PathBuf,
    catalog: Arc<Catalog>,
}

impl ContentResolver {
    pub fn new(content_dir: impl Into<PathBuf>, catalog: Arc<Catalog>) -> Self {
        Self {
            content_dir: content_dir.into(),
            catalog,
        }
    }

    pub async fn resolve(&self, kind: ContentKind, slug: &str) -> Result<ResolvedContent, AppError> {
        if let Some(path) = self.document_path(kind, slug) {
            if let Some(source) = read_optional(&path).await? {
                let doc = frontmatter::parse(&source)?;
                debug!(path = %path.display(), "resolved from document");
                return Ok(ResolvedContent {
                    content: doc.body,
                    frontmatter: doc.frontmatter,
                });
            }
        }

        let content = match kind {
            ContentKind::Blog => self
                .catalog
                .blog_post(slug)
                .map(|post| post.content.clone().unwrap_or_default()),
            ContentKind::Project => self.catalog.project(slug).map(|p| p.fallback_body()),
        };

        content
            .map(|content| ResolvedContent {
                content,
                frontmatter: Map::new(),
            })
            .ok_or(AppError::NotFound)
    }

    /// `None` when the slug cannot name a file inside the kind's directory.
    fn document_path(&self, kind: ContentKind, slug: &str) -> Option<PathBuf> {
        if !DOCUMENT_SLUG.is_match(slug) || slug.contains("..") {
            return None;
        }
        Some(
            self.content_dir
                .join(kind.dir_name())
                .join(format!("{slug}.md")),
        )
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}
