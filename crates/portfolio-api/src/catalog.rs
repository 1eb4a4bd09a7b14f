//! Read-only view over the JSON catalogs (`blog.json`, `projects.json`).
//!
//! Loaded once at startup and shared behind an `Arc`; request handlers never
//! mutate it. Entry order is preserved as stored (newest first).
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;
use crate::model::{BlogPost, Category, Project};

const BLOG_FILE: &str = "blog.json";
const PROJECTS_FILE: &str = "projects.json";

/// Taxonomy id that matches every entry.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogCatalog {
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectCatalog {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    blog: BlogCatalog,
    projects: ProjectCatalog,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub category: Option<String>,
    pub featured_only: bool,
}

impl ListFilter {
    fn wants_category(&self, id: &str) -> bool {
        match self.category.as_deref() {
            None | Some("") | Some(ALL_CATEGORIES) => true,
            Some(wanted) => wanted == id,
        }
    }
}

impl Catalog {
    pub fn new(blog: BlogCatalog, projects: ProjectCatalog) -> Self {
        Self { blog, projects }
    }

    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        let blog: BlogCatalog = read_catalog(&data_dir.join(BLOG_FILE))?;
        let projects: ProjectCatalog = read_catalog(&data_dir.join(PROJECTS_FILE))?;
        Ok(Self::new(blog, projects))
    }

    /// First post whose id equals `slug`.
    pub fn blog_post(&self, slug: &str) -> Option<&BlogPost> {
        self.blog.posts.iter().find(|p| p.id == slug)
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.projects.iter().find(|p| p.id == slug)
    }

    /// Matching posts, newest `date` first.
    pub fn blog_posts(&self, filter: &ListFilter) -> Vec<&BlogPost> {
        let mut posts: Vec<&BlogPost> = self
            .blog
            .posts
            .iter()
            .filter(|p| filter.wants_category(p.category.id()))
            .filter(|p| !filter.featured_only || p.featured)
            .collect();
        // ISO dates order lexically; the sort is stable for equal dates.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Matching projects in catalog order.
    pub fn projects(&self, filter: &ListFilter) -> Vec<&Project> {
        self.projects
            .projects
            .iter()
            .filter(|p| filter.wants_category(p.category.id()))
            .filter(|p| !filter.featured_only || p.featured)
            .collect()
    }

    pub fn blog_categories(&self) -> &[Category] {
        &self.blog.categories
    }

    pub fn project_categories(&self) -> &[Category] {
        &self.projects.categories
    }

    pub fn blog_len(&self) -> usize {
        self.blog.posts.len()
    }

    pub fn projects_len(&self) -> usize {
        self.projects.projects.len()
    }
}

fn read_catalog<T: DeserializeOwned + Default>(path: &Path) -> Result<T, AppError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "catalog file missing, using an empty catalog");
            return Ok(T::default());
        }
        Err(e) => {
            return Err(AppError::Config(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Config(format!("invalid catalog {}: {e}", path.display())))
}
