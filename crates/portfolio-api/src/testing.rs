//! Fixtures shared by the unit tests.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use portfolio_common::openai::{ChatCompletionRequest, ChatCompletionResponse, OpenAiClientError};
use portfolio_common::provider::ChatProvider;

use crate::catalog::{BlogCatalog, Catalog, ProjectCatalog};

pub const FLOWBREAK_DESCRIPTION: &str =
    "A productivity web app inspired by the Pomodoro Technique with automatic distraction blocking.";

pub fn fixture_blog() -> BlogCatalog {
    serde_json::from_value(json!({
        "posts": [
            {
                "id": "hello-world",
                "title": "Hello World",
                "excerpt": "First post",
                "content": "Embedded hello body",
                "date": "2024-02-10",
                "category": "technical",
                "tags": ["intro"],
                "readTime": "2 min read",
                "featured": true
            },
            {
                "id": "markdown-post",
                "title": "Markdown Post",
                "excerpt": "Has a document",
                "content": "catalog body that the document shadows",
                "date": "2024-06-01",
                "category": "technical",
                "tags": [],
                "readTime": "4 min read",
                "featured": false
            },
            {
                "id": "no-body",
                "title": "No Body",
                "excerpt": "Catalog entry without content",
                "date": "2023-12-01",
                "category": "personal",
                "tags": ["life"],
                "featured": false
            }
        ],
        "categories": [
            { "id": "all", "name": "All Posts" },
            { "id": "technical", "name": "Technical" },
            { "id": "personal", "name": "Personal" }
        ]
    }))
    .expect("valid blog fixture")
}

pub fn fixture_projects() -> ProjectCatalog {
    serde_json::from_value(json!({
        "projects": [
            {
                "id": "pricepal",
                "title": "PricePal",
                "description": "AR shopping assistant on smart glasses.",
                "tech": ["TypeScript", "OpenAI"],
                "category": "machine-learning",
                "status": "completed",
                "featured": true,
                "image": "/images/projects/pricepal.jpg"
            },
            {
                "id": "flowbreak",
                "title": "FlowBreak",
                "description": FLOWBREAK_DESCRIPTION,
                "tech": ["React"],
                "category": "web-development",
                "status": "completed",
                "featured": false
            },
            {
                "id": "lab-notes",
                "title": "Lab Notes",
                "description": "Interview transcript tooling.",
                "tech": ["Python"],
                "category": "research",
                "status": "archived"
            }
        ],
        "categories": [
            { "id": "all", "name": "All Projects", "color": "#6B7280" },
            { "id": "machine-learning", "name": "Machine Learning", "color": "#8B5CF6" },
            { "id": "web-development", "name": "Web Development", "color": "#10B981" },
            { "id": "research", "name": "Research" }
        ]
    }))
    .expect("valid project fixture")
}

pub const MARKDOWN_POST_DOC: &str =
    "---\ntitle: Markdown Post\ntags:\n- rust\nfeatured: false\n---\n\n# Markdown Post\n\nFrom disk.\n";
pub const PRICEPAL_DOC: &str = "---\ntitle: PricePal\nstatus: completed\n---\n# PricePal\n\nFull write-up.\n";
pub const DOC_ONLY_DOC: &str = "# Drafted\n\nNo front-matter, no catalog entry.\n";
pub const META_ONLY_DOC: &str = "---\ntitle: Meta Only\ndraft: true\n";

/// A site root on disk: `content/blog`, `content/projects` and the fixture catalog.
pub struct FixtureSite {
    _dir: TempDir,
    pub content_dir: PathBuf,
}

impl FixtureSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let content_dir = dir.path().join("content");
        write(&content_dir.join("blog/markdown-post.md"), MARKDOWN_POST_DOC);
        write(&content_dir.join("blog/doc-only.md"), DOC_ONLY_DOC);
        write(&content_dir.join("blog/meta-only.md"), META_ONLY_DOC);
        write(
            &content_dir.join("blog/broken.md"),
            "---\ntitle: Broken\ntags: [unclosed\n---\nbody\n",
        );
        write(&content_dir.join("projects/pricepal.md"), PRICEPAL_DOC);
        Self {
            _dir: dir,
            content_dir,
        }
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(fixture_blog(), fixture_projects())
    }
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(path, contents).expect("write fixture");
}

type Responder =
    Box<dyn Fn(&ChatCompletionRequest) -> Result<ChatCompletionResponse, OpenAiClientError> + Send + Sync>;

/// In-memory `ChatProvider` that records every call.
pub struct StubProvider {
    configured: bool,
    respond: Responder,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
}

impl StubProvider {
    pub fn new(
        respond: impl Fn(&ChatCompletionRequest) -> Result<ChatCompletionResponse, OpenAiClientError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            configured: true,
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Replies with `text`, reporting `model` as the serving model.
    pub fn replying(text: &str, model: Option<&str>) -> Self {
        let body = json!({
            "id": "chatcmpl-test",
            "model": model,
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }]
        });
        Self::new(move |_| Ok(serde_json::from_value(body.clone()).expect("valid completion")))
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::replying("unreachable", None)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().expect("stub lock").clone()
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("stub lock") = Some(request.clone());
        (self.respond)(request)
    }
}
