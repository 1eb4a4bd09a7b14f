use serde::{Deserialize, Serialize};

/// Declares a catalog enum that reads and writes its kebab-case id.
///
/// Ids outside the known set are kept verbatim in `Other`, so a free-text
/// category survives a round trip and still matches its own taxonomy entry.
macro_rules! catalog_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $id:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Id as stored in the catalog.
            pub fn id(&self) -> &str {
                match self {
                    $($name::$variant => $id,)+
                    $name::Other(id) => id,
                }
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                match id.as_str() {
                    $($id => $name::$variant,)+
                    _ => $name::Other(id),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(id) => id,
                    known => known.id().to_string(),
                }
            }
        }
    };
}

catalog_enum!(BlogCategory {
    Technical => "technical",
    Personal => "personal",
});

catalog_enum!(ProjectCategory {
    MachineLearning => "machine-learning",
    Finance => "finance",
    WebDevelopment => "web-development",
    Creative => "creative",
});

catalog_enum!(ProjectStatus {
    Completed => "completed",
    InProgress => "in-progress",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub date: String,
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Project {
    /// Markdown body used when a project has no document of its own.
    pub fn fallback_body(&self) -> String {
        format!("# {}\n\n{}", self.title, self.description)
    }
}

/// Entry in a catalog's category taxonomy, e.g. `{ "id": "all", "name": "All Posts" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blog_post_reads_camel_case_fields() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": "first-post",
            "title": "First Post",
            "excerpt": "short",
            "date": "2024-03-01",
            "category": "technical",
            "tags": ["rust", "web"],
            "readTime": "5 min read",
            "featured": true
        }))
        .unwrap();
        assert_eq!(post.category, BlogCategory::Technical);
        assert_eq!(post.read_time.as_deref(), Some("5 min read"));
        assert_eq!(post.tags, vec!["rust", "web"]);
        assert!(post.content.is_none());
    }

    #[test]
    fn unknown_ids_are_kept_verbatim() {
        let project: Project = serde_json::from_value(json!({
            "id": "x",
            "title": "X",
            "description": "d",
            "category": "research",
            "status": "archived"
        }))
        .unwrap();
        assert_eq!(project.category, ProjectCategory::Other("research".to_string()));
        assert_eq!(project.category.id(), "research");
        assert_eq!(project.status, ProjectStatus::Other("archived".to_string()));
        assert!(!project.featured);

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["category"], "research");
        assert_eq!(value["status"], "archived");
    }

    #[test]
    fn other_is_an_ordinary_id() {
        let category: BlogCategory = serde_json::from_value(json!("other")).unwrap();
        assert_eq!(category, BlogCategory::Other("other".to_string()));
        assert_eq!(serde_json::to_value(&category).unwrap(), "other");
    }

    #[test]
    fn project_omits_absent_links() {
        let project: Project = serde_json::from_value(json!({
            "id": "greenwings",
            "title": "GreenWings",
            "description": "Carbon-aware routing",
            "tech": ["Python"],
            "category": "web-development",
            "status": "in-progress",
            "github": "https://github.com/example/greenwings"
        }))
        .unwrap();
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["category"], "web-development");
        assert_eq!(value["status"], "in-progress");
        assert!(value.get("demo").is_none());
        assert_eq!(value["github"], "https://github.com/example/greenwings");
    }

    #[test]
    fn fallback_body_is_title_heading_then_description() {
        let project: Project = serde_json::from_value(json!({
            "id": "flowbreak",
            "title": "FlowBreak",
            "description": "A productivity web app.",
            "category": "web-development",
            "status": "completed"
        }))
        .unwrap();
        assert_eq!(project.fallback_body(), "# FlowBreak\n\nA productivity web app.");
    }
}
