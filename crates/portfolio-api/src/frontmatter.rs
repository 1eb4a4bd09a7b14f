use serde_json::{Map, Value};

use crate::error::AppError;

const FENCE: &str = "---";

/// A Markdown document split into its YAML front-matter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub frontmatter: Map<String, Value>,
    pub body: String,
}

/// Splits `source` into front-matter and body.
///
/// Front-matter is only recognized when the very first line is `---`; the
/// block runs to the next `---` line (or to the end of the source, leaving an
/// empty body) and must be a YAML mapping. Without an opening fence the whole
/// source is the body.
pub fn parse(source: &str) -> Result<Document, AppError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(Document::default());
    };
    if !is_fence(first) {
        return Ok(Document {
            frontmatter: Map::new(),
            body: source.to_string(),
        });
    }

    let mut offset = first.len();
    for line in lines {
        if is_fence(line) {
            let yaml = &source[first.len()..offset];
            let body = &source[offset + line.len()..];
            return Ok(Document {
                frontmatter: parse_yaml(yaml)?,
                body: body.to_string(),
            });
        }
        offset += line.len();
    }

    // No closing fence: everything after the opening one is front-matter.
    Ok(Document {
        frontmatter: parse_yaml(&source[first.len()..])?,
        body: String::new(),
    })
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == FENCE
}

/// Scalars keep their YAML spelling: an unquoted `date: 2024-05-01` stays the
/// string `"2024-05-01"` rather than becoming a timestamp.
fn parse_yaml(yaml: &str) -> Result<Map<String, Value>, AppError> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|e| AppError::Parse {
        // +1 for the opening fence
        line: e.location().map(|l| l.line() + 1).unwrap_or(1),
        message: e.to_string(),
    })?;

    if value.is_null() {
        return Ok(Map::new());
    }
    match serde_json::to_value(&value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Parse {
            line: 2,
            message: "front-matter must be a mapping".to_string(),
        }),
        Err(e) => Err(AppError::Parse {
            line: 2,
            message: format!("front-matter is not representable as JSON: {e}"),
        }),
    }
}
