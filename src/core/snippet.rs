//! Embed snippet template.

use std::fmt;

use super::extract::FileId;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_ALLOW: &str = "autoplay";

/// Frame attributes substituted into the snippet template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetOptions {
    pub width: u32,
    pub height: u32,
    pub allow: String,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            allow: DEFAULT_ALLOW.to_string(),
        }
    }
}

/// Generated `<iframe>` markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet(String);

impl Snippet {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the preview iframe for `id` with the default frame attributes.
pub fn generate(id: &FileId) -> Snippet {
    generate_with(id, &SnippetOptions::default())
}

/// Build the preview iframe for `id`.
///
/// The identifier is inserted as-is; a `"` in it produces broken markup.
pub fn generate_with(id: &FileId, options: &SnippetOptions) -> Snippet {
    Snippet(format!(
        r#"<iframe src="https://drive.google.com/file/d/{id}/preview" width="{width}" height="{height}" allow="{allow}"></iframe>"#,
        id = id.as_str(),
        width = options.width,
        height = options.height,
        allow = options.allow,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::extract;

    #[test]
    fn default_template_is_exact() {
        let snippet = generate(&FileId::new("ABC123"));
        assert_eq!(
            snippet.as_str(),
            r#"<iframe src="https://drive.google.com/file/d/ABC123/preview" width="640" height="480" allow="autoplay"></iframe>"#
        );
    }

    #[test]
    fn custom_options_change_only_frame_attributes() {
        let options = SnippetOptions {
            width: 800,
            height: 600,
            allow: "autoplay; fullscreen".to_string(),
        };
        let snippet = generate_with(&FileId::new("id1"), &options);
        assert_eq!(
            snippet.as_str(),
            r#"<iframe src="https://drive.google.com/file/d/id1/preview" width="800" height="600" allow="autoplay; fullscreen"></iframe>"#
        );
    }

    #[test]
    fn identifier_is_not_escaped() {
        let snippet = generate(&FileId::new(r#"a"b<c"#));
        assert!(snippet.as_str().contains(r#"/file/d/a"b<c/preview""#));
    }

    #[test]
    fn generated_snippet_does_not_contain_an_id_parameter() {
        let snippet = generate(&FileId::new("ABC123"));
        assert!(extract(snippet.as_str()).is_err());
    }
}
