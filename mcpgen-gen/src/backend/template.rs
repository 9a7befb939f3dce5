use async_trait::async_trait;

use crate::backend::{BackendError, GenerationBackend};

/// Offline backend: embeds the prompt under a fixed banner. Output depends only on the prompt.
#[derive(Debug, Clone)]
pub struct TemplateBackend {
    comment_prefix: String,
}

impl Default for TemplateBackend {
    fn default() -> Self {
        Self::new("//")
    }
}

impl TemplateBackend {
    pub fn new(comment_prefix: impl Into<String>) -> Self {
        Self {
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Picks the line-comment marker for a target language name.
    pub fn for_language(language: &str) -> Self {
        let prefix = match language.to_ascii_lowercase().as_str() {
            "python" | "ruby" | "shell" | "bash" | "yaml" => "#",
            "sql" | "lua" | "haskell" => "--",
            _ => "//",
        };
        Self::new(prefix)
    }
}

#[async_trait]
impl GenerationBackend for TemplateBackend {
    async fn generate_code(&self, prompt: &str) -> Result<String, BackendError> {
        let p = &self.comment_prefix;
        let mut out = String::with_capacity(prompt.len() * 2 + 128);
        out.push_str(&format!("{p} Code generated by mcpgen (template backend). DO NOT EDIT.\n"));
        out.push_str(&format!("{p} No model was called; the generation request follows.\n{p}\n"));
        for line in prompt.lines() {
            if line.is_empty() {
                out.push_str(&format!("{p}\n"));
            } else {
                out.push_str(&format!("{p} {line}\n"));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeds_prompt_verbatim() {
        let out = TemplateBackend::default()
            .generate_code("line one\n\nline two")
            .await
            .unwrap();
        assert!(out.starts_with("// Code generated by mcpgen"));
        assert!(out.contains("// line one\n//\n// line two\n"));
    }

    #[tokio::test]
    async fn is_deterministic() {
        let backend = TemplateBackend::for_language("python");
        let a = backend.generate_code("x").await.unwrap();
        let b = backend.generate_code("x").await.unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("# "));
    }
}
