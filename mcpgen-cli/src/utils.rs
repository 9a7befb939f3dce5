/// File extension for generated sources in `language`.
pub fn extension_for_language(language: &str) -> &'static str {
    match language.to_ascii_lowercase().as_str() {
        "go" | "golang" => "go",
        "rust" => "rs",
        "python" => "py",
        "typescript" => "ts",
        "javascript" => "js",
        "java" => "java",
        "kotlin" => "kt",
        "c#" | "csharp" => "cs",
        _ => "txt",
    }
}

/// Masks any password embedded in a backend URL before it reaches logs or output.
pub fn redact_url_password(url: &url::Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut redacted = url.clone();
    if redacted.set_password(Some("***")).is_err() {
        return format!("{}://<redacted>", url.scheme());
    }
    redacted.to_string()
}
