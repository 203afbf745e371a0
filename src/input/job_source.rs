//! Job description loading from inline text or plain text / markdown files

use crate::error::{AtsMatchError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

/// Read a job description file. `.md`/`.markdown` files are rendered to plain text.
pub async fn read_job_description(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let content = fs::read_to_string(path).await?;

    match extension.as_deref() {
        Some("md") | Some("markdown") => markdown_to_text(&content),
        Some("txt") | None => Ok(content),
        Some(other) => Err(AtsMatchError::UnsupportedFormat(format!(
            "Job description must be .txt or .md, got .{}",
            other
        ))),
    }
}

pub fn markdown_to_text(markdown: &str) -> Result<String> {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_to_text(&html_output)
}

fn html_to_text(html: &str) -> Result<String> {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let tags = Regex::new(r"<[^>]*>")
        .map_err(|e| AtsMatchError::InvalidInput(format!("Bad tag pattern: {}", e)))?;
    let clean_text = tags.replace_all(&text, "").replace("&amp;", "&");

    let lines: Vec<&str> = clean_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_markdown_is_flattened() {
        let text = markdown_to_text("## Senior Go Engineer\n\n- **Go**\n- Kubernetes & Helm\n").unwrap();
        assert_eq!(text, "Senior Go Engineer\nGo\nKubernetes & Helm");
    }

    #[tokio::test]
    async fn test_plain_text_file_is_read_verbatim() {
        let mut temp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(temp, "Looking for a Go engineer").unwrap();

        let text = read_job_description(temp.path()).await.unwrap();
        assert_eq!(text, "Looking for a Go engineer");
    }

    #[tokio::test]
    async fn test_other_extensions_rejected() {
        let mut temp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        write!(temp, "%PDF").unwrap();

        let result = read_job_description(temp.path()).await;
        assert!(matches!(result, Err(AtsMatchError::UnsupportedFormat(_))));
    }
}
