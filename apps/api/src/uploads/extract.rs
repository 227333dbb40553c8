//! Pure helpers for uploaded documents: type checks, text extraction,
//! keyword extraction and the theme draft proposed from a file.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::models::{FileUpload, NewTheme, Priority};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";

pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_DOC, MIME_DOCX, MIME_TEXT];

const DRAFT_DESCRIPTION_CHARS: usize = 200;
const DRAFT_KEYWORDS: usize = 10;
const MIN_KEYWORD_CHARS: usize = 4;

/// Resolves the MIME type of an upload. A missing or generic content type
/// falls back to the file extension.
pub fn resolve_mime_type(declared: Option<&str>, filename: &str) -> Option<&'static str> {
    let declared = declared
        .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty() && m != "application/octet-stream");
    if let Some(declared) = declared {
        return ALLOWED_MIME_TYPES.iter().copied().find(|m| *m == declared);
    }
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(MIME_PDF),
        "doc" => Some(MIME_DOC),
        "docx" => Some(MIME_DOCX),
        "txt" => Some(MIME_TEXT),
        _ => None,
    }
}

/// Extracts plain text. Word formats are stored without extraction.
pub fn extract_text(mime_type: &str, bytes: &[u8]) -> Result<Option<String>> {
    let text = match mime_type {
        MIME_PDF => pdf_extract::extract_text_from_mem(bytes)
            .context("Failed to extract text from PDF")?,
        MIME_TEXT => String::from_utf8_lossy(bytes).into_owned(),
        _ => return Ok(None),
    };
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Most frequent words of more than three characters, most frequent first.
/// Ties keep the order in which the words first appear.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // stable sort keeps first-appearance order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(max).map(str::to_string).collect()
}

/// Human-readable size using 1024-based units, at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}

/// Object-key-safe version of a client file name.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// File name without its final extension.
fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// A theme proposed from an upload. Not stored until the client submits it.
pub fn theme_draft(upload: &FileUpload) -> NewTheme {
    let text = upload.extracted_text.as_deref().unwrap_or("").trim();

    let description = if text.is_empty() {
        format!(
            "アップロードされたファイル「{}」から作成されたテーマです。",
            upload.original_name
        )
    } else {
        text.chars().take(DRAFT_DESCRIPTION_CHARS).collect()
    };

    let mut keywords = extract_keywords(text, DRAFT_KEYWORDS);
    if keywords.is_empty() {
        let kind = if upload.mime_type == MIME_PDF {
            "pdf"
        } else {
            "document"
        };
        keywords = vec!["file-upload".to_string(), kind.to_string()];
    }

    NewTheme {
        title: file_stem(&upload.original_name).to_string(),
        description,
        keywords,
        category: None,
        priority: Priority::Medium,
        source_url: upload.url.clone(),
        upload_id: Some(upload.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn upload(name: &str, mime: &str, text: Option<&str>) -> FileUpload {
        FileUpload {
            id: Uuid::new_v4(),
            filename: sanitize_filename(name),
            original_name: name.to_string(),
            mime_type: mime.to_string(),
            size: 1024,
            url: None,
            extracted_text: text.map(str::to_string),
            processed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_extract_keywords_counts_and_orders() {
        let text = "Rust, rust! tokio axum. Tokio RUST serde serde";
        assert_eq!(extract_keywords(text, 10), vec!["rust", "tokio", "serde", "axum"]);
        assert_eq!(extract_keywords(text, 2), vec!["rust", "tokio"]);
    }

    #[test]
    fn test_extract_keywords_skips_short_words() {
        assert!(extract_keywords("a an the for", 10).is_empty());
    }

    #[test]
    fn test_extract_keywords_handles_japanese_words() {
        let text = "サステナビリティ 経営 サステナビリティ";
        assert_eq!(extract_keywords(text, 10), vec!["サステナビリティ"]);
    }

    #[test]
    fn test_resolve_mime_type() {
        assert_eq!(resolve_mime_type(Some("application/pdf"), "a.bin"), Some(MIME_PDF));
        assert_eq!(resolve_mime_type(Some("text/plain; charset=utf-8"), "a"), Some(MIME_TEXT));
        assert_eq!(resolve_mime_type(Some("image/png"), "a.pdf"), None);
        assert_eq!(resolve_mime_type(None, "企画書.docx"), Some(MIME_DOCX));
        assert_eq!(
            resolve_mime_type(Some("application/octet-stream"), "memo.txt"),
            Some(MIME_TEXT)
        );
        assert_eq!(resolve_mime_type(None, "noext"), None);
    }

    #[test]
    fn test_extract_text_plain_and_word() {
        assert_eq!(
            extract_text(MIME_TEXT, "  新製品発表  ".as_bytes()).unwrap().as_deref(),
            Some("新製品発表")
        );
        assert!(extract_text(MIME_DOCX, b"PK..").unwrap().is_none());
        assert!(extract_text(MIME_TEXT, b"   ").unwrap().is_none());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("press release.pdf"), "press_release.pdf");
        assert_eq!(sanitize_filename("..."), "upload");
    }

    #[test]
    fn test_theme_draft_from_text() {
        let long = format!("{} serverless", "edge computing platform ".repeat(20));
        let draft = theme_draft(&upload("launch-plan.txt", MIME_TEXT, Some(&long)));
        assert_eq!(draft.title, "launch-plan");
        assert_eq!(draft.description.chars().count(), 200);
        assert_eq!(draft.keywords[0], "edge");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_theme_draft_without_text_uses_defaults() {
        let u = upload("企画書.pdf", MIME_PDF, None);
        let draft = theme_draft(&u);
        assert_eq!(draft.title, "企画書");
        assert!(draft.description.contains("企画書.pdf"));
        assert_eq!(draft.keywords, vec!["file-upload", "pdf"]);
        assert_eq!(draft.upload_id, Some(u.id));

        let draft = theme_draft(&upload("memo.docx", MIME_DOCX, None));
        assert_eq!(draft.keywords, vec!["file-upload", "document"]);
    }
}
