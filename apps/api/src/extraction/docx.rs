//! DOCX text extraction: reads `word/document.xml` out of the OOXML archive
//! and flattens its runs into plain text.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::AppError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Matches text runs (group 1) and the structural tags that produce whitespace (group 2).
static RUN_OR_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<(/w:p|/w:tc|w:tab|w:br|w:cr)\b[^>]*>")
        .expect("static regex")
});

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x?)([0-9a-fA-F]+);").expect("static regex"));

pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Failed to extract text from DOCX: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| AppError::Extraction(format!("Failed to extract text from DOCX: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("Failed to extract text from DOCX: {e}")))?;

    Ok(document_xml_to_text(&xml))
}

/// Paragraph ends become newlines; table cells, tabs and breaks become separators.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len() / 4);

    for caps in RUN_OR_BREAK.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            out.push_str(&unescape_xml(run.as_str()));
            continue;
        }
        match caps.get(2).map(|m| m.as_str()) {
            Some("/w:p") | Some("w:br") | Some("w:cr") => out.push('\n'),
            Some(_) => out.push(' '),
            None => {}
        }
    }

    out
}

fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let decoded = NUMERIC_ENTITY.replace_all(s, |caps: &regex::Captures<'_>| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    decoded
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const SAMPLE: &str = r#"<?xml version="1.0"?>
        <w:document><w:body>
          <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Experience</w:t></w:r></w:p>
          <w:p><w:r><w:t xml:space="preserve">Built APIs in </w:t></w:r><w:r><w:t>Rust &amp; Go</w:t></w:r></w:p>
          <w:tbl><w:tr><w:tc><w:p><w:r><w:t>AWS</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Docker</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
        </w:body></w:document>"#;

    #[test]
    fn test_paragraphs_become_lines() {
        let text = document_xml_to_text(SAMPLE);
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines[0], "Experience");
        assert_eq!(lines[1], "Built APIs in Rust & Go");
        assert!(text.contains("AWS"));
        assert!(text.contains("Docker"));
    }

    #[test]
    fn test_paragraph_properties_are_not_breaks() {
        let text = document_xml_to_text("<w:p><w:pPr/><w:r><w:t>One</w:t></w:r></w:p>");
        assert_eq!(text, "One\n");
    }

    #[test]
    fn test_tabs_become_spaces() {
        let text = document_xml_to_text("<w:r><w:t>A</w:t><w:tab/><w:t>B</w:t></w:r>");
        assert_eq!(text, "A B");
    }

    #[test]
    fn test_entities_are_unescaped() {
        assert_eq!(unescape_xml("C&amp;&lt;&gt;&quot;&apos;"), "C&<>\"'");
        assert_eq!(unescape_xml("caf&#233; &#x263A;"), "café ☺");
    }

    #[test]
    fn test_docx_archive_roundtrip() {
        let bytes = build_docx(SAMPLE);
        let text = extract_text(&bytes).unwrap();
        assert!(text.contains("Built APIs in Rust & Go"));
    }

    #[test]
    fn test_archive_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text(&bytes).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_non_zip_bytes_fail() {
        assert!(matches!(
            extract_text(b"plain text").unwrap_err(),
            AppError::Extraction(_)
        ));
    }
}
