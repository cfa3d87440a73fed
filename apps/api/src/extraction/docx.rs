use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use zip::ZipArchive;

use crate::extraction::{join_non_empty, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";
/// WordprocessingML main namespace. Elements are matched by this URI, not by prefix.
const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Extracts the text of every body paragraph, in document order.
///
/// Only top-level paragraphs count: paragraphs inside tables or text boxes
/// are not part of the document body.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    Ok(join_non_empty(body_paragraphs(&xml)?))
}

/// Walks `document.xml` and returns the raw text of each body paragraph.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = NsReader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut in_text = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| ExtractionError::Docx(format!("malformed XML: {e}")))?;
        let wordml = is_wordml(&ns);
        // Only the outermost paragraph of the body contributes text.
        let collecting = table_depth == 0 && paragraph_depth == 1;

        match event {
            Event::Start(e) if wordml => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" => {
                    paragraph_depth += 1;
                    if table_depth == 0 && paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if wordml && collecting => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if collecting && in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("bad text node: {e}")))?;
                current.push_str(&text);
            }
            Event::End(e) if wordml => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" => {
                    if collecting {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn is_wordml(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == WORDML_NS)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Wraps paragraph XML in a minimal `word/document.xml` and zips it.
    pub(crate) fn build_docx(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        );
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    pub(crate) fn paragraph(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    #[test]
    fn test_empty_paragraphs_skipped_order_kept() {
        let body = [
            paragraph("Jane Doe"),
            "<w:p/>".to_string(),
            paragraph("Senior Engineer"),
            "<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr></w:p>".to_string(),
            paragraph("   "),
            paragraph("Rust &amp; Go"),
        ]
        .concat();
        let docx = build_docx(&body);
        assert_eq!(extract(&docx).unwrap(), "Jane Doe Senior Engineer Rust & Go");
    }

    #[test]
    fn test_runs_within_a_paragraph_are_concatenated() {
        let body = r#"<w:p><w:r><w:t>Led</w:t></w:r><w:r><w:t xml:space="preserve"> a team of </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>six</w:t></w:r></w:p>"#;
        assert_eq!(extract(&build_docx(body)).unwrap(), "Led a team of six");
    }

    #[test]
    fn test_tabs_and_breaks_inside_paragraph() {
        let body = r#"<w:p><w:r><w:t>2019</w:t><w:tab/><w:t>Acme</w:t><w:br/><w:t>Berlin</w:t></w:r></w:p>"#;
        assert_eq!(
            body_paragraphs(&format!(
                r#"<w:body xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{body}</w:body>"#
            ))
            .unwrap(),
            vec!["2019\tAcme\nBerlin".to_string()]
        );
    }

    #[test]
    fn test_namespace_bound_to_another_prefix() {
        let xml = r#"<x:document xmlns:x="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><x:body><x:p><x:r><x:t>Jane Doe</x:t></x:r></x:p><x:p/><x:p><x:r><x:t>Staff Engineer</x:t></x:r></x:p></x:body></x:document>"#;
        assert_eq!(
            body_paragraphs(xml).unwrap(),
            vec!["Jane Doe".to_string(), "Staff Engineer".to_string()]
        );
    }

    #[test]
    fn test_default_namespace() {
        let xml = r#"<document xmlns="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><body><p><r><t>Rust</t><tab/><t>Go</t></r></p></body></document>"#;
        assert_eq!(body_paragraphs(xml).unwrap(), vec!["Rust\tGo".to_string()]);
    }

    #[test]
    fn test_elements_from_other_namespaces_ignored() {
        let body = format!(
            r#"{}<a:p xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:r><a:t>Shape caption</a:t></a:r></a:p>"#,
            paragraph("Body text")
        );
        assert_eq!(extract(&build_docx(&body)).unwrap(), "Body text");
    }

    #[test]
    fn test_table_paragraphs_are_not_body_paragraphs() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            paragraph("Before"),
            paragraph("Cell"),
            paragraph("After")
        );
        assert_eq!(extract(&build_docx(&body)).unwrap(), "Before After");
    }

    #[test]
    fn test_missing_document_part_is_an_error() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(msg) if msg.contains("word/document.xml")));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(b"<w:document><w:body><w:p></w:body></w:document>")
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(extract(&bytes).is_err());
    }
}
