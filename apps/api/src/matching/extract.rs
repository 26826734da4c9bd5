//! Text extraction for stored resume documents.
//!
//! Extraction never fails outward: a missing file, a corrupt archive or a PDF
//! the parser chokes on all come back as an empty string. Callers treat empty
//! text as "could not read" and decide the client-facing error themselves.

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

const DOCX_BODY_ENTRY: &str = "word/document.xml";
/// Maximum decompressed bytes read from the DOCX body (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Format tag inferred from the stored file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Docx,
    Pdf,
    Unknown,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") => DocumentFormat::Text,
            Some("docx") => DocumentFormat::Docx,
            Some("pdf") => DocumentFormat::Pdf,
            _ => DocumentFormat::Unknown,
        }
    }
}

/// Path to a stored document plus its inferred format. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self { path, format }
    }
}

/// Returns the document's text, or `""` on any failure.
pub fn extract_text(doc: &DocumentRef) -> String {
    if !doc.path.exists() {
        debug!(path = %doc.path.display(), "document missing, nothing to extract");
        return String::new();
    }

    let bytes = match std::fs::read(&doc.path) {
        Ok(b) => b,
        Err(e) => {
            warn!(path = %doc.path.display(), "failed to read document: {e}");
            return String::new();
        }
    };

    match doc.format {
        DocumentFormat::Text | DocumentFormat::Unknown => decode_utf8_ignoring_invalid(&bytes),
        DocumentFormat::Docx => extract_docx(&bytes).unwrap_or_else(|e| {
            warn!(path = %doc.path.display(), "DOCX extraction failed: {e}");
            String::new()
        }),
        DocumentFormat::Pdf => extract_pdf(&bytes).unwrap_or_else(|e| {
            warn!(path = %doc.path.display(), "PDF extraction failed: {e}");
            String::new()
        }),
    }
}

/// UTF-8 decode that drops invalid byte sequences instead of substituting them.
pub fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

fn extract_pdf(bytes: &[u8]) -> Result<String, String> {
    // pdf-extract panics on some malformed inputs; contain it here.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));
    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("PDF parser panicked".to_string()),
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let entry = archive
        .by_name(DOCX_BODY_ENTRY)
        .map_err(|e| format!("{DOCX_BODY_ENTRY}: {e}"))?;

    let mut xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut xml)
        .map_err(|e| e.to_string())?;
    if xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(format!("{DOCX_BODY_ENTRY} exceeds size limit"));
    }

    docx_paragraphs(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Paragraph texts of a WordprocessingML body, in the order each paragraph
/// closes. A paragraph nested in another (text boxes) is emitted on its own,
/// ahead of the paragraph that contains it.
fn docx_paragraphs(xml: &[u8]) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut open: Vec<ParagraphFrame> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(ParagraphFrame::default()),
                b"r" => {
                    if let Some(frame) = open.last_mut() {
                        frame.run_depth += 1;
                    }
                }
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                // tab stops under w:pPr are layout, not content
                b"tab" => push_run_text(&mut open, "\t"),
                b"br" | b"cr" => push_run_text(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Text(te)) if in_text_run => {
                let text = te.unescape().map_err(|e| e.to_string())?;
                if let Some(frame) = open.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"r" => {
                    if let Some(frame) = open.last_mut() {
                        frame.run_depth = frame.run_depth.saturating_sub(1);
                    }
                }
                b"p" => {
                    if let Some(frame) = open.pop() {
                        paragraphs.push(frame.text);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[derive(Default)]
struct ParagraphFrame {
    text: String,
    run_depth: usize,
}

fn push_run_text(open: &mut [ParagraphFrame], text: &str) {
    if let Some(frame) = open.last_mut() {
        if frame.run_depth > 0 {
            frame.text.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, body_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types/>"#).unwrap();
        zip.start_file(DOCX_BODY_ENTRY, options).unwrap();
        zip.write_all(body_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    fn document_xml(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{paragraphs}</w:body></w:document>"#
        )
    }

    #[test]
    fn test_format_inferred_from_extension() {
        assert_eq!(DocumentRef::new("a/cv.txt").format, DocumentFormat::Text);
        assert_eq!(DocumentRef::new("a/cv.DOCX").format, DocumentFormat::Docx);
        assert_eq!(DocumentRef::new("a/cv.Pdf").format, DocumentFormat::Pdf);
        assert_eq!(DocumentRef::new("a/cv.doc").format, DocumentFormat::Unknown);
        assert_eq!(DocumentRef::new("a/cv").format, DocumentFormat::Unknown);
    }

    #[test]
    fn test_missing_path_is_empty_for_every_format() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gone.txt", "gone.docx", "gone.pdf", "gone.bin"] {
            let doc = DocumentRef::new(dir.path().join(name));
            assert_eq!(extract_text(&doc), "", "{name}");
        }
    }

    #[test]
    fn test_plain_text_drops_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, b"Rust \xff\xfeengineer caf\xc3\xa9").unwrap();

        let text = extract_text(&DocumentRef::new(&path));
        assert_eq!(text, "Rust engineer café");
    }

    #[test]
    fn test_unknown_format_best_effort_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0 Kubernetes operator").unwrap();

        let text = extract_text(&DocumentRef::new(&path));
        assert!(text.contains("Kubernetes operator"));
        assert!(!text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        write_docx(
            &path,
            &document_xml(
                r#"<w:p><w:r><w:t>Senior</w:t></w:r><w:r><w:t xml:space="preserve"> Rust Engineer</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Tokio</w:t><w:tab/><w:t>Axum &amp; SQLx</w:t></w:r></w:p>"#,
            ),
        );

        let text = extract_text(&DocumentRef::new(&path));
        assert_eq!(text, "Senior Rust Engineer\n\nTokio\tAxum & SQLx");
    }

    #[test]
    fn test_docx_ignores_non_text_elements() {
        let xml = document_xml(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Skills</w:t></w:r></w:p>"#,
        );
        let paragraphs = docx_paragraphs(xml.as_bytes()).unwrap();
        assert_eq!(paragraphs, vec!["Skills"]);
    }

    #[test]
    fn test_docx_without_body_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        assert_eq!(extract_text(&DocumentRef::new(&path)), "");
    }

    #[test]
    fn test_corrupt_docx_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        assert_eq!(extract_text(&DocumentRef::new(&path)), "");
    }

    #[test]
    fn test_docx_text_box_keeps_outer_paragraph() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Rust</w:t></w:r><w:r><w:drawing><wps:txbx><w:txbxContent><w:p><w:r><w:t>Sidebar</w:t></w:r></w:p></w:txbxContent></wps:txbx></w:drawing></w:r><w:r><w:t xml:space="preserve"> Kafka</w:t></w:r></w:p>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Go</w:t></w:r></w:p>"#,
        );
        let paragraphs = docx_paragraphs(xml.as_bytes()).unwrap();
        assert_eq!(paragraphs, vec!["Sidebar", "Rust Kafka", "Go"]);
    }

    #[test]
    fn test_docx_tab_stop_in_text_box_paragraph_is_not_content() {
        let xml = document_xml(
            r#"<w:p><w:r><w:txbxContent><w:p><w:pPr><w:tabs><w:tab w:pos="360"/></w:tabs></w:pPr><w:r><w:t>Kubernetes</w:t><w:tab/><w:t>Helm</w:t></w:r></w:p></w:txbxContent></w:r></w:p>"#,
        );
        let paragraphs = docx_paragraphs(xml.as_bytes()).unwrap();
        assert_eq!(paragraphs, vec!["Kubernetes\tHelm", ""]);
    }

    /// Single-page PDF with one Helvetica text-show operation and a correct
    /// xref table.
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>".to_string(),
            format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_pdf_text_is_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, minimal_pdf("Rust Kafka Engineer")).unwrap();

        let text = extract_text(&DocumentRef::new(&path));
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["Rust", "Kafka", "Engineer"]);
    }

    #[test]
    fn test_corrupt_pdf_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4 truncated garbage").unwrap();

        assert_eq!(extract_text(&DocumentRef::new(&path)), "");
    }

    #[test]
    fn test_decode_keeps_valid_utf8_intact() {
        assert_eq!(decode_utf8_ignoring_invalid("naïve résumé".as_bytes()), "naïve résumé");
        assert_eq!(decode_utf8_ignoring_invalid(b""), "");
    }
}
