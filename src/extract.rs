use std::path::Path;

use anyhow::{Context, Result, bail};
use lopdf::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: only PDF and TXT files are supported.")]
    UnsupportedFormat,

    #[error("Could not read the PDF file.")]
    UnreadablePdf(#[source] lopdf::Error),

    #[error("Could not decode the TXT file as UTF-8.")]
    UnreadableText(#[source] std::str::Utf8Error),

    #[error("No readable text found in the document.")]
    EmptyDocument,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Txt,
}

/// Decides how a file will be read from its name alone, so unsupported
/// formats can be rejected before any bytes are touched.
pub fn detect_format(file_name: &str) -> Result<DocumentFormat, ExtractError> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        Ok(DocumentFormat::Pdf)
    } else if lower.ends_with(".txt") {
        Ok(DocumentFormat::Txt)
    } else {
        Err(ExtractError::UnsupportedFormat)
    }
}

/// Returns the textual content of an uploaded document.
///
/// PDFs are read page by page with a newline between pages; TXT files are
/// decoded as UTF-8 and returned verbatim.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    match detect_format(file_name)? {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Txt => extract_txt(bytes),
    }
}

/// Convenience wrapper around [`extract_text`] for on-disk files.
pub fn extract_from_path(path: &Path) -> Result<String> {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        bail!("Not a file path: {}", path.display());
    };

    // Reject unsupported extensions without reading the file at all.
    detect_format(file_name)?;

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read document at {}", path.display()))?;
    Ok(extract_text(file_name, &bytes)?)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(ExtractError::UnreadablePdf)?;

    let mut text = String::new();
    for (page_number, _page_id) in doc.get_pages() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(ExtractError::UnreadablePdf)?;
        if !page_text.is_empty() {
            text.push_str(&page_text);
            text.push('\n');
        }
    }

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    Ok(text)
}

fn extract_txt(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = std::str::from_utf8(bytes).map_err(ExtractError::UnreadableText)?;
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use std::io::Write;

    fn one_page_pdf(page_text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(page_text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content should encode"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should serialize");
        bytes
    }

    #[test]
    fn txt_content_is_returned_verbatim() {
        let content = "line one\nline two\n";
        let text = extract_text("notes.txt", content.as_bytes()).unwrap();
        assert_eq!(text, content);
    }

    #[test]
    fn txt_extension_is_case_insensitive() {
        let text = extract_text("NOTES.TXT", b"hello").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn invalid_utf8_txt_fails() {
        let err = extract_text("notes.txt", &[0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, ExtractError::UnreadableText(_)));
    }

    #[test]
    fn unsupported_extension_names_supported_formats() {
        let err = extract_text("notes.docx", b"irrelevant").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat));
        assert!(err.to_string().contains("PDF and TXT"));
    }

    #[test]
    fn pdf_text_is_extracted() {
        let bytes = one_page_pdf("Hello World!");
        let text = extract_text("doc.pdf", &bytes).unwrap();
        assert!(text.contains("Hello World"));
    }

    #[test]
    fn garbage_pdf_bytes_fail_as_unreadable() {
        let err = extract_text("doc.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::UnreadablePdf(_)));
    }

    #[test]
    fn whitespace_only_pdf_fails_as_empty() {
        let bytes = one_page_pdf("   ");
        let err = extract_text("doc.pdf", &bytes).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyDocument));
    }

    #[test]
    fn extract_from_path_reads_txt_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        file.write_all(b"from disk").unwrap();
        let text = extract_from_path(file.path()).unwrap();
        assert_eq!(text, "from disk");
    }

    #[test]
    fn extract_from_path_rejects_unsupported_without_reading() {
        // The path doesn't exist; if the extension check didn't come first,
        // this would fail with an IO error instead.
        let err = extract_from_path(Path::new("missing.docx")).unwrap_err();
        assert!(err.to_string().contains("PDF and TXT"));
    }
}
