use tracing::debug;

use crate::resume::ResumeError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Checks the upload looks like a PDF before handing it to the parser.
pub fn validate_pdf_bytes(bytes: &[u8]) -> Result<(), ResumeError> {
    if bytes.is_empty() {
        return Err(ResumeError::Empty);
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ResumeError::NotPdf);
    }
    Ok(())
}

/// Extracts the text layer of a PDF resume. Callers check the bytes with
/// `validate_pdf_bytes` first.
pub fn extract_text(bytes: &[u8]) -> Result<String, ResumeError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ResumeError::Unreadable(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(ResumeError::NoText);
    }

    debug!("Extracted {} characters from {} byte PDF", text.len(), bytes.len());
    Ok(text)
}

/// One-page resume with a Helvetica text layer.
#[cfg(test)]
pub const RESUME_FIXTURE: &[u8] = include_bytes!("../../fixtures/resume.pdf");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upload_rejected() {
        assert!(matches!(validate_pdf_bytes(b""), Err(ResumeError::Empty)));
    }

    #[test]
    fn test_non_pdf_rejected() {
        assert!(matches!(
            validate_pdf_bytes(b"PK\x03\x04 docx file"),
            Err(ResumeError::NotPdf)
        ));
    }

    #[test]
    fn test_pdf_header_accepted() {
        assert!(validate_pdf_bytes(b"%PDF-1.7\n...").is_ok());
    }

    #[test]
    fn test_extracts_text_layer() {
        let text = extract_text(RESUME_FIXTURE).unwrap();
        assert!(text.contains("Python"), "got: {text:?}");
        assert!(text.contains("SQL"));
        assert!(text.contains("Hobbies"));
    }
}
