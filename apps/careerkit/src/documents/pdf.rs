use crate::errors::AppError;

pub fn extract(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to parse PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_extraction_error() {
        let err = extract(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
