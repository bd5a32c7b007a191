use std::path::Path;

use serde::{Deserialize, Serialize};

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Upload metadata checked before a document is accepted for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Validation verdict. Rejections are data, not errors, so callers can show the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCheck {
    pub valid: bool,
    pub message: String,
}

impl DocumentCheck {
    fn rejected(message: String) -> Self {
        Self {
            valid: false,
            message,
        }
    }
}

pub fn validate_document(upload: &DocumentUpload) -> DocumentCheck {
    let extension = Path::new(&upload.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let Some(extension) = extension.filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    else {
        return DocumentCheck::rejected(format!(
            "File type not allowed. Allowed: {}",
            ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    };

    if upload.size_bytes == 0 {
        return DocumentCheck::rejected("File is empty".to_string());
    }

    if upload.size_bytes > MAX_DOCUMENT_BYTES {
        return DocumentCheck::rejected(format!(
            "File too large. Maximum size is {} MB",
            MAX_DOCUMENT_BYTES / (1024 * 1024)
        ));
    }

    DocumentCheck {
        valid: true,
        message: format!("{} document accepted", extension.to_ascii_uppercase()),
    }
}
