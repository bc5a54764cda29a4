use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode report: {source}")]
    Encode {
        #[from]
        source: serde_json::Error,
    },
    #[error("failed to write report file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template error: {reason}")]
    Template { reason: String },
    #[error("report upload to '{url}' failed: {source}")]
    Upload {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("report upload to '{url}' rejected with status {status}")]
    UploadStatus { url: String, status: u16 },
    #[error("output:{}", format_multi(.0))]
    Multi(Vec<ExportError>),
}

fn format_multi(errors: &[ExportError]) -> String {
    let mut out = String::new();
    for err in errors {
        out.push_str("\n  - ");
        out.push_str(&err.to_string());
    }
    out
}
