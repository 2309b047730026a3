use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported export format: '{0}'")]
    UnsupportedFormat(String),
}
