use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("No listing table found on the page. Selector: {0}")]
    MissingTable(String),
    #[error("None of the first {rows} rows is a header row labelled '{label}'")]
    HeaderRowNotFound { label: &'static str, rows: usize },
    #[error("The listing header has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("Row {row} has {cells} cells, at least {needed} are required")]
    RowTooShort {
        row: usize,
        cells: usize,
        needed: usize,
    },
    #[error("Row {row}: the '{column}' cell has no {element}")]
    MissingElement {
        row: usize,
        column: &'static str,
        element: &'static str,
    },

    #[error("Output file {} has an unexpected header: {found}", .path.display())]
    OutputHeaderMismatch { path: PathBuf, found: String },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
