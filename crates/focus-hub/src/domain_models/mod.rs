mod repository_summary;

pub use repository_summary::{RepositorySummary, LOAD_FAILED_DESCRIPTION};
