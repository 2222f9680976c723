pub mod ddb_repository;
pub mod issuer;
pub mod repository;
pub mod types;

pub use repository::{CreateRecognitionError, RecognitionsRepository};
pub use types::Recognition;
