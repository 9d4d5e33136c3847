pub mod batch;
pub mod error;
pub mod parser;
pub mod recognizer;

pub use batch::{reconcile_dir, ParseFailure, ReconcileReport};
pub use error::{OcrError, ParseError};
pub use parser::{OcrLocale, ReactionParser};
pub use recognizer::{TesseractCli, TextRecognizer};
