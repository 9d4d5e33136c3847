pub mod error;
pub mod images;
pub mod layout;
pub mod rows;
pub mod summary;

pub use error::StoreError;
pub use images::{compose_vertical, write_composite, write_png};
pub use layout::OutputLayout;
pub use rows::{append_identity, append_row, append_triple, read_triples, truncate};
pub use summary::{summarize_dir, write_summary};
