mod file_contact_repository;
pub mod line_codec;
mod traits;

pub use file_contact_repository::FileContactRepository;
pub use traits::{ContactRepository, LoadReport};
