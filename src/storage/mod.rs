mod repository;

pub use repository::{Decoder, Repository};
