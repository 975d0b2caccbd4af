pub mod file_store_client;

#[cfg(test)]
pub(crate) mod testing;

pub use file_store_client::{FileStore, HttpFileStore};
