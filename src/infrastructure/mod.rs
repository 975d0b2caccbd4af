pub mod file_picker;

pub use file_picker::{AcceptFilter, FilePicker};
