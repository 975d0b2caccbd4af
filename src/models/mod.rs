pub mod document_type;
pub mod language;
pub mod loaders;
pub mod manifest;
pub mod upload;
pub mod upload_form;

pub use document_type::DocumentType;
pub use language::Language;
pub use loaders::{load_all_manifests, load_manifest};
pub use manifest::{DocumentManifest, ManifestBatch};
pub use upload::{FileBlob, PendingUpload};
pub use upload_form::{FormField, UploadForm};
