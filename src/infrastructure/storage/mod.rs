//! Local filesystem storage for uploaded images.

mod upload_store;

pub use upload_store::{make_filename, PendingUpload, UploadError, UploadStore, UploadedImage};
