//! An uploaded file as received from a multipart form.

use bytes::Bytes;

/// Raw uploaded file. Validation happens in `MediaStore::save`.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Client-supplied file name, used only for its extension.
    pub filename: String,
    /// File contents.
    pub data: Bytes,
}
