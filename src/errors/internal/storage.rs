use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Image is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Image is empty")]
    Empty,

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Storage error: {operation} failed: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}
