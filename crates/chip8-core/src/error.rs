//! Error types surfaced by program loading.

/// Failure to load a program image into machine memory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The image is larger than the program region can hold.
    #[error("program image is {len} bytes but only {capacity} fit in memory")]
    ImageTooLarge {
        /// Size of the rejected image in bytes.
        len: usize,
        /// Number of bytes the program region can hold.
        capacity: usize,
    },

    /// Reading the image from the filesystem failed.
    #[error("failed to read program image")]
    Io(#[from] std::io::Error),
}
