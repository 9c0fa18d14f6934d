/// Filesystem-backed source that walks a directory of XML files.
pub mod file_source;

/// In-memory source.
pub mod memory_source;
