use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Filesystem transport that lists document files under a root.
pub struct FileStream {
    root: PathBuf,
    follow_links: bool,
}

impl FileStream {
    /// Create a stream rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Every regular file under the root accepted by `keep`, in sorted path order.
    ///
    /// Entries that cannot be read while walking are skipped.
    pub fn list_files(&self, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(&self.root);
        if self.follow_links {
            walker = walker.follow_links(true);
        }
        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| keep(path))
            .collect();
        files.sort();
        files
    }
}

/// True if the path has the given extension (case-insensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// True if the path has a `.txt` extension (case-insensitive).
pub fn is_text_file(path: &Path) -> bool {
    has_extension(path, "txt")
}

/// True if the path has a `.xml` extension (case-insensitive).
pub fn is_xml_file(path: &Path) -> bool {
    has_extension(path, "xml")
}
