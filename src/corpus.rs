//! Flat-file corpus of extracted text units.
//!
//! Each processed document becomes `<dir>/<id>.txt`. Reading walks the units in
//! ascending id order and yields tokens lazily, holding one unit in memory at a time.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::constants::corpus::UNIT_EXTENSION;
use crate::errors::ArchiveError;
use crate::transport::fs::is_text_file;
use crate::types::{Token, UnitId};

/// How unit text is split into tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// Split on whitespace only.
    #[default]
    Whitespace,
    /// Split word-character runs from punctuation runs (`\w+|[^\w\s]+`).
    WordPunct,
}

impl TokenizerMode {
    /// Tokenize one unit's text.
    pub fn tokenize(self, text: &str) -> Vec<Token> {
        match self {
            Self::Whitespace => text.split_whitespace().map(str::to_string).collect(),
            Self::WordPunct => word_punct_tokens(text),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn word_punct_tokens(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let mut current = String::new();
        let mut current_is_word = None;
        for ch in chunk.chars() {
            let is_word = is_word_char(ch);
            if current_is_word.is_some_and(|prev| prev != is_word) {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(ch);
            current_is_word = Some(is_word);
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }
    tokens
}

/// A persisted text unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextUnit {
    /// Sequential unit id.
    pub id: UnitId,
    /// Normalized extracted text.
    pub text: String,
}

/// Directory-backed store of text units.
#[derive(Clone, Debug)]
pub struct CorpusStore {
    dir: PathBuf,
    tokenizer: TokenizerMode,
}

impl CorpusStore {
    /// Create a store rooted at `dir` (nothing is touched until the first call).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tokenizer: TokenizerMode::default(),
        }
    }

    /// Override the tokenizer used by [`CorpusStore::tokens`].
    pub fn with_tokenizer(mut self, tokenizer: TokenizerMode) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Directory holding the units.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the unit with `id`.
    pub fn unit_path(&self, id: UnitId) -> PathBuf {
        self.dir.join(format!("{id}.{UNIT_EXTENSION}"))
    }

    /// Create the directory and remove units left by an earlier run.
    pub fn prepare(&self) -> Result<(), ArchiveError> {
        fs::create_dir_all(&self.dir).map_err(|err| ArchiveError::storage(&self.dir, err))?;
        self.clear()
    }

    /// Remove every persisted unit. Other files in the directory are left alone.
    pub fn clear(&self) -> Result<(), ArchiveError> {
        for id in self.unit_ids()? {
            let path = self.unit_path(id);
            fs::remove_file(&path).map_err(|err| ArchiveError::storage(&path, err))?;
        }
        Ok(())
    }

    /// Persist `text` as the only content of unit `id`, replacing any earlier unit.
    pub fn write(&self, id: UnitId, text: &str) -> Result<(), ArchiveError> {
        let path = self.unit_path(id);
        debug!(path = %path.display(), "writing text unit");
        fs::write(&path, text.as_bytes()).map_err(|err| ArchiveError::storage(&path, err))
    }

    /// Read one unit back.
    pub fn read_unit(&self, id: UnitId) -> Result<TextUnit, ArchiveError> {
        let path = self.unit_path(id);
        let text = fs::read_to_string(&path).map_err(|err| ArchiveError::storage(&path, err))?;
        Ok(TextUnit { id, text })
    }

    /// Ids of all persisted units, ascending. A missing directory holds no units.
    pub fn unit_ids(&self) -> Result<Vec<UnitId>, ArchiveError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(&self.dir).to_path_buf();
                ArchiveError::storage(path, err.into())
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_text_file(path) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<UnitId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Lazy token stream over every unit.
    ///
    /// Each call lists the directory afresh, so the stream can be re-read.
    pub fn tokens(&self) -> Result<CorpusTokens, ArchiveError> {
        Ok(CorpusTokens {
            store: self.clone(),
            pending_units: self.unit_ids()?.into_iter(),
            buffered: VecDeque::new(),
            failed: false,
        })
    }
}

/// Iterator over corpus tokens, reading one unit at a time.
///
/// A storage failure is yielded once as an error and ends the stream.
#[derive(Debug)]
pub struct CorpusTokens {
    store: CorpusStore,
    pending_units: vec::IntoIter<UnitId>,
    buffered: VecDeque<Token>,
    failed: bool,
}

impl Iterator for CorpusTokens {
    type Item = Result<Token, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(token) = self.buffered.pop_front() {
                return Some(Ok(token));
            }
            let id = self.pending_units.next()?;
            match self.store.read_unit(id) {
                Ok(unit) => self.buffered = self.store.tokenizer.tokenize(&unit.text).into(),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
