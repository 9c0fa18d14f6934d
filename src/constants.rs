/// Constants used by finding-aid detection and element extraction.
pub mod extraction {
    /// Opening marker of the EAD root element.
    pub const EAD_ROOT_MARKER: &str = "<ead ";
    /// Marker of the EAD header element.
    pub const EAD_HEADER_MARKER: &str = "eadheader";
    /// Descriptive elements scanned for narrative text by default.
    pub const DEFAULT_TARGET_TAGS: [&str; 3] = ["scopecontent", "processinfo", "arrangement"];
    /// Paragraph element whose first occurrence under a target tag supplies the text.
    pub const PARAGRAPH_TAG: &str = "p";
    /// Element whose first occurrence supplies the archival year.
    pub const DATE_TAG: &str = "date";
    /// Attribute carrying the machine-readable form of a date.
    pub const DATE_NORMAL_ATTR: &str = "normal";
    /// UTF-8 byte-order mark stripped before decoding.
    pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
    /// Named entities resolved in element text: the XML set plus the HTML
    /// entities EAD DTD exports commonly carry. Unknown names stay verbatim.
    pub const NAMED_ENTITIES: [(&str, &str); 20] = [
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{a0}"),
        ("ndash", "\u{2013}"),
        ("mdash", "\u{2014}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("ldquo", "\u{201c}"),
        ("rdquo", "\u{201d}"),
        ("hellip", "\u{2026}"),
        ("sect", "\u{a7}"),
        ("copy", "\u{a9}"),
        ("deg", "\u{b0}"),
        ("eacute", "\u{e9}"),
        ("egrave", "\u{e8}"),
        ("uuml", "\u{fc}"),
        ("ouml", "\u{f6}"),
    ];
}

/// Constants used by the on-disk corpus layout.
pub mod corpus {
    /// Extension of persisted text units (`<id>.txt`).
    pub const UNIT_EXTENSION: &str = "txt";
    /// Default directory for persisted text units.
    pub const DEFAULT_CORPUS_DIR: &str = "./txtFiles";
    /// Default path of the archival-year side artifact.
    pub const DEFAULT_YEARS_PATH: &str = "./dates.txt";
    /// Environment variable that may supply the corpus directory.
    pub const CORPUS_DIR_ENV: &str = "EAD_CORPUS_DIR";
}

/// Constants used by collocation counting, filtering, and scoring.
pub mod collocation {
    /// Shortest phrase order that is scored.
    pub const MIN_ORDER: usize = 2;
    /// Longest phrase order that is scored.
    pub const MAX_ORDER: usize = 4;
    /// Phrases seen fewer times than this are dropped.
    pub const DEFAULT_MIN_FREQUENCY: u64 = 2;
    /// Number of ranked phrases returned per order.
    pub const DEFAULT_TOP_K: usize = 100;
    /// Tokens shorter than this (in characters) disqualify a phrase.
    pub const MIN_TOKEN_CHARS: usize = 3;
    /// Smoothing term used inside the log-likelihood ratio.
    pub const LIKELIHOOD_EPSILON: f64 = 1e-20;
}

/// Constants used by stop-word filtering.
pub mod stopwords {
    /// Language of the standard stop-word list.
    pub const DEFAULT_LANGUAGE: &str = "en";
    /// Frequent but uninformative words seen in US finding aids.
    pub const DEFAULT_IGNORED_WORDS: [&str; 10] = [
        "draw",
        "drawing",
        "york",
        "rockefeller",
        "president",
        "correspondent",
        "united",
        "urban",
        "policy",
        "international",
    ];
}

/// Log messages shared by ingestion and extraction.
pub mod messages {
    use crate::types::LogMessage;

    /// Logged when a document is not valid UTF-8.
    pub const SKIP_WRONG_ENCODING_MSG: LogMessage = "document is not UTF-8, moving on";
    /// Logged when a document lacks EAD markers.
    pub const SKIP_NOT_EAD_MSG: LogMessage = "document is not EAD XML, moving on";
    /// Logged when a markup error stops parsing early; text read so far is kept.
    pub const RECOVERED_MARKUP_MSG: LogMessage = "markup error, keeping text parsed so far";
    /// Logged when no archival year can be read from a document.
    pub const NO_VALID_DATE_MSG: LogMessage = "no valid date in document";
    /// Logged when a source file cannot be read.
    pub const SKIP_UNREADABLE_MSG: LogMessage = "failed to read source file, skipping";
}
