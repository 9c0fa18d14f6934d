/// Stable identifier of a document source.
/// Examples: `loc`, `nyu`
pub type SourceId = String;
/// Identifier of a raw document as supplied by its source (usually a file path).
/// Example: `repos/NYU/fales/mss_123.xml`
pub type DocumentId = String;
/// Sequential identifier of a persisted text unit (0-based, one per processed document).
/// Example: `17` (stored as `17.txt`)
pub type UnitId = u64;
/// Name of a target EAD element.
/// Examples: `scopecontent`, `processinfo`, `arrangement`
pub type TagName = String;
/// Single corpus token after splitting (and optionally lemmatizing).
/// Examples: `correspondence`, `photograph`
pub type Token = String;
/// Archival year parsed from the first `<date>` element of a document.
/// Example: `1962`
pub type ArchivalYear = i32;
/// Warning/log message text.
/// Examples: `skipping document that is not EAD XML`
pub type LogMessage = &'static str;
