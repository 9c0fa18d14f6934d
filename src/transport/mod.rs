/// Local filesystem transport.
pub mod fs;
