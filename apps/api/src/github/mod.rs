// Repository Analyzer: GitHub URL → metadata, languages, README excerpt, generated bullets.
// All GitHub calls go through the `RepositorySource` trait in `client`.

pub mod analyzer;
pub mod client;
pub mod handlers;
pub mod url;
