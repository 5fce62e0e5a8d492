// ATS Scorer: completeness score and section feedback over a résumé snapshot.
// Pure functions only; the handler is the sole I/O boundary.

pub mod handlers;
pub mod scorer;
