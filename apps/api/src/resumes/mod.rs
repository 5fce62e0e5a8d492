// Résumé persistence: store seam, Postgres adapter, write-path rules, CRUD handlers.
// Every write recomputes the ATS score server-side.

pub mod handlers;
pub mod service;
pub mod store;
