// Saved résumé documents: CRUD over PostgreSQL, keyed by document id + owner id.
// The owner id is taken from the request as-is; authentication happens upstream.

pub mod handlers;
pub mod store;
