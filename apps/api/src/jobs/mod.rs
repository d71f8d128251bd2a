// Job feed: filtered, sorted, paginated view over stored jobs, plus status
// transitions. Scoring fields are read-only here.

pub mod handlers;
pub mod query;
