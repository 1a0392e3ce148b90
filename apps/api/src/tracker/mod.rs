// Job Tracker: create/list/delete over job application records.
// Storage sits behind the JobStore trait; the default backend is in-memory.

pub mod handlers;
pub mod models;
pub mod store;
