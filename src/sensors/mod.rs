//! Sensor feed plumbing around the kriging core: readings, severity bands, the query
//! pipeline and a seeded mock feed.

pub mod feed;
pub mod monitor;
pub mod severity;
pub mod simulator;
pub mod trail;
