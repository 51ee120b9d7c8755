///! Availability resolution engine
///!
///! Pure functions over an in-memory catalog and capture snapshot. Holds no
///! state, so any number of resolutions may run in parallel.

pub mod matcher;
pub mod resolver;

pub use matcher::{is_available, window_contains};
pub use resolver::{
    resolve, resolve_availability, resolve_query, AvailabilityQuery, ResolveError,
};
