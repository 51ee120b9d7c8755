///! Resolution merger
///!
///! Scans the catalog for one hemisphere/month/time, keeps the creatures the
///! matcher accepts, and overlays the user's capture state.

use finder_common::{
    CaptureSnapshot, CreatureDefinition, Hemisphere, Month, ResolvedEntry, TimeOfDay,
};
use thiserror::Error;

use super::matcher::is_available;

/// Caller-input failures. Nothing is resolved when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid hemisphere '{0}', expected 'north' or 'south'")]
    InvalidHemisphere(String),

    #[error("invalid month {0}, expected a value between 1 and 12")]
    InvalidMonth(i64),

    #[error("invalid time '{0}', expected HH:MM on a 24-hour clock")]
    InvalidTimeFormat(String),
}

/// A fully validated availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub hemisphere: Hemisphere,
    pub month: Month,
    pub time: TimeOfDay,
}

impl AvailabilityQuery {
    /// Validate raw caller input. Hemisphere is checked first, then month, then time.
    pub fn parse(hemisphere: &str, month: i64, time: &str) -> Result<Self, ResolveError> {
        let hemisphere = hemisphere
            .parse::<Hemisphere>()
            .map_err(|_| ResolveError::InvalidHemisphere(hemisphere.to_string()))?;
        let month = Month::new(month).map_err(|e| ResolveError::InvalidMonth(e.0))?;
        let time = time
            .parse::<TimeOfDay>()
            .map_err(|_| ResolveError::InvalidTimeFormat(time.to_string()))?;

        Ok(Self {
            hemisphere,
            month,
            time,
        })
    }
}

/// Resolve from raw caller input.
pub fn resolve_availability(
    catalog: &[CreatureDefinition],
    hemisphere: &str,
    month: i64,
    time: &str,
    captures: &CaptureSnapshot,
) -> Result<Vec<ResolvedEntry>, ResolveError> {
    let query = AvailabilityQuery::parse(hemisphere, month, time)?;
    Ok(resolve_query(catalog, &query, captures))
}

pub fn resolve_query(
    catalog: &[CreatureDefinition],
    query: &AvailabilityQuery,
    captures: &CaptureSnapshot,
) -> Vec<ResolvedEntry> {
    resolve(catalog, query.hemisphere, query.month, query.time, captures)
}

/// Available creatures in catalog order, each tagged with whether it was caught.
pub fn resolve(
    catalog: &[CreatureDefinition],
    hemisphere: Hemisphere,
    month: Month,
    time: TimeOfDay,
    captures: &CaptureSnapshot,
) -> Vec<ResolvedEntry> {
    let entries: Vec<ResolvedEntry> = catalog
        .iter()
        .filter(|creature| is_available(creature.windows(hemisphere), month, time))
        .map(|creature| ResolvedEntry::from_definition(creature, captures.is_caught(&creature.id)))
        .collect();

    tracing::debug!(
        "Resolved {}/{} creatures for {} month={} time={}",
        entries.len(),
        catalog.len(),
        hemisphere,
        month,
        time
    );

    entries
}
