pub mod catalog;
pub mod time;
pub mod types;

pub use catalog::{
    CaptureRecord, CaptureSnapshot, CreatureDefinition, CreatureDisplay, ResolvedEntry,
    SeasonalWindow, TimeWindow,
};
pub use time::{Month, ParseMonthError, ParseTimeError, TimeOfDay};
pub use types::{Hemisphere, ParseHemisphereError};
