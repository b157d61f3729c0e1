//! Updatable call record fields

use crate::domain::shared::CallTimestamp;
use std::fmt;

/// A single column assignment on an existing call record
///
/// The set is closed: `id` is immutable and nothing else is addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallField {
    CurrentFloor(i64),
    DemandFloor(i64),
    DestinationFloor(i64),
    CallDatetime(CallTimestamp),
}

impl CallField {
    /// Column names accepted by the update path, in table order
    pub const NAMES: [&'static str; 4] = [
        "current_floor",
        "demand_floor",
        "destination_floor",
        "call_datetime",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CallField::CurrentFloor(_) => "current_floor",
            CallField::DemandFloor(_) => "demand_floor",
            CallField::DestinationFloor(_) => "destination_floor",
            CallField::CallDatetime(_) => "call_datetime",
        }
    }

    pub fn is_known(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }
}

impl fmt::Display for CallField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallField::CurrentFloor(v) | CallField::DemandFloor(v) | CallField::DestinationFloor(v) => {
                write!(f, "{}={}", self.name(), v)
            }
            CallField::CallDatetime(ts) => write!(f, "{}={}", self.name(), ts),
        }
    }
}
