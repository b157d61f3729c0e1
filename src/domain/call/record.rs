//! Call record entity

use crate::domain::shared::CallTimestamp;
use serde::{Deserialize, Serialize};

/// One persisted elevator call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: i64,
    /// Floor the elevator rested on when the call was issued
    pub current_floor: i64,
    pub demand_floor: i64,
    pub destination_floor: i64,
    pub call_datetime: CallTimestamp,
}

/// A call ready to be appended to the log
///
/// `call_datetime` is stamped by the store when absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCall {
    pub current_floor: i64,
    pub demand_floor: i64,
    pub destination_floor: i64,
    #[serde(default)]
    pub call_datetime: Option<CallTimestamp>,
}

impl NewCall {
    pub fn new(current_floor: i64, demand_floor: i64, destination_floor: i64) -> Self {
        Self {
            current_floor,
            demand_floor,
            destination_floor,
            call_datetime: None,
        }
    }

    pub fn at(mut self, call_datetime: CallTimestamp) -> Self {
        self.call_datetime = Some(call_datetime);
        self
    }

    /// Resolve the timestamp and attach the id assigned by the store
    pub fn into_record(self, id: i64) -> CallRecord {
        CallRecord {
            id,
            current_floor: self.current_floor,
            demand_floor: self.demand_floor,
            destination_floor: self.destination_floor,
            call_datetime: self.call_datetime.unwrap_or_else(CallTimestamp::now),
        }
    }
}
