//! Resting floor prediction
//!
//! Estimates where an idle elevator should wait by weighting how often each
//! floor was the demand floor of a call. Older demand is discounted by a
//! forgetting factor every time fresh calls are folded in.

use super::record::CallRecord;
use indexmap::IndexMap;
use serde::Serialize;

/// Default weight kept from older observations on each prediction
pub const DEFAULT_FORGETTING_FACTOR: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct RestingFloorPredictor {
    /// Floors in the order they were first demanded
    demand_weights: IndexMap<i64, f64>,
    forgetting_factor: f64,
    resting_floor: Option<i64>,
}

impl RestingFloorPredictor {
    pub fn new(forgetting_factor: f64) -> Self {
        Self {
            demand_weights: IndexMap::new(),
            forgetting_factor,
            resting_floor: None,
        }
    }

    /// Count every demand floor once
    pub fn train<I>(&mut self, demand_floors: I) -> Option<i64>
    where
        I: IntoIterator<Item = i64>,
    {
        for floor in demand_floors {
            *self.demand_weights.entry(floor).or_insert(0.0) += 1.0;
        }
        self.update_resting_floor()
    }

    /// Discount existing weights, then count the new calls
    pub fn predict<I>(&mut self, new_calls: I) -> Option<i64>
    where
        I: IntoIterator<Item = i64>,
    {
        for weight in self.demand_weights.values_mut() {
            *weight *= self.forgetting_factor;
        }
        self.train(new_calls)
    }

    pub fn resting_floor(&self) -> Option<i64> {
        self.resting_floor
    }

    pub fn weight(&self, floor: i64) -> f64 {
        self.demand_weights.get(&floor).copied().unwrap_or(0.0)
    }

    // Ties resolve to the floor demanded first
    fn update_resting_floor(&mut self) -> Option<i64> {
        let mut best: Option<(i64, f64)> = None;
        for (&floor, &weight) in &self.demand_weights {
            match best {
                Some((_, top)) if weight <= top => {}
                _ => best = Some((floor, weight)),
            }
        }
        self.resting_floor = best.map(|(floor, _)| floor);
        self.resting_floor
    }
}

impl Default for RestingFloorPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_FORGETTING_FACTOR)
    }
}

/// Outcome of a prediction over the stored call log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestingFloorPrediction {
    pub resting_floor: Option<i64>,
    pub trained_calls: usize,
    pub recent_calls: usize,
}

/// Train on everything but the newest `recent_window` calls, then predict
/// with those newest calls.
pub fn predict_from_log(
    records: &[CallRecord],
    recent_window: usize,
    forgetting_factor: f64,
) -> RestingFloorPrediction {
    let split = records.len().saturating_sub(recent_window);
    let (history, recent) = records.split_at(split);

    let mut predictor = RestingFloorPredictor::new(forgetting_factor);
    predictor.train(history.iter().map(|r| r.demand_floor));
    let resting_floor = predictor.predict(recent.iter().map(|r| r.demand_floor));

    RestingFloorPrediction {
        resting_floor,
        trained_calls: history.len(),
        recent_calls: recent.len(),
    }
}
