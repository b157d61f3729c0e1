//! Floor derivation rule

/// Floor the elevator is resting on when a new call arrives.
///
/// The elevator stays where the previous call sent it. With no previous call
/// it is assumed to already wait at the caller's floor.
pub fn resolve_current_floor(last_destination_floor: Option<i64>, demand_floor: i64) -> i64 {
    last_destination_floor.unwrap_or(demand_floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_falls_back_to_demand_floor() {
        for demand in [-2, 0, 1, 7, 120] {
            assert_eq!(resolve_current_floor(None, demand), demand);
        }
    }

    #[test]
    fn test_previous_destination_wins() {
        assert_eq!(resolve_current_floor(Some(5), 1), 5);
        assert_eq!(resolve_current_floor(Some(0), 3), 0);
        assert_eq!(resolve_current_floor(Some(-1), -1), -1);
    }
}
