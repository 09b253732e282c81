//! Shared schedule validation for Soulvote contracts.
//!
//! Any contract that gates operations on a `[start_time, end_time]` voting
//! window validates and evaluates that window through these helpers, so the
//! semantics (strictly-future start, inclusive bounds) stay uniform.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::contracttype;

/// Rejection reasons for a proposed competition schedule.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ScheduleError {
    InvalidTimeRange = 1,
    InvalidStartTime = 2,
}

/// Validate a schedule against the current time.
///
/// Requires `start_time < end_time` and a strictly-future `start_time`.
pub fn validate_schedule(now: u64, start_time: u64, end_time: u64) -> Result<(), ScheduleError> {
    if start_time >= end_time {
        return Err(ScheduleError::InvalidTimeRange);
    }
    if start_time <= now {
        return Err(ScheduleError::InvalidStartTime);
    }
    Ok(())
}

/// True when `now` falls inside the window, inclusive on both ends.
pub fn window_contains(now: u64, start_time: u64, end_time: u64) -> bool {
    start_time <= now && now <= end_time
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_schedule_accepts_future_window() {
        assert_eq!(validate_schedule(100, 110, 120), Ok(()));
    }

    #[test]
    fn test_validate_schedule_rejects_inverted_range() {
        assert_eq!(
            validate_schedule(100, 120, 110),
            Err(ScheduleError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_validate_schedule_rejects_empty_range() {
        assert_eq!(
            validate_schedule(100, 110, 110),
            Err(ScheduleError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_validate_schedule_rejects_past_start() {
        assert_eq!(
            validate_schedule(100, 90, 120),
            Err(ScheduleError::InvalidStartTime)
        );
    }

    #[test]
    fn test_validate_schedule_rejects_start_equal_to_now() {
        // Start must be strictly in the future.
        assert_eq!(
            validate_schedule(100, 100, 120),
            Err(ScheduleError::InvalidStartTime)
        );
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        assert!(window_contains(110, 110, 120));
        assert!(window_contains(115, 110, 120));
        assert!(window_contains(120, 110, 120));
        assert!(!window_contains(109, 110, 120));
        assert!(!window_contains(121, 110, 120));
    }
}
