//! # Robot state monitor
//!
//! Holds the most recent robot state and tracks the sequence of samples it has been given.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use robot_if::RobotState;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Holds the current robot state, which is replaced in full by every new sample.
pub struct StateMonitor {
    current: RobotState,

    /// Number of samples received so far
    num_samples: usize,

    decimation: usize,
}

/// Report on a single sample given to the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReport {
    /// Zero-based index of the sample.
    pub index: usize,

    /// True if the sample's message ID was not greater than the previous sample's.
    pub id_regressed: bool,

    /// True if this sample should be logged.
    pub log_due: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl StateMonitor {
    /// Create a new monitor holding a zero state.
    ///
    /// A `decimation` of zero is treated as one.
    pub fn new(decimation: usize) -> Self {
        Self {
            current: RobotState::default(),
            num_samples: 0,
            decimation: decimation.max(1),
        }
    }

    /// Replace the current state with a new sample, returning the previous state along with a
    /// report on the new sample.
    pub fn update(&mut self, sample: RobotState) -> (RobotState, SampleReport) {
        let index = self.num_samples;
        let previous = std::mem::replace(&mut self.current, sample);

        // NaN IDs never compare greater, so they count as a regression
        let id_regressed = index > 0 && !(sample.message_id > previous.message_id);

        self.num_samples += 1;

        (
            previous,
            SampleReport {
                index,
                id_regressed,
                log_due: index % self.decimation == 0,
            },
        )
    }

    /// Get a copy of the current state.
    pub fn current(&self) -> RobotState {
        self.current
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
