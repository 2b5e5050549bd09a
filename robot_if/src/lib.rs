//! # Robot interface crate.
//!
//! Provides the manipulator state snapshot shared between the control loop and any
//! diagnostics consumers, along with its canonical text representation.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Robot state snapshot and its formatting
pub mod robot_state;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use robot_state::RobotState;
