//! # Robot State text representation
//!
//! Formats a [`RobotState`] as
//! `{message_id: 0, q_start: [0,0,0,0,0,0,0], O_T_EE_start: [...], ...}`, with every field
//! in declaration order. Log scraping tools depend on this exact layout.
//!
//! Values are written with the `f64` `Display` implementation, which gives the shortest text
//! that reads back as the same value. Non-finite values are written as `NaN`, `inf` and
//! `-inf`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::{self, Display};

use super::{RobotState, FIELD_NAMES};

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Must stay in the same order as FIELD_NAMES[1..]
        let arrays: [&[f64]; 15] = [
            &self.q_start,
            &self.o_t_ee_start,
            &self.elbow_start,
            &self.tau_j,
            &self.dtau_j,
            &self.q,
            &self.dq,
            &self.q_d,
            &self.joint_contact,
            &self.cartesian_contact,
            &self.joint_collision,
            &self.cartesian_collision,
            &self.tau_ext_hat_filtered,
            &self.o_f_ext_hat_k,
            &self.k_f_ext_hat_k,
        ];

        write!(f, "{{{}: {}", FIELD_NAMES[0], self.message_id)?;

        for (name, values) in FIELD_NAMES[1..].iter().zip(arrays.iter()) {
            write!(f, ", {}: ", name)?;
            write_array(f, values)?;
        }

        write!(f, "}}")
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Write the values as `[v0,v1,...]`.
fn write_array(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    write!(f, "[")?;

    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", v)?;
    }

    write!(f, "]")
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
