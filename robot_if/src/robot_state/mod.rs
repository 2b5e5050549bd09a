//! # Robot State
//!
//! This module defines the state of the manipulator as measured (or demanded) at a single
//! control loop sample.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod display;
pub mod float_repr;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of joints on the manipulator.
pub const NUM_JOINTS: usize = 7;

/// Number of cartesian dimensions (x, y, z, roll, pitch, yaw).
pub const NUM_CART_DIMS: usize = 6;

/// Number of elements in a 4x4 homogeneous transform.
pub const POSE_LEN: usize = 16;

/// Number of elements in an elbow configuration.
pub const ELBOW_LEN: usize = 2;

/// Names of every field of the state, in the order they are declared and formatted.
pub const FIELD_NAMES: [&str; 16] = [
    "message_id",
    "q_start",
    "O_T_EE_start",
    "elbow_start",
    "tau_J",
    "dtau_J",
    "q",
    "dq",
    "q_d",
    "joint_contact",
    "cartesian_contact",
    "joint_collision",
    "cartesian_collision",
    "tau_ext_hat_filtered",
    "O_F_ext_hat_K",
    "K_F_ext_hat_K",
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The state of the manipulator at one control loop sample.
///
/// A state is a plain value. The producer builds a complete new state for every sample and
/// replaces the previous one wholesale, so consumers should copy the state at a sample
/// boundary rather than reading fields of a state that may be overwritten.
///
/// No field is validated, any value (including NaN and infinities) is stored as given. When
/// serialized, non-finite values are written as the strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct RobotState {
    /// Message ID used to correlate the next command with this sample.
    #[serde(with = "float_repr")]
    pub message_id: f64,

    /// Motion generator's start pose in joint space, in radians.
    #[serde(with = "float_repr::array")]
    pub q_start: [f64; NUM_JOINTS],

    /// Motion generator's start pose of the end effector in the robot base frame.
    ///
    /// This is a 4x4 homogeneous transform stored in column-major order. The bottom row is
    /// expected to be `[0, 0, 0, 1]` but this is not enforced, see
    /// [`RobotState::is_pose_homogeneous`].
    #[serde(rename = "O_T_EE_start", with = "float_repr::array")]
    pub o_t_ee_start: [f64; POSE_LEN],

    /// Elbow start configuration: the position of the 3rd joint in radians and the sign of
    /// the 4th joint.
    #[serde(with = "float_repr::array")]
    pub elbow_start: [f64; ELBOW_LEN],

    /// Measured joint torque, in Nm.
    #[serde(rename = "tau_J", with = "float_repr::array")]
    pub tau_j: [f64; NUM_JOINTS],

    /// Derivative of the measured joint torque, in Nm/s.
    #[serde(rename = "dtau_J", with = "float_repr::array")]
    pub dtau_j: [f64; NUM_JOINTS],

    /// Measured link side joint position, in radians.
    #[serde(with = "float_repr::array")]
    pub q: [f64; NUM_JOINTS],

    /// Measured link side joint velocity, in rad/s.
    #[serde(with = "float_repr::array")]
    pub dq: [f64; NUM_JOINTS],

    /// Desired link side joint position, in radians.
    #[serde(with = "float_repr::array")]
    pub q_d: [f64; NUM_JOINTS],

    /// Contact level active in each joint. Returns to zero once the contact disappears.
    #[serde(with = "float_repr::array")]
    pub joint_contact: [f64; NUM_JOINTS],

    /// Contact level active in each cartesian dimension. Returns to zero once the contact
    /// disappears.
    #[serde(with = "float_repr::array")]
    pub cartesian_contact: [f64; NUM_CART_DIMS],

    /// Collision level active in each joint. Holds its value after the contact disappears
    /// until a reset command is sent.
    #[serde(with = "float_repr::array")]
    pub joint_collision: [f64; NUM_JOINTS],

    /// Collision level active in each cartesian dimension. Holds its value after the contact
    /// disappears until a reset command is sent.
    #[serde(with = "float_repr::array")]
    pub cartesian_collision: [f64; NUM_CART_DIMS],

    /// Filtered external torque, in Nm.
    #[serde(with = "float_repr::array")]
    pub tau_ext_hat_filtered: [f64; NUM_JOINTS],

    /// External wrench (force, torque) acting on the end effector, expressed in the base
    /// frame. Units are [N, N, N, Nm, Nm, Nm].
    #[serde(rename = "O_F_ext_hat_K", with = "float_repr::array")]
    pub o_f_ext_hat_k: [f64; NUM_CART_DIMS],

    /// External wrench (force, torque) acting on the end effector, expressed in the end
    /// effector frame. Units are [N, N, N, Nm, Nm, Nm].
    #[serde(rename = "K_F_ext_hat_K", with = "float_repr::array")]
    pub k_f_ext_hat_k: [f64; NUM_CART_DIMS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RobotState {
    /// Get the motion generator's start pose as a matrix.
    pub fn o_t_ee_start_matrix(&self) -> Matrix4<f64> {
        Matrix4::from_column_slice(&self.o_t_ee_start)
    }

    /// Returns true if the bottom row of the start pose is `[0, 0, 0, 1]` to within the
    /// given absolute tolerance.
    ///
    /// Any non-finite value in the bottom row makes the pose non-homogeneous.
    pub fn is_pose_homogeneous(&self, tolerance: f64) -> bool {
        let bottom_row = self.o_t_ee_start_matrix().row(3).into_owned();

        bottom_row
            .iter()
            .zip([0.0, 0.0, 0.0, 1.0].iter())
            .all(|(v, e)| (v - e).abs() <= tolerance)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// Column-major pose with a translation of (1, 2, 3) and no rotation.
    const TRANSLATION_POSE: [f64; POSE_LEN] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 2.0, 3.0, 1.0,
    ];

    fn all_fields(state: &RobotState) -> Vec<&[f64]> {
        vec![
            std::slice::from_ref(&state.message_id),
            &state.q_start,
            &state.o_t_ee_start,
            &state.elbow_start,
            &state.tau_j,
            &state.dtau_j,
            &state.q,
            &state.dq,
            &state.q_d,
            &state.joint_contact,
            &state.cartesian_contact,
            &state.joint_collision,
            &state.cartesian_collision,
            &state.tau_ext_hat_filtered,
            &state.o_f_ext_hat_k,
            &state.k_f_ext_hat_k,
        ]
    }

    #[test]
    fn test_default_is_zero() {
        let state = RobotState::default();

        for field in all_fields(&state) {
            assert!(field.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_field_lengths() {
        let state = RobotState::default();
        let lengths: Vec<usize> = all_fields(&state).iter().map(|f| f.len()).collect();

        assert_eq!(
            lengths,
            vec![1, 7, 16, 2, 7, 7, 7, 7, 7, 7, 6, 7, 6, 7, 6, 6]
        );
        assert_eq!(lengths.len(), FIELD_NAMES.len());
    }

    #[test]
    fn test_non_finite_values_are_stored() {
        let mut state = RobotState::default();
        state.tau_j[2] = std::f64::NAN;
        state.dq[6] = std::f64::INFINITY;

        assert!(state.tau_j[2].is_nan());
        assert_eq!(state.dq[6], std::f64::INFINITY);
    }

    #[test]
    fn test_wholesale_replace() {
        let mut current = RobotState::default();

        let mut next = RobotState::default();
        next.message_id = 7.0;
        next.q = [0.1; NUM_JOINTS];

        let previous = std::mem::replace(&mut current, next);

        assert_eq!(previous, RobotState::default());
        assert_eq!(current, next);
    }

    #[test]
    fn test_pose_matrix_is_column_major() {
        let mut state = RobotState::default();
        state.o_t_ee_start = TRANSLATION_POSE;

        let m = state.o_t_ee_start_matrix();

        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(2, 3)], 3.0);
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m[(3, 0)], 0.0);

        for col in 0..4 {
            for row in 0..4 {
                assert_eq!(m[(row, col)], state.o_t_ee_start[col * 4 + row]);
            }
        }
    }

    #[test]
    fn test_is_pose_homogeneous() {
        let mut state = RobotState::default();

        // All zeros has a zero in the bottom right corner
        assert!(!state.is_pose_homogeneous(1e-9));

        state.o_t_ee_start = TRANSLATION_POSE;
        assert!(state.is_pose_homogeneous(1e-9));

        state.o_t_ee_start[15] = 1.0 + 1e-6;
        assert!(!state.is_pose_homogeneous(1e-9));
        assert!(state.is_pose_homogeneous(1e-3));

        state.o_t_ee_start[3] = std::f64::NAN;
        assert!(!state.is_pose_homogeneous(1e-3));
    }

    #[test]
    fn test_serde_uses_field_names() {
        let mut state = RobotState::default();
        state.message_id = 3.0;
        state.tau_j[0] = 1.5;

        let json = serde_json::to_value(&state).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();

        for name in FIELD_NAMES.iter() {
            assert!(keys.contains(name), "missing key {}", name);
        }
        assert_eq!(json["tau_J"][0], 1.5);

        let back: RobotState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_serde_rejects_wrong_length() {
        let mut json = serde_json::to_value(&RobotState::default()).unwrap();
        json["q"] = serde_json::json!([0.0, 0.0, 0.0]);

        assert!(serde_json::from_value::<RobotState>(json).is_err());
    }

    #[test]
    fn test_serde_keeps_non_finite_values() {
        let mut state = RobotState::default();
        state.message_id = std::f64::NAN;
        state.tau_j[0] = std::f64::NAN;
        state.dq[3] = std::f64::INFINITY;
        state.k_f_ext_hat_k[5] = std::f64::NEG_INFINITY;

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains(r#""tau_J":["NaN",0.0,"#));
        assert!(!json.contains("null"));

        let back: RobotState = serde_json::from_str(&json).unwrap();

        assert!(back.message_id.is_nan());
        assert!(back.tau_j[0].is_nan());
        assert_eq!(back.dq[3], std::f64::INFINITY);
        assert_eq!(back.k_f_ext_hat_k[5], std::f64::NEG_INFINITY);
        assert_eq!(back.to_string(), state.to_string());
    }
}
