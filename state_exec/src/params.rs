//! # State Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct StateExecParams {
    /// Path to the JSON-lines recording of robot states, relative to the software root unless
    /// absolute.
    pub samples_path: String,

    /// Only every `decimation`th sample is logged.
    pub decimation: usize,

    /// Name of the file in the session directory which receives the formatted states.
    pub text_file_name: String,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Decimation must be at least 1")]
    ZeroDecimation,

    #[error("Text file name must not be empty")]
    EmptyTextFileName,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl StateExecParams {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        if self.decimation == 0 {
            return Err(ParamsError::ZeroDecimation);
        }

        if self.text_file_name.is_empty() {
            return Err(ParamsError::EmptyTextFileName);
        }

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const PARAMS_STR: &str = "
        samples_path = \"data/robot_states.jsonl\"
        decimation = 100
        text_file_name = \"robot_states.txt\"
    ";

    #[test]
    fn test_valid_params() {
        let params: StateExecParams = util::params::from_str(PARAMS_STR).unwrap();

        assert_eq!(params.decimation, 100);
        assert!(params.are_valid().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let mut params: StateExecParams = util::params::from_str(PARAMS_STR).unwrap();

        params.decimation = 0;
        assert!(matches!(params.are_valid(), Err(ParamsError::ZeroDecimation)));

        params.decimation = 1;
        params.text_file_name.clear();
        assert!(matches!(params.are_valid(), Err(ParamsError::EmptyTextFileName)));
    }
}
