//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable holding the root directory of the software.
pub const SW_ROOT_ENV_VAR: &str = "ROBOT_STATE_SW_ROOT";

/// Get the root directory of the software from the `ROBOT_STATE_SW_ROOT`
/// environment variable.
///
/// Parameter files are found under `<root>/params` and sessions are created
/// under the root.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
