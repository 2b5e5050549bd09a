//! # Robot state replay
//!
//! Reads robot states recorded as a stream of JSON objects, usually one per line.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use robot_if::RobotState;
use serde_json::{Deserializer, StreamDeserializer};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Iterator over the states in a recording.
///
/// Iteration stops after the first error.
pub struct ReplayReader<R: Read> {
    stream: StreamDeserializer<'static, serde_json::de::IoRead<R>, RobotState>,

    /// Index of the next sample to be read
    index: usize,

    failed: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Cannot open the recording: {0}")]
    Open(std::io::Error),

    #[error("Cannot parse sample {index} of the recording: {source}")]
    Parse {
        index: usize,
        source: serde_json::Error,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ReplayReader<BufReader<File>> {
    /// Open a recording file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let file = File::open(path).map_err(ReplayError::Open)?;

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> ReplayReader<R> {
    /// Create a reader over any source of JSON data.
    pub fn new(reader: R) -> Self {
        Self {
            stream: Deserializer::from_reader(reader).into_iter(),
            index: 0,
            failed: false,
        }
    }
}

impl<R: Read> Iterator for ReplayReader<R> {
    type Item = Result<RobotState, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.stream.next()? {
            Ok(state) => {
                self.index += 1;
                Some(Ok(state))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(ReplayError::Parse {
                    index: self.index,
                    source,
                }))
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
