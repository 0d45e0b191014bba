//! Operation labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of change a caller says a payload represents.
///
/// This is only a label recorded alongside the payload; no stored object is
/// modified or removed because of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Insert, Operation::Update, Operation::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Body of the 200 response.
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::Insert => "Insert transaction logged and file uploaded to S3 successfully!",
            Operation::Update => "Update transaction logged and file uploaded to S3 successfully!",
            Operation::Delete => "Delete transaction logged and file uploaded to S3 successfully!",
        }
    }

    /// Body of the 500 response.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Insert => "Error processing insert transaction",
            Operation::Update => "Error processing update transaction",
            Operation::Delete => "Error processing delete transaction",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Operation::Insert),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            other => Err(format!("unknown operation '{}'", other)),
        }
    }
}
