use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How to launch one engine identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Identity recorded in results, e.g. "Stockfish"
    pub name: String,
    /// Path to the engine binary
    pub path: String,
    /// Extra command line arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// UCI options sent after the handshake
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

impl EngineSpec {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            args: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }
}

/// Value of a UCI option as written in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}
