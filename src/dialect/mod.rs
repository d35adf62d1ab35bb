//! Vendor dialect detection and parsing.
//!
//! This module turns raw configuration text into a [`DeviceModel`]:
//! - [`detect`] - Classify text into a [`Dialect`]
//! - [`blocks`] - Locate declaration blocks (keyword or indentation delimited)
//! - [`cisco`] - Cisco IOS / IOS-XE grammar
//! - [`aruba`] - Aruba AOS-CX grammar
//! - [`ParserRegistry`] - Maps each dialect to its parser

/// Declare a function returning a lazily compiled, process-wide [`regex::Regex`].
macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| regex::Regex::new($pattern).expect("Invalid Regex"))
        }
    };
}

pub mod aruba;
pub mod blocks;
pub mod cisco;
pub mod detect;
mod routing;

use crate::models::DeviceModel;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub use aruba::ArubaCxParser;
pub use cisco::CiscoIosParser;
pub use detect::detect_dialect;

/// Vendor configuration grammar.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    #[serde(rename = "cisco-ios")]
    CiscoIos,
    #[serde(rename = "aruba-cx")]
    ArubaCx,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::CiscoIos => "cisco-ios",
            Dialect::ArubaCx => "aruba-cx",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no hostname declaration found in {filename}")]
    MissingHostname { filename: String },
}

/// A parser for one configuration dialect.
///
/// Malformed sub-fields never fail a parse; they degrade to a raw or empty
/// value. The only failure is a missing hostname.
pub trait DialectParser {
    fn dialect(&self) -> Dialect;

    fn parse(&self, text: &str, filename: &str) -> Result<DeviceModel, ParseError>;
}

/// Registry of dialect parsers keyed by the dialect they handle.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<Dialect, Box<dyn DialectParser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in parser.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CiscoIosParser));
        registry.register(Box::new(ArubaCxParser));
        registry
    }

    /// Register a parser, replacing any earlier one for the same dialect.
    pub fn register(&mut self, parser: Box<dyn DialectParser>) {
        self.parsers.insert(parser.dialect(), parser);
    }

    pub fn get(&self, dialect: Dialect) -> Option<&dyn DialectParser> {
        self.parsers.get(&dialect).map(|p| p.as_ref())
    }
}

cached_regex!(hostname_regex, r"(?m)^hostname\s+(\S+)");

/// Hostname from an unindented `hostname` declaration.
pub(crate) fn extract_hostname(text: &str) -> Option<&str> {
    hostname_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Value of a `description ...` line, trimmed.
pub(crate) fn description_value(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("description")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}
