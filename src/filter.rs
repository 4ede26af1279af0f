// Copyright (c) 2025 - Cowboy AI, Inc.
//! Multimachine Filter
//!
//! When the hosting tool operates on a single machine (`up web1`,
//! `provision /db.*/`), only the matching machines are listed in the
//! inventory. Node expansion and variable computation are never filtered.
//!
//! Token syntax:
//! - empty: every machine passes
//! - `/pattern/`: regular expression searched in the boxname
//! - anything else: exact boxname

use regex::Regex;
use std::fmt;

use crate::errors::ConfigurationError;

/// Subcommands of the hosting tool that accept a target machine
pub const TARGETING_COMMANDS: [&str; 2] = ["up", "provision"];

/// Narrows the inventory projection to the targeted machines
#[derive(Debug, Clone, Default)]
pub enum MultimachineFilter {
    /// No target, every machine passes
    #[default]
    All,
    /// Exact boxname
    Exact(String),
    /// Regular expression matched anywhere in the boxname
    Pattern(Regex),
}

impl MultimachineFilter {
    /// Parse a target token
    pub fn parse(token: &str) -> Result<Self, ConfigurationError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(MultimachineFilter::All);
        }

        match token
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .filter(|pattern| !pattern.is_empty())
        {
            Some(pattern) => Regex::new(pattern)
                .map(MultimachineFilter::Pattern)
                .map_err(|e| ConfigurationError::InvalidFilterPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(MultimachineFilter::Exact(token.to_string())),
        }
    }

    /// Derive the filter from the hosting tool's arguments
    ///
    /// `args` starts at the subcommand. The second argument is a target only
    /// for `up` and `provision`; any other invocation is unfiltered.
    pub fn from_command_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigurationError> {
        match args {
            [command, target, ..] if TARGETING_COMMANDS.contains(&command.as_ref()) => {
                Self::parse(target.as_ref())
            }
            _ => Ok(MultimachineFilter::All),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, MultimachineFilter::All)
    }

    pub fn matches(&self, boxname: &str) -> bool {
        match self {
            MultimachineFilter::All => true,
            MultimachineFilter::Exact(name) => name == boxname,
            MultimachineFilter::Pattern(regex) => regex.is_match(boxname),
        }
    }
}

impl fmt::Display for MultimachineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultimachineFilter::All => Ok(()),
            MultimachineFilter::Exact(name) => f.write_str(name),
            MultimachineFilter::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}
