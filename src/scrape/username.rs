// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Validated profile handles

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A validated profile handle: non-empty, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Validate a raw handle. Empty input or any whitespace is
    /// [`Error::InvalidUsername`]; everything else is kept as given.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(Error::InvalidUsername(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// The handle as given
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
