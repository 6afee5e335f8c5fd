//! The player's cho/han call and its console parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CHO_TOKEN, HAN_TOKEN};
use crate::dice::Parity;

/// Call made before the cup is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Call {
    /// Even total.
    Cho,
    /// Odd total.
    Han,
}

impl Call {
    pub const ALL: [Self; 2] = [Self::Cho, Self::Han];

    #[must_use]
    pub const fn parity(self) -> Parity {
        match self {
            Self::Cho => Parity::Even,
            Self::Han => Parity::Odd,
        }
    }

    /// The call that wins against a total of the given parity.
    #[must_use]
    pub const fn for_parity(parity: Parity) -> Self {
        match parity {
            Parity::Even => Self::Cho,
            Parity::Odd => Self::Han,
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Cho => CHO_TOKEN,
            Self::Han => HAN_TOKEN,
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallRejection {
    #[error("Please enter either \"CHO\" or \"HAN\".")]
    Unrecognized(String),
}

impl FromStr for Call {
    type Err = CallRejection;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_call(raw)
    }
}

/// Validate one raw line of call input.
///
/// The line terminator is dropped and the rest is uppercased; only an exact
/// `CHO` or `HAN` is accepted. Surrounding whitespace is not forgiven and
/// there is no quit token at this prompt.
///
/// # Errors
///
/// Returns [`CallRejection::Unrecognized`] for any other token.
pub fn parse_call(raw: &str) -> Result<Call, CallRejection> {
    let token = strip_line_ending(raw).to_uppercase();
    match token.as_str() {
        CHO_TOKEN => Ok(Call::Cho),
        HAN_TOKEN => Ok(Call::Han),
        _ => Err(CallRejection::Unrecognized(token)),
    }
}

pub(crate) fn strip_line_ending(raw: &str) -> &str {
    raw.trim_end_matches(['\n', '\r'])
}
