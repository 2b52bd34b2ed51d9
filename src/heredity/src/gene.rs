use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid gene copy count: {0}. Expected 0, 1 or 2")]
pub struct GeneCountError(pub u8);

/// Number of copies of the variant allele carried by a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeneCount {Zero, One, Two}

impl GeneCount {
    /// Every possible copy count, in increasing order.
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Use the copy count as an index within `[f64; 3]` tables.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = GeneCountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            n => Err(GeneCountError(n))
        }
    }
}

impl Display for GeneCount {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
