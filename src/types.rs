// 1.0: primitives shared by every module. account ids, signed magnitudes, prices, timestamps.
// quantities are u128 fixed-point integers scaled by fixed_point::BASE.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fixed_point::{self, MathError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn from_positive(is_positive: bool) -> Self {
        if is_positive {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Sign::Positive)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

// 1.1: sign + magnitude. zero has no sign: it always reads back as Positive,
// whatever sign it was built or deserialized with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignedAmount {
    magnitude: u128,
    sign: Sign,
}

impl SignedAmount {
    pub fn new(magnitude: u128, sign: Sign) -> Self {
        let sign = if magnitude == 0 { Sign::Positive } else { sign };
        Self { magnitude, sign }
    }

    pub fn zero() -> Self {
        Self::new(0, Sign::Positive)
    }

    pub fn positive(magnitude: u128) -> Self {
        Self::new(magnitude, Sign::Positive)
    }

    pub fn negative(magnitude: u128) -> Self {
        Self::new(magnitude, Sign::Negative)
    }

    pub fn magnitude(&self) -> u128 {
        self.magnitude
    }

    pub fn sign(&self) -> Sign {
        if self.magnitude == 0 {
            Sign::Positive
        } else {
            self.sign
        }
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude == 0
    }

    pub fn is_positive(&self) -> bool {
        self.sign().is_positive()
    }

    pub fn negate(&self) -> Self {
        Self::new(self.magnitude, self.sign().opposite())
    }
}

impl PartialEq for SignedAmount {
    fn eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude && self.sign() == other.sign()
    }
}

impl Eq for SignedAmount {}

impl Default for SignedAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign() {
            Sign::Positive => write!(f, "{}", self.magnitude),
            Sign::Negative => write!(f, "-{}", self.magnitude),
        }
    }
}

// 1.2: price of one position unit in margin units, scaled by BASE. must be positive,
// deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u128")]
pub struct Price(u128);

impl Price {
    #[must_use]
    pub fn new(value: u128) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: u128) -> Self {
        debug_assert!(value > 0);
        Self(value)
    }

    /// Converts a human price such as `dec!(50000.5)` into fixed point.
    pub fn from_decimal(value: Decimal) -> Result<Self, MathError> {
        let fixed = fixed_point::from_decimal(value)?;
        Self::new(fixed).ok_or(MathError::OutOfRange(value))
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}

impl TryFrom<u128> for Price {
    type Error = MathError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(MathError::OutOfRange(Decimal::ZERO))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match fixed_point::to_decimal(self.0) {
            Some(d) => write!(f, "{}", d),
            None => write!(f, "{}e-18", self.0),
        }
    }
}

// 1.3: millisecond timestamp, stamped on emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }
}
