//! # Money Module
//!
//! Provides the `Money` type for monetary amounts and `DepositRate` for the
//! rental surcharge.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal held at scale 2                          │
//! │    every constructor rounds half-up to 2 decimal places                 │
//! │    price × qty and sums of such values stay exact                       │
//! │    only the deposit (× rate) needs a real rounding step                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::money::{DepositRate, Money};
//!
//! let price = Money::from_cents(50_000); // 500.00
//! let subtotal = price.multiply_quantity(2).unwrap();
//! assert_eq!(subtotal.to_string(), "1000.00");
//!
//! let deposit = subtotal.checked_percentage(DepositRate::from_bps(1000)).unwrap();
//! assert_eq!(deposit, Money::from_cents(10_000));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};

/// Fractional digits every `Money` value carries.
pub const MONEY_SCALE: u32 = 2;

/// Rounds to 2 decimals, .5 away from zero, and pads the scale to exactly 2.
///
/// `None` when the magnitude leaves no room for 2 fractional digits:
/// `rescale` clamps silently instead of failing.
fn round_half_up(value: Decimal) -> Option<Decimal> {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    (rounded.scale() == MONEY_SCALE).then_some(rounded)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount with exactly two fractional digits.
///
/// ## Design Decisions
/// - **Decimal, not f64**: exact base-10 representation
/// - **Always scale 2**: `Display` prints `"1000.00"`, never `"1000"`
/// - **Signed**: the type itself allows negatives; entities that must not
///   hold negative amounts validate at construction
///
/// ## Where Money is Used
/// ```text
/// Equipment.price ──► price × qty ──► subtotal ──┬──► deposit (rental)
///                                                 └──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value, rounding half-up to 2 decimals.
    ///
    /// `None` when the amount is too large to carry cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use shop_core::money::Money;
    ///
    /// // 10.005 → 10.01
    /// let price = Money::from_decimal(Decimal::new(10005, 3)).unwrap();
    /// assert_eq!(price.to_string(), "10.01");
    ///
    /// assert_eq!(Money::from_decimal(Decimal::MAX), None);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        round_half_up(amount).map(Money)
    }

    /// Creates a Money value from cents.
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Zero, displayed as `0.00`.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::new(0, MONEY_SCALE))
    }

    /// The underlying decimal (scale 2).
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Value in cents.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    pub fn cents(&self) -> i128 {
        self.0.mantissa()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a quantity. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(20_000); // 200.00
    /// let line_total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(line_total.to_string(), "600.00");
    /// ```
    pub fn multiply_quantity(&self, qty: i64) -> Option<Money> {
        self.0
            .checked_mul(Decimal::from(qty))
            .and_then(Money::from_decimal)
    }

    /// Adds two amounts. `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).and_then(Money::from_decimal)
    }

    /// Applies a rate in basis points, rounding the result half-up.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::{DepositRate, Money};
    ///
    /// // 333.35 × 10% = 33.335 → 33.34
    /// let deposit = Money::from_cents(33_335)
    ///     .checked_percentage(DepositRate::from_bps(1000))
    ///     .unwrap();
    /// assert_eq!(deposit.to_string(), "33.34");
    /// ```
    pub fn checked_percentage(&self, rate: DepositRate) -> Option<Money> {
        self.0
            .checked_mul(rate.as_decimal())
            .and_then(Money::from_decimal)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain amount with two decimals, no currency symbol.
///
/// Front ends add the symbol (see the CLI's `ShopConfig::format_money`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(amount: Decimal) -> ValidationResult<Self> {
        Money::from_decimal(amount).ok_or_else(|| ValidationError::overflow("amount"))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Parses a decimal literal such as `"500.00"` or `"19.999"` (rounded).
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        let amount = Decimal::from_str(s.trim()).map_err(|e| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        })?;
        Money::from_decimal(amount).ok_or_else(|| ValidationError::overflow("price"))
    }
}

// =============================================================================
// Deposit Rate
// =============================================================================

/// A surcharge rate in basis points.
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRate(u32);

impl DepositRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DepositRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a fraction, e.g. `0.1000` for 1000 bps.
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

/// Fixed rental deposit: 10% of the rounded subtotal.
pub const RENTAL_DEPOSIT_RATE: DepositRate = DepositRate::from_bps(1000);

impl Default for DepositRate {
    fn default() -> Self {
        RENTAL_DEPOSIT_RATE
    }
}

impl fmt::Display for DepositRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", Decimal::new(i64::from(self.0), 2).normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
