#![allow(dead_code)]
//! Fixed-point physical and monetary newtypes.
//!
//! Mirrors the controller's `domain::types` newtype pattern (`Power`,
//! `Energy`, `Price` wrapping `f64` with `Display` and arithmetic impls) but
//! backs every value with `rust_decimal::Decimal` so that sizing and
//! economics arithmetic is exact and reproducible, per the financial-grade
//! requirement of this engine.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Round to `dp` decimal places using the HALF_UP ("round half away from
/// zero") strategy specified for all monetary and power/energy output.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

macro_rules! decimal_newtype {
    ($name:ident, $doc:expr, $scale:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Decimal);

        impl $name {
            pub fn new(value: Decimal) -> Self {
                Self(value)
            }

            pub fn zero() -> Self {
                Self(Decimal::ZERO)
            }

            pub fn value(&self) -> Decimal {
                self.0
            }

            /// Round to this type's canonical output scale (HALF_UP).
            pub fn rounded(&self) -> Self {
                Self(round_half_up(self.0, $scale))
            }

            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            pub fn max(self, other: Self) -> Self {
                if self.0 >= other.0 {
                    self
                } else {
                    other
                }
            }

            pub fn min(self, other: Self) -> Self {
                if self.0 <= other.0 {
                    self
                } else {
                    other
                }
            }
        }

        impl From<Decimal> for $name {
            fn from(value: Decimal) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Decimal {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + x)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.rounded().0)
            }
        }
    };
}

decimal_newtype!(Kw, "Power in kilowatts.", 2);
decimal_newtype!(Kwh, "Energy in kilowatt-hours.", 2);
decimal_newtype!(Yuan, "A monetary amount in CNY.", 2);
decimal_newtype!(Percent, "A percentage, 0-100.", 4);

/// Price in CNY per kilowatt-hour, scale 4 per spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YuanPerKwh(pub Decimal);

impl YuanPerKwh {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for YuanPerKwh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} CNY/kWh", round_half_up(self.0, 4))
    }
}

/// `price * energy = cost`, matching the controller's `Price * Energy` impl.
impl Mul<Kwh> for YuanPerKwh {
    type Output = Yuan;
    fn mul(self, rhs: Kwh) -> Self::Output {
        Yuan(self.0 * rhs.0)
    }
}

impl Mul<YuanPerKwh> for Kwh {
    type Output = Yuan;
    fn mul(self, rhs: YuanPerKwh) -> Self::Output {
        Yuan(self.0 * rhs.0)
    }
}

/// `power(kW) * duration(h) = energy(kWh)`.
impl Mul<Decimal> for Kw {
    type Output = Kwh;
    fn mul(self, hours: Decimal) -> Self::Output {
        Kwh(self.0 * hours)
    }
}

impl Div<Decimal> for Kwh {
    type Output = Kwh;
    fn div(self, rhs: Decimal) -> Self::Output {
        Kwh(self.0 / rhs)
    }
}

impl Mul<Decimal> for Kwh {
    type Output = Kwh;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Kwh(self.0 * rhs)
    }
}

impl Mul<Decimal> for Yuan {
    type Output = Yuan;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Yuan(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kw_arithmetic() {
        let a = Kw::new(dec!(3.0));
        let b = Kw::new(dec!(2.0));
        assert_eq!((a + b).0, dec!(5.0));
        assert_eq!((a - b).0, dec!(1.0));
    }

    #[test]
    fn price_times_energy_is_cost() {
        let price = YuanPerKwh::new(dec!(2.0));
        let energy = Kwh::new(dec!(10.0));
        let cost = price * energy;
        assert_eq!(cost.0, dec!(20.0));
    }

    #[test]
    fn power_times_duration_is_energy() {
        let power = Kw::new(dec!(7.0));
        let energy = power * dec!(0.25);
        assert_eq!(energy.0, dec!(1.75));
    }

    #[test]
    fn rounding_is_half_up() {
        let v = Yuan::new(dec!(1.005));
        assert_eq!(v.rounded().0, dec!(1.01));
        let v2 = Yuan::new(dec!(-1.005));
        assert_eq!(v2.rounded().0, dec!(-1.01));
    }

    #[test]
    fn display_uses_rounded_scale() {
        let v = Kwh::new(dec!(1.005));
        assert_eq!(format!("{}", v), "1.01");
    }
}
