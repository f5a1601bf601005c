//! Currency conversion.
//!
//! Conversion is a presentation-time projection: stored records keep their own currency
//! and are converted on every render into the selected display currency.

use crate::{CurrencyCode, RateTable};

/// Converts `amount` from `from` to `to` through USD.
///
/// - same currency: `amount` is returned untouched.
/// - otherwise: `amount / rate(from) * rate(to)`, where a currency missing from `rates`
///   uses a rate of `1`. With an empty table every conversion degrades to the identity.
///
/// No rounding is applied.
///
/// ```rust
/// use engine::{CurrencyCode, RateTable, convert};
///
/// let eur = CurrencyCode::try_from("EUR").unwrap();
/// let usd = CurrencyCode::usd();
/// assert_eq!(convert(100.0, &eur, &usd, &RateTable::new()), 100.0);
/// ```
#[must_use]
pub fn convert(amount: f64, from: &CurrencyCode, to: &CurrencyCode, rates: &RateTable) -> f64 {
    if from == to {
        return amount;
    }
    amount / rates.rate(from) * rates.rate(to)
}

/// Result of a conversion that also tells whether the fallback rate was involved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Converted {
    pub amount: f64,
    /// `true` when `from` or `to` had no rate and was treated as USD parity.
    pub approximate: bool,
}

/// Everything a render pass needs to project amounts: the selected display currency and
/// the rate table of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionContext {
    pub display: CurrencyCode,
    pub rates: RateTable,
}

impl ConversionContext {
    #[must_use]
    pub fn new(display: CurrencyCode, rates: RateTable) -> Self {
        Self { display, rates }
    }

    /// Converts `amount` expressed in `from` into the display currency.
    #[must_use]
    pub fn to_display(&self, amount: f64, from: &CurrencyCode) -> f64 {
        convert(amount, from, &self.display, &self.rates)
    }

    /// Like [`ConversionContext::to_display`], flagging fallback-rate conversions.
    #[must_use]
    pub fn project(&self, amount: f64, from: &CurrencyCode) -> Converted {
        let approximate = from != &self.display
            && (!self.rates.is_known(from) || !self.rates.is_known(&self.display));
        Converted {
            amount: self.to_display(amount, from),
            approximate,
        }
    }
}
