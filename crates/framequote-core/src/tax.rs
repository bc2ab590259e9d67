//! # Sales Tax
//!
//! Only New Jersey destinations are taxed. Everywhere else the tax line is
//! absent from the quote rather than zero.

use crate::money::Money;
use crate::region::NEW_JERSEY;
use crate::types::TaxRate;

/// New Jersey sales tax, 7.00%.
pub const NJ_SALES_TAX: TaxRate = TaxRate::from_bps(700);

/// Rate applicable to `destination`, if any.
pub fn tax_rate_for(destination: &str) -> Option<TaxRate> {
    NEW_JERSEY.matches(destination).then_some(NJ_SALES_TAX)
}

/// Sales tax on the (already rounded) item total. A zero tax is `None`
/// so the quote omits the line.
pub fn sales_tax(item_total: Money, destination: &str) -> Option<Money> {
    tax_rate_for(destination)
        .map(|rate| Money::from_dollars(item_total.as_dollars() * rate.fraction()))
        .filter(|tax| !tax.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nj_taxed() {
        let tax = sales_tax(Money::from_cents(10_574), "Princeton, NJ 08540");
        // 105.74 × 0.07 = 7.4018
        assert_eq!(tax, Some(Money::from_cents(740)));
    }

    #[test]
    fn test_other_states_untaxed() {
        assert_eq!(sales_tax(Money::from_cents(10_000), "Austin, TX"), None);
        assert_eq!(sales_tax(Money::from_cents(10_000), ""), None);
        // "Benjamin" contains "nj" but not as a word
        assert_eq!(sales_tax(Money::from_cents(10_000), "Benjamin St, Reno NV"), None);
    }

    #[test]
    fn test_zero_tax_omitted() {
        assert_eq!(sales_tax(Money::zero(), "Trenton, NJ"), None);
        // 0.07 × 0.07 rounds to 0 cents
        assert_eq!(sales_tax(Money::from_cents(7), "Trenton, NJ"), None);
    }

    #[test]
    fn test_full_state_name() {
        assert_eq!(tax_rate_for("Camden, New Jersey"), Some(NJ_SALES_TAX));
    }
}
