//! Loan offer pricing from a credit score.

use serde::{Deserialize, Serialize};

use crate::scoring::CreditScore;

const MAX_AMOUNT_STEPS: f64 = 500.0;
const AMOUNT_STEP: u32 = 100;
const APR_CEILING: f64 = 18.0;
const APR_SPREAD: f64 = 13.0;

/// Pre-qualified offer. `amount` is a multiple of 100 capped at 50,000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub amount: u32,
    /// Annual rate in percent, one decimal place.
    pub apr: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
}

impl LoanOffer {
    pub fn total_repayment(&self) -> f64 {
        self.monthly_payment * f64::from(self.term_months)
    }
}

/// Prices an offer linearly across the score range: 0 at 300 up to 50,000 at 850, with
/// APR falling from 18.0% to 5.0%.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanOfferCalculator;

impl LoanOfferCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn offer(&self, score: CreditScore) -> LoanOffer {
        let score_pct = score.fraction();

        let amount = (score_pct * MAX_AMOUNT_STEPS).round() as u32 * AMOUNT_STEP;
        let apr = ((APR_CEILING - score_pct * APR_SPREAD) * 10.0).round() / 10.0;
        let term_months = term_for(amount);

        LoanOffer {
            amount,
            apr,
            term_months,
            monthly_payment: monthly_payment(amount, apr, term_months),
        }
    }
}

fn term_for(amount: u32) -> u32 {
    match amount {
        a if a > 25_000 => 60,
        a if a > 10_000 => 48,
        _ => 36,
    }
}

/// Level payment for a fixed-rate loan; straight-line when the rate is zero.
pub fn monthly_payment(amount: u32, apr: f64, term_months: u32) -> f64 {
    let principal = f64::from(amount);
    let months = f64::from(term_months);
    let monthly_rate = apr / 100.0 / 12.0;

    if monthly_rate > 0.0 {
        principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-months))
    } else {
        principal / months
    }
}
