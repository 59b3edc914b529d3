//! Bundled Moroccan 2023 baseline.
//!
//! Rates change with each finance law, so production callers load a dated
//! table through [`ConfigLoader`](super::ConfigLoader). This baseline exists
//! for tests, benchmarks and demos.

use rust_decimal::Decimal;

use super::types::{CalculationPolicy, LegalParameters, TaxBracket};

impl LegalParameters {
    /// Returns the Moroccan legal parameters in force during 2023.
    ///
    /// - SMIG 3111.39 MAD per month
    /// - CNSS 4.48% employee / 8.98% employer, capped at 6000 MAD
    /// - AMO 2.26% employee / 4.11% employer, uncapped
    /// - CIMR reference rates 3% / 3.9%, capped at 6000 MAD
    /// - IR barème from the 2023 finance law (annual, after 20% abatement
    ///   capped at 30000 MAD)
    ///
    /// # Examples
    ///
    /// ```
    /// use paie_engine::config::LegalParameters;
    /// use rust_decimal::Decimal;
    ///
    /// let params = LegalParameters::morocco_2023();
    /// assert_eq!(params.cnss_cap, Decimal::from(6000));
    /// assert_eq!(params.tax_brackets.len(), 6);
    /// assert!(params.tax_brackets.last().unwrap().max.is_none());
    /// ```
    pub fn morocco_2023() -> Self {
        Self {
            minimum_wage: Decimal::new(311139, 2),
            cnss_cap: Decimal::new(6000, 0),
            cnss_employee_rate: Decimal::new(448, 2),
            cnss_employer_rate: Decimal::new(898, 2),
            amo_employee_rate: Decimal::new(226, 2),
            amo_employer_rate: Decimal::new(411, 2),
            cimr_employee_rate: Decimal::new(3, 0),
            cimr_employer_rate: Decimal::new(39, 1),
            cimr_cap: Decimal::new(6000, 0),
            tax_brackets: morocco_2023_brackets(),
            professional_expenses_rate: Decimal::new(20, 0),
            professional_expenses_cap: Decimal::new(30000, 0),
            policy: CalculationPolicy::default(),
        }
    }
}

fn morocco_2023_brackets() -> Vec<TaxBracket> {
    // (min, max, rate %, amount to subtract)
    let bands: [(i64, Option<i64>, i64, i64); 6] = [
        (0, Some(30_000), 0, 0),
        (30_000, Some(50_000), 10, 3_000),
        (50_000, Some(60_000), 20, 8_000),
        (60_000, Some(80_000), 30, 14_000),
        (80_000, Some(180_000), 34, 17_200),
        (180_000, None, 38, 24_400),
    ];

    bands
        .into_iter()
        .map(|(min, max, rate, subtract)| TaxBracket {
            min: Decimal::from(min),
            max: max.map(Decimal::from),
            rate: Decimal::from(rate),
            amount_to_subtract: Decimal::from(subtract),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_are_continuous_in_tax_amount() {
        // Both neighbouring brackets give the same tax at their shared boundary.
        let brackets = morocco_2023_brackets();
        for pair in brackets.windows(2) {
            let boundary = pair[1].min;
            let lower = boundary * pair[0].rate / Decimal::ONE_HUNDRED - pair[0].amount_to_subtract;
            let upper = boundary * pair[1].rate / Decimal::ONE_HUNDRED - pair[1].amount_to_subtract;
            assert_eq!(lower, upper, "discontinuity at {}", boundary);
        }
    }

    #[test]
    fn test_policy_is_historical_behaviour() {
        assert_eq!(
            LegalParameters::morocco_2023().policy,
            CalculationPolicy::default()
        );
    }
}
