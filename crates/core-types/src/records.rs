use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Earliest construction year accepted for a property.
pub const MIN_YEAR_BUILT: i32 = 1800;
/// Latest construction year accepted for a property.
pub const MAX_YEAR_BUILT: i32 = 2100;

/// The physical description of a property under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub address: String,
    /// Purchase price in the report currency.
    pub price: Decimal,
    pub square_footage: u32,
    pub bedrooms: u32,
    /// Bathroom count in half-bath increments (e.g. 2.5).
    pub bathrooms: Decimal,
    pub year_built: i32,
}

/// The annual income and cost figures for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// NOI is taken as given. It is never derived from the other figures.
    pub net_operating_income: Decimal,
    pub cash_invested: Decimal,
    pub gross_rental_income: Decimal,
    pub operating_expenses: Decimal,
    pub total_debt_service: Decimal,
    pub occupied_units: u32,
    pub total_units: u32,
}

/// A property together with its financials.
///
/// This is the unit of work passed from the input step to the report step,
/// either in memory or through a saved JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub property: PropertyRecord,
    pub financial: FinancialRecord,
}

impl PropertyRecord {
    /// Checks the ranges an input surface is expected to enforce.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.address.trim().is_empty() {
            return Err(CoreError::invalid("address", "must not be empty"));
        }
        non_negative("price", self.price)?;
        non_negative("bathrooms", self.bathrooms)?;
        let whole_halves = self
            .bathrooms
            .checked_mul(dec!(2))
            .is_some_and(|halves| halves.fract().is_zero());
        if !whole_halves {
            return Err(CoreError::invalid(
                "bathrooms",
                format!("{} is not a multiple of 0.5", self.bathrooms),
            ));
        }
        if !(MIN_YEAR_BUILT..=MAX_YEAR_BUILT).contains(&self.year_built) {
            return Err(CoreError::invalid(
                "year_built",
                format!(
                    "{} is outside {}..={}",
                    self.year_built, MIN_YEAR_BUILT, MAX_YEAR_BUILT
                ),
            ));
        }
        Ok(())
    }
}

impl FinancialRecord {
    /// Checks the ranges an input surface is expected to enforce.
    pub fn validate(&self) -> Result<(), CoreError> {
        non_negative("net_operating_income", self.net_operating_income)?;
        non_negative("cash_invested", self.cash_invested)?;
        non_negative("gross_rental_income", self.gross_rental_income)?;
        non_negative("operating_expenses", self.operating_expenses)?;
        non_negative("total_debt_service", self.total_debt_service)?;
        if self.total_units < 1 {
            return Err(CoreError::invalid("total_units", "must be at least 1"));
        }
        Ok(())
    }
}

impl Deal {
    pub fn new(property: PropertyRecord, financial: FinancialRecord) -> Self {
        Self {
            property,
            financial,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.property.validate()?;
        self.financial.validate()
    }
}

fn non_negative(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::invalid(field, format!("{} is negative", value)));
    }
    Ok(())
}

// --- Default Implementations ---
// The defaults are the sample figures the input form is prefilled with.

impl Default for PropertyRecord {
    fn default() -> Self {
        Self {
            address: "1234 Example St, Anytown, USA".to_string(),
            price: dec!(350000.00),
            square_footage: 1500,
            bedrooms: 3,
            bathrooms: dec!(2.0),
            year_built: 1990,
        }
    }
}

impl Default for FinancialRecord {
    fn default() -> Self {
        Self {
            net_operating_income: dec!(30000.00),
            cash_invested: dec!(70000.00),
            gross_rental_income: dec!(42000.00),
            operating_expenses: dec!(12000.00),
            total_debt_service: dec!(24000.00),
            occupied_units: 3,
            total_units: 4,
        }
    }
}

impl Default for Deal {
    fn default() -> Self {
        Self::new(PropertyRecord::default(), FinancialRecord::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_deal_is_valid() {
        assert_eq!(Deal::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_quarter_bathrooms() {
        let property = PropertyRecord {
            bathrooms: dec!(1.25),
            ..PropertyRecord::default()
        };
        let err = property.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "bathrooms"));
    }

    #[test]
    fn rejects_out_of_range_bathrooms() {
        let property = PropertyRecord {
            bathrooms: Decimal::MAX,
            ..PropertyRecord::default()
        };
        let err = property.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "bathrooms"));
    }

    #[test]
    fn accepts_half_bathrooms() {
        let property = PropertyRecord {
            bathrooms: dec!(2.5),
            ..PropertyRecord::default()
        };
        assert!(property.validate().is_ok());
    }

    #[test]
    fn year_built_bounds_are_inclusive() {
        for year in [MIN_YEAR_BUILT, MAX_YEAR_BUILT] {
            let property = PropertyRecord {
                year_built: year,
                ..PropertyRecord::default()
            };
            assert!(property.validate().is_ok(), "year {} should be accepted", year);
        }
        let too_old = PropertyRecord {
            year_built: MIN_YEAR_BUILT - 1,
            ..PropertyRecord::default()
        };
        assert!(too_old.validate().is_err());
    }

    #[test]
    fn rejects_negative_money() {
        let financial = FinancialRecord {
            operating_expenses: dec!(-1),
            ..FinancialRecord::default()
        };
        let err = financial.validate().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("operating_expenses".into(), "-1 is negative".into())
        );
    }

    #[test]
    fn rejects_zero_total_units() {
        let financial = FinancialRecord {
            total_units: 0,
            occupied_units: 0,
            ..FinancialRecord::default()
        };
        assert!(financial.validate().is_err());
    }

    #[test]
    fn deal_reads_numbers_or_strings() {
        let json = r#"{
            "property": {
                "address": "9 Elm Rd",
                "price": 200000,
                "square_footage": 900,
                "bedrooms": 2,
                "bathrooms": "1.5",
                "year_built": 1975
            },
            "financial": {
                "net_operating_income": "15000.50",
                "cash_invested": 40000,
                "gross_rental_income": 24000,
                "operating_expenses": 9000,
                "total_debt_service": 12000,
                "occupied_units": 1,
                "total_units": 2
            }
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.property.bathrooms, dec!(1.5));
        assert_eq!(deal.financial.net_operating_income, dec!(15000.50));
        assert!(deal.validate().is_ok());
    }
}
