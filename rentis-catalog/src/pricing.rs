use serde::{Deserialize, Serialize};

use crate::category::{Category, RateCard};

/// What the client asked to rent for: a fixed duration class for slab
/// categories, or a day count for per-day categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalSelection {
    TwelveHour,
    TwentyFourHour,
    Days(i64),
}

/// A priced rental: the amount to charge and the human-readable
/// descriptor persisted alongside the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount: i64,
    pub descriptor: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Selection {selection:?} does not match the rate card of '{category}'")]
    SelectionMismatch {
        category: String,
        selection: RentalSelection,
    },

    #[error("Day count must be positive, got {0}")]
    InvalidDayCount(i64),

    #[error("Day count {0} is out of range")]
    DayCountTooLarge(i64),
}

/// Price a rental selection against a category's rate card.
///
/// Pure and deterministic: identical inputs always yield identical output.
/// The quoted amount is frozen into the booking draft by the caller and is
/// never recomputed at commit time.
pub fn quote(category: &Category, selection: RentalSelection) -> Result<Quote, PricingError> {
    match (category.rate_card, selection) {
        (RateCard::Slab { twelve_hour, .. }, RentalSelection::TwelveHour) => Ok(Quote {
            amount: twelve_hour,
            descriptor: "12 Hours".to_string(),
        }),
        (
            RateCard::Slab {
                twenty_four_hour, ..
            },
            RentalSelection::TwentyFourHour,
        ) => Ok(Quote {
            amount: twenty_four_hour,
            descriptor: "24 Hours".to_string(),
        }),
        (RateCard::PerDay { .. }, RentalSelection::Days(days)) if days <= 0 => {
            Err(PricingError::InvalidDayCount(days))
        }
        (RateCard::PerDay { rate }, RentalSelection::Days(days)) => {
            let amount = rate
                .checked_mul(days)
                .ok_or(PricingError::DayCountTooLarge(days))?;
            Ok(Quote {
                amount,
                descriptor: format!("{} day(s)", days),
            })
        }
        (_, selection) => Err(PricingError::SelectionMismatch {
            category: category.key.to_string(),
            selection,
        }),
    }
}
