use serde::{Deserialize, Serialize};

/// Pricing rule for a category. The shape is fixed when the category is
/// defined and never changes over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateCard {
    /// Two fixed prices keyed by duration class.
    #[serde(rename_all = "camelCase")]
    Slab {
        twelve_hour: i64,
        twenty_four_hour: i64,
    },
    /// A single per-day rate, multiplied by the requested day count.
    #[serde(rename_all = "camelCase")]
    PerDay { rate: i64 },
}

/// A vehicle category: display name, rate card, and the models on offer.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub display_name: &'static str,
    pub rate_card: RateCard,
    pub vehicles: &'static [&'static str],
}

impl Category {
    /// Whether `name` is one of the listed models for this category.
    pub fn has_vehicle(&self, name: &str) -> bool {
        self.vehicles.iter().any(|v| *v == name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown vehicle category: {0}")]
    UnknownCategory(String),

    #[error("Vehicle '{vehicle}' is not listed under '{category}'")]
    UnknownVehicle { category: String, vehicle: String },
}

/// The static vehicle catalog. Built once at startup and shared by
/// reference; there are no mutation operations.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Category>,
}

impl Catalog {
    /// The standard fleet. Prices are whole rupees.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                Category {
                    key: "scooters",
                    display_name: "Scooters",
                    rate_card: RateCard::Slab {
                        twelve_hour: 300,
                        twenty_four_hour: 500,
                    },
                    vehicles: &["Honda Activa 6G", "TVS Jupiter", "Suzuki Access 125"],
                },
                Category {
                    key: "bikes",
                    display_name: "Bikes",
                    rate_card: RateCard::Slab {
                        twelve_hour: 450,
                        twenty_four_hour: 750,
                    },
                    vehicles: &[
                        "Royal Enfield Classic 350",
                        "Bajaj Pulsar NS200",
                        "Yamaha FZ-S",
                    ],
                },
                Category {
                    key: "hatchbacks",
                    display_name: "Hatchbacks",
                    rate_card: RateCard::Slab {
                        twelve_hour: 800,
                        twenty_four_hour: 1300,
                    },
                    vehicles: &["Maruti Swift", "Hyundai i20", "Tata Altroz"],
                },
                Category {
                    key: "sedans",
                    display_name: "Sedans",
                    rate_card: RateCard::Slab {
                        twelve_hour: 1100,
                        twenty_four_hour: 1800,
                    },
                    vehicles: &["Honda City", "Hyundai Verna", "Skoda Slavia"],
                },
                Category {
                    key: "suvs",
                    display_name: "SUVs",
                    rate_card: RateCard::Slab {
                        twelve_hour: 1500,
                        twenty_four_hour: 2400,
                    },
                    vehicles: &["Mahindra Thar", "Tata Harrier", "Hyundai Creta"],
                },
                Category {
                    key: "minibus",
                    display_name: "Minibus",
                    rate_card: RateCard::PerDay { rate: 1100 },
                    vehicles: &["Force Traveller 12-Seater", "Tempo Traveller 17-Seater"],
                },
            ],
        }
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.entries
    }

    /// Look up a category by key. An unknown key is a lookup failure,
    /// never a silent default.
    pub fn get(&self, key: &str) -> Result<&Category, CatalogError> {
        self.entries
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| CatalogError::UnknownCategory(key.to_string()))
    }
}
