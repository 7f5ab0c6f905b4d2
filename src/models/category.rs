//! Expense category model
//!
//! A closed set of known household categories plus an `Unknown` variant that
//! carries any other label verbatim. Categories serialize as their display
//! label, the same strings Portuguese-keyed backups carry under `categoria`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Colour used for any label outside the known set
pub const FALLBACK_COLOR: &str = "#CBD5E1";

static KNOWN: [Category; 13] = [
    Category::Water,
    Category::Food,
    Category::Childcare,
    Category::OnlineShopping,
    Category::Ecogis,
    Category::Electricity,
    Category::Extras,
    Category::Pharmacy,
    Category::FuelCar,
    Category::FuelMotorcycle,
    Category::Others,
    Category::Bakery,
    Category::Phone,
];

/// Expense category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Water,
    Food,
    Childcare,
    OnlineShopping,
    Ecogis,
    Electricity,
    Extras,
    Pharmacy,
    FuelCar,
    FuelMotorcycle,
    Others,
    Bakery,
    Phone,
    /// A label outside the known set, kept as-is
    Unknown(String),
}

impl Category {
    /// All known categories in display order
    pub fn known() -> &'static [Category] {
        &KNOWN
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            Self::Water => "Água",
            Self::Food => "Alimentação",
            Self::Childcare => "Benício",
            Self::OnlineShopping => "Compras Online",
            Self::Ecogis => "Ecogis",
            Self::Electricity => "Energia",
            Self::Extras => "Extras",
            Self::Pharmacy => "Farmácia",
            Self::FuelCar => "Gasolina C",
            Self::FuelMotorcycle => "Gasolina M",
            Self::Others => "Outros",
            Self::Bakery => "Padaria",
            Self::Phone => "Telefone",
            Self::Unknown(label) => label,
        }
    }

    /// Chart colour for this category
    pub fn color(&self) -> &'static str {
        match self {
            Self::Water => "#34D399",
            Self::Food => "#F87171",
            Self::Childcare => "#F472B6",
            Self::OnlineShopping => "#6366F1",
            Self::Ecogis => "#10B981",
            Self::Electricity => "#FBBF24",
            Self::Extras => "#A78BFA",
            Self::Pharmacy => "#FB7185",
            Self::FuelCar => "#FB923C",
            Self::FuelMotorcycle => "#F59E0B",
            Self::Others => "#94A3B8",
            Self::Bakery => "#92400E",
            Self::Phone => "#60A5FA",
            Self::Unknown(_) => FALLBACK_COLOR,
        }
    }

    /// Resolve a label. Matching is exact first, then case-insensitive;
    /// anything else becomes `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        let known = Self::known();
        if let Some(found) = known.iter().find(|c| c.label() == trimmed) {
            return found.clone();
        }
        let lower = trimmed.to_lowercase();
        known
            .iter()
            .find(|c| c.label().to_lowercase() == lower)
            .cloned()
            .unwrap_or_else(|| Self::Unknown(label.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Others
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_resolve() {
        for category in Category::known() {
            assert_eq!(&Category::from_label(category.label()), category);
        }
        assert_eq!(Category::from_label("farmácia"), Category::Pharmacy);
    }

    #[test]
    fn test_unknown_label_is_kept() {
        let c = Category::from_label("Pets");
        assert_eq!(c, Category::Unknown("Pets".into()));
        assert_eq!(c.label(), "Pets");
        assert_eq!(c.color(), FALLBACK_COLOR);
        assert!(!c.is_known());
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Category::FuelCar).unwrap();
        assert_eq!(json, "\"Gasolina C\"");
        let back: Category = serde_json::from_str("\"Telefone\"").unwrap();
        assert_eq!(back, Category::Phone);
        let unknown: Category = serde_json::from_str("\"Gym\"").unwrap();
        assert_eq!(unknown, Category::Unknown("Gym".into()));
    }

    #[test]
    fn test_every_known_category_has_distinct_label() {
        let mut labels: Vec<_> = Category::known().iter().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Category::known().len());
    }
}
