//! Budget category model
//!
//! Every budget category belongs to one of the four buckets of the budget
//! split. Expenses carry their category embedded so spend can be summed per
//! bucket without a lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// The four budget buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Rent, insurance, contracts
    Fixed,
    /// Groceries, transport, health
    Needs,
    /// Leisure and everything optional
    Wants,
    Savings,
}

impl CategoryType {
    /// All buckets in display order
    pub const ALL: [CategoryType; 4] = [Self::Fixed, Self::Needs, Self::Wants, Self::Savings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Needs => "needs",
            Self::Wants => "wants",
            Self::Savings => "savings",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Needs => write!(f, "Needs"),
            Self::Wants => write!(f, "Wants"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "needs" => Ok(Self::Needs),
            "wants" => Ok(Self::Wants),
            "savings" => Ok(Self::Savings),
            other => Err(format!(
                "Unknown category type '{}' (expected fixed, needs, wants or savings)",
                other
            )),
        }
    }
}

/// A named budget category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    /// Bucket this category's spend counts against
    #[serde(rename = "type")]
    pub kind: CategoryType,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryType) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
        }
    }

    /// The categories a fresh profile starts with, one per bucket
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new("Miete", CategoryType::Fixed),
            Category::new("Lebensmittel", CategoryType::Needs),
            Category::new("Freizeit", CategoryType::Wants),
            Category::new("Notgroschen", CategoryType::Savings),
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.as_str())
    }
}
