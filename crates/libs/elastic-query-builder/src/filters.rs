use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QueryBuilderError;

/// Dataset a consumer can restrict a search to. Every dispatch rule carries
/// the categories it serves; requests without a filter run them all.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bag,
    Brk,
    Nummeraanduiding,
    Gebieden,
    Pand,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bag => "bag",
            Category::Brk => "brk",
            Category::Nummeraanduiding => "nummeraanduiding",
            Category::Gebieden => "gebieden",
            Category::Pand => "pand",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QueryBuilderError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "bag" => Ok(Category::Bag),
            "brk" => Ok(Category::Brk),
            "nummeraanduiding" => Ok(Category::Nummeraanduiding),
            "gebieden" => Ok(Category::Gebieden),
            "pand" => Ok(Category::Pand),
            other => Err(QueryBuilderError::InvalidCategory(other.to_string())),
        }
    }
}

/// Named switches for optional builder variants.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeatureFlags {
    exact_toevoeging_boost: bool,
}

impl FeatureFlags {
    pub fn build() -> Self {
        Self::default()
    }

    pub fn with_exact_toevoeging_boost(mut self) -> Self {
        self.exact_toevoeging_boost = true;
        self
    }

    pub fn exact_toevoeging_boost(&self) -> bool {
        self.exact_toevoeging_boost
    }
}
