use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_PRIZES: usize = 2;
pub const LABEL_MAX_CHARS: usize = 8;
const LABEL_KEEP_CHARS: usize = LABEL_MAX_CHARS - 1;
const ELLIPSIS: &str = "...";

const PALETTE: [(u8, u8, u8); 8] = [
    (0xf4, 0x3f, 0x5e),
    (0x8b, 0x5c, 0xf6),
    (0x3b, 0x82, 0xf6),
    (0x10, 0xb9, 0x81),
    (0xf5, 0x9e, 0x0b),
    (0xec, 0x48, 0x99),
    (0x06, 0xb6, 0xd4),
    (0x84, 0xcc, 0x16),
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("At least {required} prizes are required, found {found}")]
    TooFewPrizes { found: usize, required: usize },
    #[error("Prize '{id}' has weight {weight}; weights must be finite and greater than zero")]
    InvalidWeight { id: PrizeId, weight: f64 },
    #[error("Total prize weight is not a finite number")]
    DegenerateWeights,
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("Invalid prize '{0}', expected NAME:WEIGHT[:#COLOR]")]
    InvalidPrizeSpec(String),
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct PrizeId(String);

crate::impl_string_newtype!(PrizeId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct PrizeName(String);

crate::impl_string_newtype!(PrizeName);

impl PrizeName {
    /// Text drawn inside a sector. Names longer than [`LABEL_MAX_CHARS`] keep their first seven
    /// characters followed by an ellipsis.
    pub fn label(&self) -> String {
        if self.chars().count() > LABEL_MAX_CHARS {
            let head: String = self.chars().take(LABEL_KEEP_CHARS).collect();
            format!("{head}{ELLIPSIS}")
        } else {
            self.0.clone()
        }
    }
}

/// Sector fill color, written as `#rrggbb` in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct PrizeColor(Srgb<u8>);

impl PrizeColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Color for the `index`-th prize when none was configured.
    pub fn from_palette(index: usize) -> Self {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        Self::new(r, g, b)
    }

    /// Shifts every channel by `amount`, saturating at 0 and 255.
    pub fn shade(&self, amount: i16) -> Self {
        let adjust = |c: u8| (i16::from(c) + amount).clamp(0, 255) as u8;
        Self::new(adjust(self.0.red), adjust(self.0.green), adjust(self.0.blue))
    }

    /// Channels in `0.0..=1.0`, ready for cairo.
    pub fn components(&self) -> (f64, f64, f64) {
        let color: Srgb<f64> = self.0.into_format();
        color.into_components()
    }
}

impl FromStr for PrizeColor {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.starts_with('#') {
            return Err(WheelError::InvalidColor(s.to_string()));
        }
        Srgb::from_str(trimmed)
            .map(Self)
            .map_err(|_| WheelError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for PrizeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub id: PrizeId,
    pub name: PrizeName,
    pub weight: f64,
    pub color: PrizeColor,
}

impl Prize {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: f64,
        color: PrizeColor,
    ) -> Self {
        Self {
            id: PrizeId::new(id),
            name: PrizeName::new(name),
            weight,
            color,
        }
    }

    fn has_valid_weight(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }
}

/// `NAME:WEIGHT[:#COLOR]`, the command line form of a prize.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeSpec {
    pub name: PrizeName,
    pub weight: f64,
    pub color: Option<PrizeColor>,
}

impl PrizeSpec {
    /// The name doubles as the id, so repeating a name on the command line merges the entries.
    pub fn into_prize(self, index: usize) -> Prize {
        Prize {
            id: PrizeId::new(self.name.as_str()),
            color: self.color.unwrap_or_else(|| PrizeColor::from_palette(index)),
            name: self.name,
            weight: self.weight,
        }
    }
}

impl FromStr for PrizeSpec {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WheelError::InvalidPrizeSpec(s.to_string());
        let mut parts = s.splitn(3, ':');

        let name = parts.next().map(str::trim).filter(|n| !n.is_empty());
        let weight = parts.next().and_then(|w| w.trim().parse::<f64>().ok());
        let (Some(name), Some(weight)) = (name, weight) else {
            return Err(invalid());
        };
        let color = parts.next().map(PrizeColor::from_str).transpose()?;

        Ok(Self {
            name: PrizeName::new(name),
            weight,
            color,
        })
    }
}

/// A validated snapshot of the prizes on the wheel, in drawing order.
///
/// Entries that share an id are folded into the first of them with their weights summed, so a
/// list always holds distinct prizes. Every weight is finite and positive and there are at least
/// [`MIN_PRIZES`] entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeList {
    prizes: Vec<Prize>,
    total_weight: f64,
}

impl PrizeList {
    pub fn new(prizes: Vec<Prize>) -> Result<Self, WheelError> {
        let mut merged: Vec<Prize> = Vec::with_capacity(prizes.len());

        for prize in prizes {
            if !prize.has_valid_weight() {
                return Err(WheelError::InvalidWeight {
                    id: prize.id,
                    weight: prize.weight,
                });
            }
            match merged.iter_mut().find(|p| p.id == prize.id) {
                Some(existing) => existing.weight += prize.weight,
                None => merged.push(prize),
            }
        }

        if merged.len() < MIN_PRIZES {
            return Err(WheelError::TooFewPrizes {
                found: merged.len(),
                required: MIN_PRIZES,
            });
        }

        let total_weight: f64 = merged.iter().map(|p| p.weight).sum();
        if !total_weight.is_finite() {
            return Err(WheelError::DegenerateWeights);
        }

        Ok(Self {
            prizes: merged,
            total_weight,
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.prizes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prize> {
        self.prizes.iter()
    }

    /// Selection probability of the prize at `index`.
    pub fn share(&self, index: usize) -> Option<f64> {
        self.get(index).map(|p| p.weight / self.total_weight)
    }
}

impl<'a> IntoIterator for &'a PrizeList {
    type Item = &'a Prize;
    type IntoIter = std::slice::Iter<'a, Prize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
