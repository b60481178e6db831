use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CableType {
    Rg1855,
    Rg1505,
    Rg1694,
    Cat6,
    Other,
}

impl CableType {
    pub const ALL: [CableType; 5] = [
        CableType::Rg1855,
        CableType::Rg1505,
        CableType::Rg1694,
        CableType::Cat6,
        CableType::Other,
    ];

    /// Stored form, as written into project files.
    pub fn code(self) -> &'static str {
        match self {
            CableType::Rg1855 => "1855",
            CableType::Rg1505 => "1505",
            CableType::Rg1694 => "1694",
            CableType::Cat6 => "cat6",
            CableType::Other => "other",
        }
    }

    /// Label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            CableType::Rg1855 => "1855",
            CableType::Rg1505 => "1505",
            CableType::Rg1694 => "1694",
            CableType::Cat6 => "Cat6",
            CableType::Other => "Other",
        }
    }
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown cable type: {0}")]
pub struct UnknownCableType(pub String);

impl FromStr for CableType {
    type Err = UnknownCableType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1855" => Ok(CableType::Rg1855),
            "1505" => Ok(CableType::Rg1505),
            "1694" => Ok(CableType::Rg1694),
            "cat6" => Ok(CableType::Cat6),
            "other" | "cat5" => Ok(CableType::Other),
            _ => Err(UnknownCableType(value.to_string())),
        }
    }
}

/// A cable run entered in itemized mode. The type may still be unset while
/// the row is being filled in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CableLineItem {
    pub cable_type: Option<CableType>,
    pub qty: f64,
    pub length: f64,
}

impl CableLineItem {
    pub fn new(cable_type: Option<CableType>, qty: f64, length: f64) -> Self {
        Self {
            cable_type,
            qty,
            length,
        }
    }

    /// Rows with a zero quantity or length are a normal mid-entry state and
    /// are left out of the totals.
    pub fn is_countable(&self) -> bool {
        self.qty > 0.0 && self.length > 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CableLengthMode {
    #[default]
    Average,
    Itemized,
}

impl CableLengthMode {
    pub fn code(self) -> &'static str {
        match self {
            CableLengthMode::Average => "average",
            CableLengthMode::Itemized => "itemized",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "average" => Some(CableLengthMode::Average),
            "itemized" | "calculated" => Some(CableLengthMode::Itemized),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cable_types_parse_from_their_stored_codes() {
        for cable_type in CableType::ALL {
            assert_eq!(cable_type.code().parse::<CableType>(), Ok(cable_type));
        }
        assert_eq!("CAT6".parse::<CableType>(), Ok(CableType::Cat6));
        assert_eq!("cat5".parse::<CableType>(), Ok(CableType::Other));
        assert!("cat7".parse::<CableType>().is_err());
    }

    #[test]
    fn line_items_with_zero_qty_or_length_are_not_countable() {
        assert!(CableLineItem::new(None, 2.0, 10.0).is_countable());
        assert!(!CableLineItem::new(None, 0.0, 10.0).is_countable());
        assert!(!CableLineItem::new(Some(CableType::Cat6), 3.0, 0.0).is_countable());
    }

    #[test]
    fn calculated_is_accepted_as_itemized_mode() {
        assert_eq!(
            CableLengthMode::from_code("calculated"),
            Some(CableLengthMode::Itemized)
        );
        assert_eq!(
            CableLengthMode::from_code("average"),
            Some(CableLengthMode::Average)
        );
        assert_eq!(CableLengthMode::from_code("bogus"), None);
    }
}
