//! Domain entities for Shipyard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ShipyardError;

/// The fixed set of ship classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    /// Cargo and passenger transport.
    Transport,
    /// Armed vessel.
    Military,
    /// Trading vessel.
    Merchant,
}

impl ShipType {
    /// Every ship type, in declaration order.
    pub const ALL: [ShipType; 3] = [ShipType::Transport, ShipType::Military, ShipType::Merchant];

    /// Stable wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = ShipyardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ShipType::ALL
            .into_iter()
            .find(|ship_type| ship_type.as_str() == value)
            .ok_or_else(|| ShipyardError::invalid(format!("unknown ship type: {value}")))
    }
}

/// A catalogued ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Storage-assigned identifier; absent until first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship class.
    pub ship_type: ShipType,
    /// Production date, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Whether the ship is second-hand.
    pub is_used: bool,
    /// Maximum speed as a fraction of light speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating, see [`crate::rating::compute_rating`].
    pub rating: f64,
}

/// A partial ship record used for creation and updates.
///
/// `None` means "leave unchanged"; there is no way to clear a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipPatch {
    /// Ship name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Home planet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Ship class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// Production date as epoch milliseconds.
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Whether the ship is second-hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Maximum speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Crew size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

impl ShipPatch {
    /// Whether the patch touches a field the rating depends on.
    pub fn affects_rating(&self) -> bool {
        self.speed.is_some() || self.is_used.is_some() || self.prod_date.is_some()
    }
}
