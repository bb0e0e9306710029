//! Ordering of ship collections.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Ship;
use crate::error::ShipyardError;

/// Sort keys accepted by list requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipOrder {
    /// Storage identifier.
    Id,
    /// Speed.
    Speed,
    /// Production date.
    Date,
    /// Rating.
    Rating,
}

/// Comparison function over two ships.
pub type ShipComparator = fn(&Ship, &Ship) -> Ordering;

impl ShipOrder {
    /// Every sort key.
    pub const ALL: [ShipOrder; 4] = [
        ShipOrder::Id,
        ShipOrder::Speed,
        ShipOrder::Date,
        ShipOrder::Rating,
    ];

    /// Stable wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipOrder::Id => "ID",
            ShipOrder::Speed => "SPEED",
            ShipOrder::Date => "DATE",
            ShipOrder::Rating => "RATING",
        }
    }

    /// Ascending comparator for this key.
    pub fn comparator(self) -> ShipComparator {
        match self {
            ShipOrder::Id => by_id,
            ShipOrder::Speed => by_speed,
            ShipOrder::Date => by_date,
            ShipOrder::Rating => by_rating,
        }
    }
}

fn by_id(a: &Ship, b: &Ship) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_speed(a: &Ship, b: &Ship) -> Ordering {
    a.speed.total_cmp(&b.speed)
}

fn by_date(a: &Ship, b: &Ship) -> Ordering {
    a.prod_date.cmp(&b.prod_date)
}

fn by_rating(a: &Ship, b: &Ship) -> Ordering {
    a.rating.total_cmp(&b.rating)
}

impl fmt::Display for ShipOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipOrder {
    type Err = ShipyardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ShipOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == value)
            .ok_or_else(|| ShipyardError::invalid(format!("unknown sort order: {value}")))
    }
}

/// Sort ascending by `order`, keeping equal keys in input order.
///
/// With no order the input is returned untouched.
pub fn sort_ships(mut ships: Vec<Ship>, order: Option<ShipOrder>) -> Vec<Ship> {
    if let Some(order) = order {
        ships.sort_by(order.comparator());
    }
    ships
}
