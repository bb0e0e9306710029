//! Database models for Shipyard server.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use shipyard_core::{Ship, ShipType, ShipyardError};

use crate::schema::ships;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = ships)]
/// Ship database record.
pub struct ShipRow {
    /// Ship identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type label.
    pub ship_type: String,
    /// Production timestamp.
    pub prod_date: DateTime<Utc>,
    /// Second-hand flag.
    pub is_used: bool,
    /// Maximum speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = ships)]
/// Insertable or updatable ship columns; the id is left to the database.
pub struct ShipColumns {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship type label.
    pub ship_type: String,
    /// Production timestamp.
    pub prod_date: DateTime<Utc>,
    /// Second-hand flag.
    pub is_used: bool,
    /// Maximum speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl TryFrom<ShipRow> for Ship {
    type Error = ShipyardError;

    fn try_from(row: ShipRow) -> Result<Self, Self::Error> {
        let ship_type: ShipType = row.ship_type.parse().map_err(|_| {
            ShipyardError::Storage(format!(
                "ship {} has unknown type {}",
                row.id, row.ship_type
            ))
        })?;
        Ok(Ship {
            id: Some(row.id),
            name: row.name,
            planet: row.planet,
            ship_type,
            prod_date: row.prod_date,
            is_used: row.is_used,
            speed: row.speed,
            crew_size: row.crew_size,
            rating: row.rating,
        })
    }
}

impl From<&Ship> for ShipColumns {
    fn from(ship: &Ship) -> Self {
        Self {
            name: ship.name.clone(),
            planet: ship.planet.clone(),
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date,
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}
