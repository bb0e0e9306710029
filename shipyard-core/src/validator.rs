//! Field-level validation rules for ships.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{ShipPatch, ShipType};
use crate::error::{Result, ShipyardError};

/// Maximum length, in characters, of names and planets.
pub const MAX_TEXT_LEN: usize = 50;
/// Earliest accepted production year.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Latest accepted production year.
pub const MAX_PROD_YEAR: i32 = 3019;
/// Lowest accepted speed.
pub const MIN_SPEED: f64 = 0.01;
/// Highest accepted speed.
pub const MAX_SPEED: f64 = 0.99;
/// Smallest accepted crew.
pub const MIN_CREW_SIZE: i32 = 1;
/// Largest accepted crew.
pub const MAX_CREW_SIZE: i32 = 9999;

/// A ship that passed creation checks, ready for rating and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidShip {
    /// Ship name.
    pub name: String,
    /// Home planet.
    pub planet: String,
    /// Ship class.
    pub ship_type: ShipType,
    /// Production date.
    pub prod_date: DateTime<Utc>,
    /// Second-hand flag, `false` when the request omitted it.
    pub is_used: bool,
    /// Maximum speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
}

/// Names and planets must be non-empty and at most [`MAX_TEXT_LEN`] characters.
pub fn is_text_valid(value: &str) -> bool {
    !value.is_empty() && value.chars().count() <= MAX_TEXT_LEN
}

/// Every variant of the closed [`ShipType`] enum is legal.
pub fn is_ship_type_valid(ship_type: ShipType) -> bool {
    ShipType::ALL.contains(&ship_type)
}

/// Production year (UTC) must fall in `[MIN_PROD_YEAR, MAX_PROD_YEAR]`.
pub fn is_prod_date_valid(prod_date: &DateTime<Utc>) -> bool {
    (MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&prod_date.year())
}

/// Speed must fall in `[MIN_SPEED, MAX_SPEED]`; NaN never does.
pub fn is_speed_valid(speed: f64) -> bool {
    (MIN_SPEED..=MAX_SPEED).contains(&speed)
}

/// Crew size must fall in `[MIN_CREW_SIZE, MAX_CREW_SIZE]`.
pub fn is_crew_size_valid(crew_size: i32) -> bool {
    (MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size)
}

/// Validate every field present in a patch, stopping at the first failure.
///
/// Absent fields are not checked.
pub fn validate_patch(patch: &ShipPatch) -> Result<()> {
    if let Some(name) = patch.name.as_deref() {
        check(is_text_valid(name), "name must be 1-50 characters")?;
    }
    if let Some(planet) = patch.planet.as_deref() {
        check(is_text_valid(planet), "planet must be 1-50 characters")?;
    }
    if let Some(ship_type) = patch.ship_type {
        check(is_ship_type_valid(ship_type), "shipType is not a known variant")?;
    }
    if let Some(prod_date) = patch.prod_date.as_ref() {
        check(
            is_prod_date_valid(prod_date),
            "prodDate year must be within [2800, 3019]",
        )?;
    }
    if let Some(speed) = patch.speed {
        check(is_speed_valid(speed), "speed must be within [0.01, 0.99]")?;
    }
    if let Some(crew_size) = patch.crew_size {
        check(
            is_crew_size_valid(crew_size),
            "crewSize must be within [1, 9999]",
        )?;
    }
    Ok(())
}

/// Check that a patch describes a complete, legal new ship.
///
/// Name, planet, type, crew size, speed and production date are required.
/// The used flag defaults to `false`.
pub fn validate_new_ship(patch: &ShipPatch) -> Result<ValidShip> {
    let name = required(patch.name.as_ref(), "name")?;
    let planet = required(patch.planet.as_ref(), "planet")?;
    let ship_type = required(patch.ship_type.as_ref(), "shipType")?;
    let crew_size = required(patch.crew_size.as_ref(), "crewSize")?;
    let speed = required(patch.speed.as_ref(), "speed")?;
    let prod_date = required(patch.prod_date.as_ref(), "prodDate")?;
    validate_patch(patch)?;

    Ok(ValidShip {
        name: name.clone(),
        planet: planet.clone(),
        ship_type: *ship_type,
        prod_date: *prod_date,
        is_used: patch.is_used.unwrap_or(false),
        speed: *speed,
        crew_size: *crew_size,
    })
}

fn required<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T> {
    value.ok_or_else(|| ShipyardError::invalid(format!("{field} is required")))
}

fn check(valid: bool, message: &str) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(ShipyardError::invalid(message))
    }
}
