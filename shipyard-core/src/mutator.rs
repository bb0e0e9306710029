//! Partial updates of existing ships.

use crate::domain::{Ship, ShipPatch};
use crate::error::Result;
use crate::rating::compute_rating;
use crate::validator::validate_patch;

/// Apply `patch` on top of `current`, returning the updated ship.
///
/// Every supplied field is validated before anything is applied, so an
/// invalid patch leaves the caller's ship as it was. The rating is recomputed
/// whenever speed, used flag or production date is supplied, even if the
/// value is unchanged.
pub fn apply_patch(current: &Ship, patch: &ShipPatch) -> Result<Ship> {
    validate_patch(patch)?;

    let mut updated = current.clone();
    if let Some(name) = &patch.name {
        updated.name = name.clone();
    }
    if let Some(planet) = &patch.planet {
        updated.planet = planet.clone();
    }
    if let Some(ship_type) = patch.ship_type {
        updated.ship_type = ship_type;
    }
    if let Some(prod_date) = patch.prod_date {
        updated.prod_date = prod_date;
    }
    if let Some(is_used) = patch.is_used {
        updated.is_used = is_used;
    }
    if let Some(speed) = patch.speed {
        updated.speed = speed;
    }
    if let Some(crew_size) = patch.crew_size {
        updated.crew_size = crew_size;
    }

    if patch.affects_rating() {
        updated.rating = compute_rating(updated.speed, updated.is_used, &updated.prod_date);
    }

    Ok(updated)
}
