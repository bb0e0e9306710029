//! Catalog operations composed from the core components.

use log::{debug, info};

use crate::domain::{Ship, ShipPatch};
use crate::error::{Result, ShipyardError};
use crate::filter::ShipFilter;
use crate::mutator::apply_patch;
use crate::page::{PageRequest, paginate};
use crate::rating::compute_rating;
use crate::repository::ShipRepository;
use crate::sort::{ShipOrder, sort_ships};
use crate::validator::validate_new_ship;

/// Ship catalog backed by an injected repository.
#[derive(Debug, Clone)]
pub struct ShipService<R> {
    repository: R,
}

impl<R: ShipRepository> ShipService<R> {
    /// Wrap a repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Borrow the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Filter, sort, then page the stored ships.
    pub fn list(
        &self,
        filter: &ShipFilter,
        order: Option<ShipOrder>,
        page: &PageRequest,
    ) -> Result<Vec<Ship>> {
        let ships = filter.apply(self.repository.find_all()?);
        debug!("{} ships matched filter", ships.len());
        Ok(paginate(sort_ships(ships, order), page))
    }

    /// Count the stored ships matching `filter`.
    pub fn count(&self, filter: &ShipFilter) -> Result<usize> {
        Ok(filter.count(&self.repository.find_all()?))
    }

    /// Validate and store a new ship, computing its rating.
    pub fn create(&self, patch: ShipPatch) -> Result<Ship> {
        let valid = validate_new_ship(&patch)?;
        let rating = compute_rating(valid.speed, valid.is_used, &valid.prod_date);
        let ship = Ship {
            id: None,
            name: valid.name,
            planet: valid.planet,
            ship_type: valid.ship_type,
            prod_date: valid.prod_date,
            is_used: valid.is_used,
            speed: valid.speed,
            crew_size: valid.crew_size,
            rating,
        };
        let saved = self.repository.save(ship)?;
        info!("created ship {:?} ({})", saved.id, saved.name);
        Ok(saved)
    }

    /// Fetch one ship.
    pub fn get(&self, id: i64) -> Result<Ship> {
        self.repository
            .find_by_id(id)?
            .ok_or(ShipyardError::NotFound(id))
    }

    /// Apply a partial update and persist it.
    ///
    /// Nothing is saved when any supplied field is invalid.
    pub fn update(&self, id: i64, patch: ShipPatch) -> Result<Ship> {
        let current = self.get(id)?;
        let updated = apply_patch(&current, &patch)?;
        let saved = self.repository.save(updated)?;
        info!("updated ship {id}");
        Ok(saved)
    }

    /// Remove a ship.
    pub fn delete(&self, id: i64) -> Result<()> {
        let ship = self.get(id)?;
        self.repository.delete(&ship)?;
        info!("deleted ship {id}");
        Ok(())
    }
}

/// Parse a path identifier; only positive integers are accepted.
pub fn parse_id(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ShipyardError::invalid(format!("invalid ship id: {raw}"))),
    }
}
