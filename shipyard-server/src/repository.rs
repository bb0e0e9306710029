//! Storage backends for the ship catalog.

use diesel::prelude::*;
use shipyard_core::{MemoryShipRepository, Result, Ship, ShipRepository, ShipyardError};

use crate::db::DbPool;
use crate::models::{ShipColumns, ShipRow};
use crate::schema::ships;

/// Diesel-backed ship repository.
#[derive(Clone)]
pub struct PgShipRepository {
    pool: DbPool,
}

impl PgShipRepository {
    /// Wrap a connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>>
    {
        self.pool.get().map_err(ShipyardError::storage)
    }
}

impl ShipRepository for PgShipRepository {
    fn find_all(&self) -> Result<Vec<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .order(ships::id.asc())
            .select(ShipRow::as_select())
            .load::<ShipRow>(&mut conn)
            .map_err(ShipyardError::storage)?
            .into_iter()
            .map(Ship::try_from)
            .collect()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .find(id)
            .select(ShipRow::as_select())
            .first::<ShipRow>(&mut conn)
            .optional()
            .map_err(ShipyardError::storage)?
            .map(Ship::try_from)
            .transpose()
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        let mut conn = self.conn()?;
        let columns = ShipColumns::from(&ship);
        let row = match ship.id {
            None => diesel::insert_into(ships::table)
                .values(&columns)
                .returning(ShipRow::as_returning())
                .get_result::<ShipRow>(&mut conn)
                .map_err(ShipyardError::storage)?,
            Some(id) => diesel::update(ships::table.find(id))
                .set(&columns)
                .returning(ShipRow::as_returning())
                .get_result::<ShipRow>(&mut conn)
                .optional()
                .map_err(ShipyardError::storage)?
                .ok_or(ShipyardError::NotFound(id))?,
        };
        Ship::try_from(row)
    }

    fn delete(&self, ship: &Ship) -> Result<()> {
        let Some(id) = ship.id else {
            return Ok(());
        };
        let mut conn = self.conn()?;
        diesel::delete(ships::table.find(id))
            .execute(&mut conn)
            .map_err(ShipyardError::storage)?;
        Ok(())
    }
}

/// Storage selected at startup.
#[derive(Clone)]
pub enum Storage {
    /// PostgreSQL through Diesel.
    Postgres(PgShipRepository),
    /// Process-local map, lost on restart.
    Memory(MemoryShipRepository),
}

impl Storage {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Storage::Postgres(_) => "postgres",
            Storage::Memory(_) => "memory",
        }
    }
}

impl ShipRepository for Storage {
    fn find_all(&self) -> Result<Vec<Ship>> {
        match self {
            Storage::Postgres(repository) => repository.find_all(),
            Storage::Memory(repository) => repository.find_all(),
        }
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        match self {
            Storage::Postgres(repository) => repository.find_by_id(id),
            Storage::Memory(repository) => repository.find_by_id(id),
        }
    }

    fn save(&self, ship: Ship) -> Result<Ship> {
        match self {
            Storage::Postgres(repository) => repository.save(ship),
            Storage::Memory(repository) => repository.save(ship),
        }
    }

    fn delete(&self, ship: &Ship) -> Result<()> {
        match self {
            Storage::Postgres(repository) => repository.delete(ship),
            Storage::Memory(repository) => repository.delete(ship),
        }
    }
}
