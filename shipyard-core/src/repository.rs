//! Storage collaborator abstraction and an in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::Ship;
use crate::error::{Result, ShipyardError};

/// Persistence operations the core relies on.
///
/// Each call is treated as atomic per ship; the core does not serialize
/// concurrent writers.
#[cfg_attr(test, mockall::automock)]
pub trait ShipRepository {
    /// Load every stored ship.
    fn find_all(&self) -> Result<Vec<Ship>>;
    /// Load one ship by identifier.
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>>;
    /// Insert a ship without an id (assigning one) or overwrite an existing one.
    fn save(&self, ship: Ship) -> Result<Ship>;
    /// Remove a stored ship.
    fn delete(&self, ship: &Ship) -> Result<()>;
}

/// Process-local repository backed by a `BTreeMap`.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryShipRepository {
    inner: Arc<RwLock<MemoryStore>>,
}

#[derive(Debug, Default)]
struct MemoryStore {
    ships: BTreeMap<i64, Ship>,
    last_id: i64,
}

impl MemoryShipRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `ships`.
    ///
    /// Ships without an id are assigned one in iteration order.
    pub fn seeded(ships: impl IntoIterator<Item = Ship>) -> Result<Self> {
        let repository = Self::new();
        for ship in ships {
            repository.save(ship)?;
        }
        Ok(repository)
    }

    /// Number of stored ships.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.ships.len())
    }

    /// Whether the repository holds no ships.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryStore>> {
        self.inner
            .read()
            .map_err(|_| ShipyardError::storage("ship store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryStore>> {
        self.inner
            .write()
            .map_err(|_| ShipyardError::storage("ship store lock poisoned"))
    }
}

impl ShipRepository for MemoryShipRepository {
    fn find_all(&self) -> Result<Vec<Ship>> {
        Ok(self.read()?.ships.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        Ok(self.read()?.ships.get(&id).cloned())
    }

    fn save(&self, mut ship: Ship) -> Result<Ship> {
        let mut store = self.write()?;
        let id = match ship.id {
            Some(id) => {
                store.last_id = store.last_id.max(id);
                id
            }
            None => {
                store.last_id += 1;
                store.last_id
            }
        };
        ship.id = Some(id);
        store.ships.insert(id, ship.clone());
        Ok(ship)
    }

    fn delete(&self, ship: &Ship) -> Result<()> {
        if let Some(id) = ship.id {
            self.write()?.ships.remove(&id);
        }
        Ok(())
    }
}
