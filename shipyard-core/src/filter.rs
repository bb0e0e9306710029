//! Criteria-based filtering of ship collections.

use chrono::{DateTime, Utc};

use crate::domain::{Ship, ShipType};

/// Optional per-field predicates, combined with logical AND.
///
/// An unset predicate imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Case-sensitive substring of the name.
    pub name: Option<String>,
    /// Case-sensitive substring of the planet.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Excludes ships produced strictly before this instant.
    pub after: Option<DateTime<Utc>>,
    /// Excludes ships produced strictly after this instant.
    pub before: Option<DateTime<Utc>>,
    /// Exact used flag.
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    pub max_speed: Option<f64>,
    /// Inclusive lower crew size bound.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew size bound.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// Whether no predicate is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a single ship satisfies every supplied predicate.
    pub fn matches(&self, ship: &Ship) -> bool {
        contains(&ship.name, self.name.as_deref())
            && contains(&ship.planet, self.planet.as_deref())
            && self.ship_type.is_none_or(|wanted| ship.ship_type == wanted)
            && self.after.is_none_or(|after| ship.prod_date >= after)
            && self.before.is_none_or(|before| ship.prod_date <= before)
            && self.is_used.is_none_or(|wanted| ship.is_used == wanted)
            && within(ship.speed, self.min_speed, self.max_speed)
            && within(ship.crew_size, self.min_crew_size, self.max_crew_size)
            && within(ship.rating, self.min_rating, self.max_rating)
    }

    /// Keep the ships that match, preserving their relative order.
    pub fn apply(&self, ships: Vec<Ship>) -> Vec<Ship> {
        if self.is_empty() {
            return ships;
        }
        ships.into_iter().filter(|ship| self.matches(ship)).collect()
    }

    /// Count matching ships without materialising the subsequence.
    pub fn count(&self, ships: &[Ship]) -> usize {
        ships.iter().filter(|ship| self.matches(ship)).count()
    }
}

fn contains(value: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| value.contains(needle))
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}
