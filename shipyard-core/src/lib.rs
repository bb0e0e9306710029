#![deny(missing_docs)]
//! Shipyard core library.
//!
//! This crate contains the ship domain types and the query, validation and
//! rating rules behind the Shipyard catalog.

pub mod domain;
pub mod error;
pub mod filter;
pub mod mutator;
pub mod page;
pub mod rating;
pub mod report;
pub mod repository;
pub mod service;
pub mod sort;
pub mod validator;

pub use domain::{Ship, ShipPatch, ShipType};
pub use error::{Result, ShipyardError};
pub use filter::ShipFilter;
pub use mutator::apply_patch;
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, paginate};
pub use rating::{compute_rating, round2};
pub use report::{render_json, render_ship_detail, render_ship_table};
pub use repository::{MemoryShipRepository, ShipRepository};
pub use service::{ShipService, parse_id};
pub use sort::{ShipOrder, sort_ships};
pub use validator::{ValidShip, validate_new_ship, validate_patch};
