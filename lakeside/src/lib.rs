#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # lakeside
//!
//! The admission core of a hotel reservation system.
//!
//! A stay is a half-open [`DateRange`]: the guest sleeps in the room every
//! night from check-in up to, but not including, check-out. The
//! [`ReservationCoordinator`] admits a stay only if no existing booking of the
//! same room shares a night with it, and it does so atomically per room, so
//! concurrent requests can never double-book. Successful bookings receive a
//! unique ten-digit [`ConfirmationCode`].
//!
//! ## Core Types
//!
//! - [`DateRange`] and [`TurnoverPolicy`]: stays and how they conflict
//! - [`Booking`], [`GuestInfo`] and [`ConfirmationCode`]: what gets stored
//! - [`Room`] and [`Price`]: what gets booked
//! - [`BookingStore`] and [`RoomCatalog`]: persistence contracts, implemented
//!   by [`SqliteStore`] and [`MemoryStore`]
//! - [`ReservationCoordinator`]: admission and cancellation
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use lakeside::{
//!     CoordinatorSettings, GuestInfo, NewRoom, RandomCodeGenerator, ReservationCoordinator,
//!     SqliteStore,
//! };
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//! let room = store.add_room(&NewRoom::new("Twin", "89.00".parse().unwrap()).unwrap()).unwrap();
//!
//! let coordinator = ReservationCoordinator::new(
//!     Arc::clone(&store),
//!     Arc::clone(&store),
//!     RandomCodeGenerator,
//!     CoordinatorSettings::default(),
//! );
//!
//! let guest = GuestInfo::builder("Grace Hopper", "grace@example.com").build().unwrap();
//! let code = coordinator
//!     .reserve(room.id(), "2024-05-01..2024-05-04".parse().unwrap(), guest)
//!     .unwrap();
//! let booking = coordinator.by_confirmation_code(&code).unwrap();
//! assert_eq!(booking.range().nights(), 3);
//! ```

pub mod booking;
pub mod config;
pub mod confirmation;
pub mod coordinator;
pub mod database;
pub mod date_range;
pub mod error;
pub mod logging;
pub mod room;
pub mod store;

// Re-export key types at crate root for convenience
pub use booking::{Booking, BookingId, ConfirmationCode, GuestInfo, NewBooking, RoomId};
pub use config::{Config, ConfigBuilder};
pub use confirmation::{ConfirmationCodeGenerator, RandomCodeGenerator};
pub use coordinator::{CoordinatorSettings, ReservationCoordinator};
pub use database::{Database, DatabaseConfig, SqliteStore};
pub use date_range::{DateRange, TurnoverPolicy};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use room::{NewRoom, Price, Room, RoomUpdate};
pub use store::{BookingStore, MemoryStore, RoomCatalog};
