//! `SQLite` persistence for rooms and bookings.
//!
//! [`Database`] owns a connection and exposes typed CRUD operations;
//! [`SqliteStore`] shares one between threads and implements the
//! [`crate::BookingStore`] and [`crate::RoomCatalog`] contracts on top.
//!
//! # Examples
//!
//! ```no_run
//! use lakeside::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/lakeside.db")).unwrap();
//! for room in db.list_rooms().unwrap() {
//!     println!("{} {} {}", room.id(), room.room_type(), room.price());
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod store;

#[cfg(test)]
mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use store::SqliteStore;
