//! Common test utilities for integration tests.

use std::sync::Arc;

use lakeside::database::DatabaseConfig;
use lakeside::{
    CoordinatorSettings, DateRange, GuestInfo, NewRoom, RandomCodeGenerator,
    ReservationCoordinator, Room, SqliteStore,
};
use tempfile::TempDir;

/// A coordinator over one shared `SqliteStore`.
#[allow(dead_code)]
pub type SqliteCoordinator =
    ReservationCoordinator<Arc<SqliteStore>, Arc<SqliteStore>, RandomCodeGenerator>;

/// Opens a store in a fresh temporary directory.
///
/// The directory lives as long as the returned `TempDir`.
#[allow(dead_code)]
pub fn create_test_store() -> (TempDir, Arc<SqliteStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    (dir, store)
}

/// Opens another store on the database inside `dir`.
#[allow(dead_code)]
pub fn open_store(dir: &TempDir) -> Arc<SqliteStore> {
    let config = DatabaseConfig::new(dir.path().join("lakeside.db"));
    Arc::new(SqliteStore::open(config).unwrap())
}

/// Builds a coordinator that uses `store` as both booking store and catalog.
#[allow(dead_code)]
pub fn coordinator(store: &Arc<SqliteStore>, settings: CoordinatorSettings) -> SqliteCoordinator {
    ReservationCoordinator::new(
        Arc::clone(store),
        Arc::clone(store),
        RandomCodeGenerator,
        settings,
    )
}

/// Adds a room priced at 100.00.
#[allow(dead_code)]
pub fn add_room(store: &SqliteStore, room_type: &str) -> Room {
    let price = "100.00".parse().unwrap();
    store
        .add_room(&NewRoom::new(room_type, price).unwrap())
        .unwrap()
}

/// A valid guest with two adults.
#[allow(dead_code)]
pub fn guest(email: &str) -> GuestInfo {
    GuestInfo::builder("Test Guest", email)
        .adults(2)
        .build()
        .unwrap()
}

/// Parses `YYYY-MM-DD..YYYY-MM-DD`.
#[allow(dead_code)]
pub fn range(s: &str) -> DateRange {
    s.parse().unwrap()
}
