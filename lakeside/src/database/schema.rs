//! Database schema definitions and SQL constants.
//!
//! Rooms and bookings live in two tables. Bookings point at their room
//! through a cascading foreign key, so deleting a room never leaves orphan
//! bookings behind. Dates are stored as ISO `YYYY-MM-DD` text. Stays are
//! limited to four-digit years, where that text sorts and compares in
//! calendar order.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_type TEXT NOT NULL COLLATE NOCASE,
        price_cents INTEGER NOT NULL CHECK (price_cents >= 0)
    )";

/// SQL statement to create the bookings table.
///
/// The `UNIQUE` constraint on `confirmation_code` is what turns a code
/// collision into an error the coordinator can retry.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        guest_full_name TEXT NOT NULL,
        guest_email TEXT NOT NULL COLLATE NOCASE,
        adults INTEGER NOT NULL CHECK (adults >= 1),
        children INTEGER NOT NULL CHECK (children >= 0),
        confirmation_code TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL,
        CHECK (check_in < check_out)
    )";

/// Index backing the per-room booking scan done on every admission.
pub const CREATE_BOOKINGS_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_room ON bookings(room_id, check_in)";

/// Index for guest lookups by email.
pub const CREATE_BOOKINGS_EMAIL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_guest_email ON bookings(guest_email)";

/// Index for room type filters.
pub const CREATE_ROOMS_TYPE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_rooms_type ON rooms(room_type)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Columns selected for every booking query, in `row_to_booking` order.
pub const BOOKING_COLUMNS: &str = "id, room_id, check_in, check_out, guest_full_name, \
     guest_email, adults, children, confirmation_code, created_at";

/// SQL statement to insert a booking.
pub const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (room_id, check_in, check_out, guest_full_name, guest_email, adults, children,
     confirmation_code, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// Counts bookings of a room sharing a night with `[?2, ?3)`.
pub const COUNT_OVERLAPPING: &str = r"
    SELECT COUNT(*) FROM bookings
    WHERE room_id = ?1 AND check_in < ?3 AND check_out > ?2
";

/// Counts bookings of a room that share a night or touch `[?2, ?3)`.
pub const COUNT_TOUCHING: &str = r"
    SELECT COUNT(*) FROM bookings
    WHERE room_id = ?1 AND check_in <= ?3 AND check_out >= ?2
";
