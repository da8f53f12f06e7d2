//! Database CRUD operations for rooms and bookings.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use crate::booking::{Booking, BookingId, ConfirmationCode, GuestInfo, NewBooking, RoomId};
use crate::date_range::{parse_date, DateRange, TurnoverPolicy};
use crate::error::{Error, Result};
use crate::room::{NewRoom, Price, Room, RoomUpdate};

use super::config::DatabaseConfig;
use super::connection::Database;
use super::schema::{BOOKING_COLUMNS, COUNT_OVERLAPPING, COUNT_TOUCHING, INSERT_BOOKING};

const SELECT_ROOM: &str = "SELECT id, room_type, price_cents FROM rooms WHERE id = ?";

const LIST_ROOMS: &str = "SELECT id, room_type, price_cents FROM rooms ORDER BY id";

const LIST_ROOMS_BY_TYPE: &str =
    "SELECT id, room_type, price_cents FROM rooms WHERE room_type = ? ORDER BY id";

const LIST_ROOM_TYPES: &str = "SELECT DISTINCT room_type FROM rooms ORDER BY room_type";

const ROOM_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM rooms WHERE id = ?)";

fn conversion_error<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(err))
}

#[derive(Debug)]
struct BadColumn(String);

impl std::fmt::Display for BadColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for BadColumn {}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: i64 = row.get(0)?;
    let room_type: String = row.get(1)?;
    let price_cents: i64 = row.get(2)?;

    let price = Price::from_cents(price_cents).map_err(conversion_error)?;
    Ok(Room::new(RoomId::new(id), room_type, price))
}

/// Expects the columns listed in `BOOKING_COLUMNS`, in order.
fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let check_in: String = row.get(2)?;
    let check_out: String = row.get(3)?;
    let full_name: String = row.get(4)?;
    let email: String = row.get(5)?;
    let adults: u32 = row.get(6)?;
    let children: u32 = row.get(7)?;
    let code: String = row.get(8)?;
    let created_secs: i64 = row.get(9)?;

    let check_in = parse_date(&check_in).map_err(|e| conversion_error(BadColumn(e)))?;
    let check_out = parse_date(&check_out).map_err(|e| conversion_error(BadColumn(e)))?;
    let range = DateRange::new(check_in, check_out).map_err(conversion_error)?;

    let guest = GuestInfo::builder(full_name, email)
        .adults(adults)
        .children(children)
        .build()
        .map_err(conversion_error)?;

    let confirmation_code = ConfirmationCode::parse(&code).map_err(conversion_error)?;

    let booked_at = DateTime::<Utc>::from_timestamp(created_secs, 0).ok_or_else(|| {
        conversion_error(BadColumn(format!("invalid timestamp {created_secs}")))
    })?;

    Ok(NewBooking {
        room_id: RoomId::new(room_id),
        range,
        guest,
        confirmation_code,
    }
    .into_booking(BookingId::new(id), booked_at))
}

fn query_bookings<P: rusqlite::Params>(
    conn: &Connection,
    filter: &str,
    params: P,
) -> Result<Vec<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings {filter}");
    let mut stmt = conn.prepare(&sql)?;
    let bookings = stmt
        .query_map(params, row_to_booking)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
    Ok(bookings)
}

fn room_exists(conn: &Connection, id: RoomId) -> Result<bool> {
    Ok(conn.query_row(ROOM_EXISTS, [id.value()], |row| row.get(0))?)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Translates lock contention into [`Error::Timeout`].
///
/// Every other database error is passed through unchanged.
fn classify(config: &DatabaseConfig, err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            Error::Timeout {
                what: format!("database lock on {}", config.path.display()),
                waited_ms: u64::try_from(config.busy_timeout.as_millis()).unwrap_or(u64::MAX),
            }
        }
        other => Error::Database(other),
    }
}

/// Starts a write transaction, taking the database write lock up front.
fn begin_immediate<'c>(
    conn: &'c mut Connection,
    config: &DatabaseConfig,
) -> Result<Transaction<'c>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| classify(config, e))
}

impl Database {
    /// Adds a room to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::database::Database;
    /// use lakeside::{NewRoom, Price};
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let room = db.add_room(&NewRoom::new("Double", "120".parse::<Price>().unwrap()).unwrap()).unwrap();
    /// assert_eq!(room.room_type(), "Double");
    /// ```
    pub fn add_room(&mut self, room: &NewRoom) -> Result<Room> {
        let inserted = self.conn.execute(
            "INSERT INTO rooms (room_type, price_cents) VALUES (?, ?)",
            params![room.room_type(), room.price().cents()],
        );
        inserted.map_err(|e| classify(&self.config, e))?;

        let id = RoomId::new(self.conn.last_insert_rowid());
        Ok(Room::new(id, room.room_type(), room.price()))
    }

    /// Applies `update` to a room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn update_room(&mut self, id: RoomId, update: &RoomUpdate) -> Result<Room> {
        let tx = begin_immediate(&mut self.conn, &self.config)?;

        let current = tx
            .query_row(SELECT_ROOM, [id.value()], row_to_room)
            .optional()?
            .ok_or_else(|| Error::not_found(format!("room {id}")))?;

        let updated = update.apply(&current);
        tx.execute(
            "UPDATE rooms SET room_type = ?, price_cents = ? WHERE id = ?",
            params![updated.room_type(), updated.price().cents(), id.value()],
        )?;
        tx.commit()?;

        Ok(updated)
    }

    /// Deletes a room and, through the foreign key, all of its bookings.
    ///
    /// Returns the number of bookings removed with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn delete_room(&mut self, id: RoomId) -> Result<usize> {
        let tx = begin_immediate(&mut self.conn, &self.config)?;

        let bookings: i64 =
            tx.query_row("SELECT COUNT(*) FROM bookings WHERE room_id = ?", [id.value()], |row| {
                row.get(0)
            })?;

        if tx.execute("DELETE FROM rooms WHERE id = ?", [id.value()])? == 0 {
            return Err(Error::not_found(format!("room {id}")));
        }
        tx.commit()?;

        log::debug!("deleted room {id} with {bookings} booking(s)");
        Ok(usize::try_from(bookings).unwrap_or_default())
    }

    /// Retrieves a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self
            .conn
            .query_row(SELECT_ROOM, [id.value()], row_to_room)
            .optional()?)
    }

    /// Lists every room, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(LIST_ROOMS)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Lists the rooms of one type, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms_by_type(&self, room_type: &str) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(LIST_ROOMS_BY_TYPE)?;
        let rooms = stmt
            .query_map([room_type.trim()], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Lists the distinct room types in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_types(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(LIST_ROOM_TYPES)?;
        let types = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(types)
    }

    /// Inserts a booking if it does not conflict with the room's calendar.
    ///
    /// The conflict check and the insert share an IMMEDIATE transaction, so
    /// two connections cannot both pass the check for the same nights.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the room does not exist
    /// - [`Error::RoomUnavailable`] if a conflicting booking exists
    /// - [`Error::ConfirmationCodeTaken`] if the code is already used
    /// - [`Error::Timeout`] if another connection holds the write lock too long
    pub fn insert_booking(
        &mut self,
        booking: &NewBooking,
        turnover: TurnoverPolicy,
    ) -> Result<Booking> {
        let tx = begin_immediate(&mut self.conn, &self.config)?;

        if !room_exists(&tx, booking.room_id)? {
            return Err(Error::not_found(format!("room {}", booking.room_id)));
        }

        let check_in = booking.range.check_in().to_string();
        let check_out = booking.range.check_out().to_string();
        let conflict_query = match turnover {
            TurnoverPolicy::SameDay => COUNT_OVERLAPPING,
            TurnoverPolicy::Strict => COUNT_TOUCHING,
        };
        let conflicts: i64 = tx.query_row(
            conflict_query,
            params![booking.room_id.value(), check_in, check_out],
            |row| row.get(0),
        )?;
        if conflicts > 0 {
            return Err(Error::RoomUnavailable {
                room: booking.room_id,
                range: booking.range,
            });
        }

        let now = Utc::now();
        let inserted = tx.execute(
            INSERT_BOOKING,
            params![
                booking.room_id.value(),
                check_in,
                check_out,
                booking.guest.full_name(),
                booking.guest.email(),
                booking.guest.adults(),
                booking.guest.children(),
                booking.confirmation_code.as_str(),
                now.timestamp(),
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(ref e) if is_unique_violation(e) => {
                return Err(Error::ConfirmationCodeTaken {
                    code: booking.confirmation_code.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        let id = BookingId::new(tx.last_insert_rowid());
        tx.commit()?;

        // Stored with second precision; hand back what a reload would return
        let booked_at = DateTime::<Utc>::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        Ok(booking.clone().into_booking(id, booked_at))
    }

    /// Deletes a booking.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the booking was found and deleted
    /// - `Ok(false)` if the booking was not found
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_booking(&mut self, id: BookingId) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM bookings WHERE id = ?", [id.value()]);
        Ok(deleted.map_err(|e| classify(&self.config, e))? > 0)
    }

    /// Retrieves a booking by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(query_bookings(&self.conn, "WHERE id = ?", [id.value()])?
            .into_iter()
            .next())
    }

    /// Retrieves a booking by confirmation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking_by_code(&self, code: &ConfirmationCode) -> Result<Option<Booking>> {
        Ok(
            query_bookings(&self.conn, "WHERE confirmation_code = ?", [code.as_str()])?
                .into_iter()
                .next(),
        )
    }

    /// Lists the bookings of a room, ordered by check-in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn bookings_for_room(&self, room_id: RoomId) -> Result<Vec<Booking>> {
        if !room_exists(&self.conn, room_id)? {
            return Err(Error::not_found(format!("room {room_id}")));
        }
        query_bookings(
            &self.conn,
            "WHERE room_id = ? ORDER BY check_in",
            [room_id.value()],
        )
    }

    /// Lists the bookings made under an email address, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn bookings_for_email(&self, email: &str) -> Result<Vec<Booking>> {
        query_bookings(
            &self.conn,
            "WHERE guest_email = ? ORDER BY check_in, id",
            [email.trim()],
        )
    }

    /// Lists every booking, ordered by check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_bookings(&self) -> Result<Vec<Booking>> {
        query_bookings(&self.conn, "ORDER BY check_in, id", [])
    }

    /// Verifies database integrity using PRAGMA `integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("integrity check failed: {result}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, new_booking, new_room};

    #[test]
    fn test_add_and_get_room() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Double", 12000)).unwrap();

        let loaded = db.get_room(room.id()).unwrap().unwrap();
        assert_eq!(loaded, room);
        assert_eq!(loaded.price().to_string(), "120.00");
    }

    #[test]
    fn test_get_room_not_found() {
        let db = create_test_database();
        assert!(db.get_room(RoomId::new(1)).unwrap().is_none());
    }

    #[test]
    fn test_update_room() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Double", 12000)).unwrap();

        let update = RoomUpdate::default().room_type("Twin").unwrap();
        let updated = db.update_room(room.id(), &update).unwrap();
        assert_eq!(updated.room_type(), "Twin");
        assert_eq!(updated.price(), room.price());
        assert_eq!(db.get_room(room.id()).unwrap().unwrap(), updated);

        let err = db.update_room(RoomId::new(99), &update).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_room_type_queries() {
        let mut db = create_test_database();
        db.add_room(&new_room("Suite", 30000)).unwrap();
        db.add_room(&new_room("Double", 12000)).unwrap();
        db.add_room(&new_room("Double", 13000)).unwrap();

        assert_eq!(db.list_rooms().unwrap().len(), 3);
        assert_eq!(db.list_rooms_by_type("double").unwrap().len(), 2);
        assert_eq!(db.list_rooms_by_type("Dou").unwrap().len(), 0);
        assert_eq!(db.list_room_types().unwrap(), vec!["Double", "Suite"]);
    }

    #[test]
    fn test_insert_and_lookup_booking() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Single", 8000)).unwrap();

        let saved = db
            .insert_booking(
                &new_booking(room.id(), "2024-01-10..2024-01-13", "1234567890", "Guest@Example.com"),
                TurnoverPolicy::SameDay,
            )
            .unwrap();

        assert_eq!(db.get_booking(saved.id()).unwrap().unwrap(), saved);
        assert_eq!(
            db.get_booking_by_code(saved.confirmation_code())
                .unwrap()
                .unwrap(),
            saved
        );
        assert_eq!(db.bookings_for_email("guest@example.com").unwrap().len(), 1);
        assert_eq!(db.bookings_for_room(room.id()).unwrap(), vec![saved]);
    }

    #[test]
    fn test_insert_booking_unknown_room() {
        let mut db = create_test_database();
        let err = db
            .insert_booking(
                &new_booking(RoomId::new(5), "2024-01-10..2024-01-13", "1234567890", "a@b.c"),
                TurnoverPolicy::SameDay,
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insert_booking_at_calendar_edges() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Single", 8000)).unwrap();

        for (range, code) in [
            ("0001-01-01..0001-01-03", "0000000001"),
            ("9999-12-20..9999-12-31", "0000000002"),
            ("0999-12-30..1000-01-02", "0000000003"),
        ] {
            db.insert_booking(&new_booking(room.id(), range, code, "a@b.c"), TurnoverPolicy::SameDay)
                .unwrap();
        }

        let err = db
            .insert_booking(
                &new_booking(room.id(), "9999-12-30..9999-12-31", "0000000004", "a@b.c"),
                TurnoverPolicy::SameDay,
            )
            .unwrap_err();
        assert!(matches!(err, Error::RoomUnavailable { .. }));

        let checked_in: Vec<String> = db
            .bookings_for_room(room.id())
            .unwrap()
            .iter()
            .map(|b| b.range().check_in().to_string())
            .collect();
        assert_eq!(checked_in, vec!["0001-01-01", "0999-12-30", "9999-12-20"]);
    }

    #[test]
    fn test_insert_booking_rechecks_overlap() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Single", 8000)).unwrap();
        db.insert_booking(
            &new_booking(room.id(), "2024-01-10..2024-01-15", "0000000001", "a@b.c"),
            TurnoverPolicy::SameDay,
        )
        .unwrap();

        let err = db
            .insert_booking(
                &new_booking(room.id(), "2024-01-12..2024-01-14", "0000000002", "a@b.c"),
                TurnoverPolicy::SameDay,
            )
            .unwrap_err();
        assert!(matches!(err, Error::RoomUnavailable { .. }));

        // Back-to-back is fine under same-day turnover, not under strict
        let touching = new_booking(room.id(), "2024-01-15..2024-01-17", "0000000003", "a@b.c");
        let err = db
            .insert_booking(&touching, TurnoverPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, Error::RoomUnavailable { .. }));
        db.insert_booking(&touching, TurnoverPolicy::SameDay).unwrap();
    }

    #[test]
    fn test_insert_booking_duplicate_code() {
        let mut db = create_test_database();
        let a = db.add_room(&new_room("Single", 8000)).unwrap();
        let b = db.add_room(&new_room("Single", 8000)).unwrap();
        db.insert_booking(
            &new_booking(a.id(), "2024-01-10..2024-01-15", "0000000001", "a@b.c"),
            TurnoverPolicy::SameDay,
        )
        .unwrap();

        let err = db
            .insert_booking(
                &new_booking(b.id(), "2024-01-10..2024-01-15", "0000000001", "a@b.c"),
                TurnoverPolicy::SameDay,
            )
            .unwrap_err();
        assert!(matches!(err, Error::ConfirmationCodeTaken { .. }));
        assert!(db.bookings_for_room(b.id()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_booking() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Single", 8000)).unwrap();
        let saved = db
            .insert_booking(
                &new_booking(room.id(), "2024-02-01..2024-02-05", "0000000001", "a@b.c"),
                TurnoverPolicy::SameDay,
            )
            .unwrap();

        assert!(db.delete_booking(saved.id()).unwrap());
        assert!(!db.delete_booking(saved.id()).unwrap());
        assert!(db.get_booking(saved.id()).unwrap().is_none());
    }

    #[test]
    fn test_delete_room_cascades() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Single", 8000)).unwrap();
        for (range, code) in [
            ("2024-02-01..2024-02-05", "0000000001"),
            ("2024-03-01..2024-03-05", "0000000002"),
        ] {
            db.insert_booking(&new_booking(room.id(), range, code, "a@b.c"), TurnoverPolicy::SameDay)
                .unwrap();
        }

        assert_eq!(db.delete_room(room.id()).unwrap(), 2);
        assert!(db.list_all_bookings().unwrap().is_empty());
        assert!(db.bookings_for_room(room.id()).unwrap_err().is_not_found());
        assert!(db.delete_room(room.id()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_all_bookings_ordered() {
        let mut db = create_test_database();
        let room = db.add_room(&new_room("Single", 8000)).unwrap();
        for (range, code) in [
            ("2024-03-01..2024-03-05", "0000000001"),
            ("2024-02-01..2024-02-05", "0000000002"),
        ] {
            db.insert_booking(&new_booking(room.id(), range, code, "a@b.c"), TurnoverPolicy::SameDay)
                .unwrap();
        }

        let all = db.list_all_bookings().unwrap();
        assert_eq!(all[0].confirmation_code().as_str(), "0000000002");
        assert_eq!(all[1].confirmation_code().as_str(), "0000000001");
    }

    #[test]
    fn test_verify_integrity() {
        let db = create_test_database();
        db.verify_integrity().unwrap();
    }
}
