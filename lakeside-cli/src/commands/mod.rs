//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory, database and default configuration
//! - `add_room`, `update_room`, `delete_room`: Maintain the room catalog
//! - `rooms`, `room_types`: Browse the catalog
//! - `reserve`: Book a room for a stay
//! - `cancel`: Cancel a booking by id or confirmation code
//! - `lookup`: Show the booking behind a confirmation code
//! - `bookings`: List bookings, optionally per room or guest
//! - `available`: List rooms free for a stay
//! - `completions`: Generate shell completion scripts

pub mod add_room;
pub mod available;
pub mod bookings;
pub mod cancel;
pub mod completions;
pub mod delete_room;
pub mod init;
pub mod lookup;
pub mod reserve;
pub mod room_types;
pub mod rooms;
pub mod update_room;

pub use add_room::AddRoomCommand;
pub use available::AvailableCommand;
pub use bookings::BookingsCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use delete_room::DeleteRoomCommand;
pub use init::InitCommand;
pub use lookup::LookupCommand;
pub use reserve::ReserveCommand;
pub use room_types::RoomTypesCommand;
pub use rooms::RoomsCommand;
pub use update_room::UpdateRoomCommand;
