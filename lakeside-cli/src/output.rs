//! Rendering of rooms, bookings and room types.
//!
//! Every listing command supports the same four formats: an aligned
//! human-readable table, pretty JSON, CSV and TSV.

use crate::error::CliError;
use crate::utils::format_timestamp;
use lakeside::config::OutputFormat;
use lakeside::{Booking, Config, Room};
use std::io::Write;

/// Column headers for room listings.
const ROOM_HEADERS: [&str; 3] = ["id", "type", "price"];

/// Column headers for booking listings.
const BOOKING_HEADERS: [&str; 10] = [
    "id",
    "room",
    "check_in",
    "check_out",
    "nights",
    "name",
    "email",
    "guests",
    "code",
    "booked_at",
];

/// The format requested on the command line, else the configured one.
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or(config.output_format).unwrap_or_default()
}

fn room_row(room: &Room) -> Vec<String> {
    vec![
        room.id().to_string(),
        room.room_type().to_string(),
        room.price().to_string(),
    ]
}

fn booking_row(booking: &Booking) -> Vec<String> {
    let range = booking.range();
    let guest = booking.guest();
    vec![
        booking.id().to_string(),
        booking.room_id().to_string(),
        range.check_in().to_string(),
        range.check_out().to_string(),
        range.nights().to_string(),
        guest.full_name().to_string(),
        guest.email().to_string(),
        guest.total_guests().to_string(),
        booking.confirmation_code().to_string(),
        format_timestamp(booking.booked_at()),
    ]
}

/// Write rooms to `out` in `format`.
pub fn write_rooms(out: &mut impl Write, rooms: &[Room], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = rooms
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id().value(),
                        "type": r.room_type(),
                        "price": r.price().to_string(),
                        "price_cents": r.price().cents(),
                    })
                })
                .collect();
            write_json(out, &json)
        }
        _ => write_rows(out, &ROOM_HEADERS, rooms.iter().map(room_row), format),
    }
}

/// Write bookings to `out` in `format`.
pub fn write_bookings(
    out: &mut impl Write,
    bookings: &[Booking],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = bookings.iter().map(booking_json).collect();
            write_json(out, &json)
        }
        _ => write_rows(
            out,
            &BOOKING_HEADERS,
            bookings.iter().map(booking_row),
            format,
        ),
    }
}

/// Write a single booking as `key: value` lines, or as a JSON object.
pub fn write_booking_detail(
    out: &mut impl Write,
    booking: &Booking,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            for (header, value) in BOOKING_HEADERS.iter().zip(booking_row(booking)) {
                writeln!(out, "{header:<10} {value}")?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, &booking_json(booking)),
        _ => write_rows(out, &BOOKING_HEADERS, [booking_row(booking)], format),
    }
}

/// Write room types, one per line (or a JSON array).
pub fn write_room_types(
    out: &mut impl Write,
    types: &[String],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, &types),
        OutputFormat::Table => {
            for t in types {
                writeln!(out, "{t}")?;
            }
            Ok(())
        }
        _ => write_rows(out, &["type"], types.iter().map(|t| vec![t.clone()]), format),
    }
}

fn booking_json(b: &Booking) -> serde_json::Value {
    let guest = b.guest();
    serde_json::json!({
        "id": b.id().value(),
        "room": b.room_id().value(),
        "check_in": b.range().check_in().to_string(),
        "check_out": b.range().check_out().to_string(),
        "nights": b.range().nights(),
        "name": guest.full_name(),
        "email": guest.email(),
        "adults": guest.adults(),
        "children": guest.children(),
        "code": b.confirmation_code().as_str(),
        "booked_at": format_timestamp(b.booked_at()),
    })
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(out)?;
    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn write_rows(
    out: &mut impl Write,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let delimiter = match format {
        OutputFormat::Csv => b',',
        OutputFormat::Tsv => b'\t',
        OutputFormat::Table | OutputFormat::Json => return write_table(out, headers, rows),
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(&mut *out);
    writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Aligned columns with upper-case headers.
fn write_table(
    out: &mut impl Write,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<(), CliError> {
    let rows: Vec<Vec<String>> = rows.into_iter().collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_uppercase()).collect();
    write_table_line(out, &header_cells, &widths)?;
    for row in &rows {
        write_table_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_table_line(out: &mut impl Write, cells: &[String], widths: &[usize]) -> Result<(), CliError> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}
