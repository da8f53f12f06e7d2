//! Build script for lakeside-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("lakeside")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage hotel rooms and reservations")
        .long_about(
            "Command-line tool for managing a hotel's rooms and admitting reservations \
             without double-booking",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("LAKESIDE_DATA_DIR"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Additional configuration file")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true),
        )
        .arg(
            Arg::new("lock-timeout-ms")
                .long("lock-timeout-ms")
                .help("Override how long to wait for a room lock (in milliseconds)")
                .value_name("MS")
                .global(true),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("LAKESIDE_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the database and, optionally, a default config.yaml"),
            Command::new("add-room")
                .about("Add a room to the catalog")
                .long_about("Add a room with a type and a nightly rate; prints the new id"),
            Command::new("update-room")
                .about("Change a room's type or price"),
            Command::new("delete-room")
                .about("Remove a room and its bookings")
                .long_about("Refuses rooms with upcoming stays unless --force is given"),
            Command::new("rooms")
                .about("List rooms")
                .long_about("List the catalog, optionally filtered by room type"),
            Command::new("room-types").about("List the distinct room types"),
            Command::new("reserve")
                .about("Book a room for a stay")
                .long_about(
                    "Book one room from check-in up to (not including) check-out; \
                     prints the ten-digit confirmation code",
                ),
            Command::new("cancel")
                .about("Cancel a booking")
                .long_about("Cancel a booking by id or by confirmation code"),
            Command::new("lookup").about("Show the booking behind a confirmation code"),
            Command::new("bookings")
                .about("List bookings")
                .long_about("List all bookings, or those of one room or one guest email"),
            Command::new("available")
                .about("List rooms free for a stay")
                .long_about("List rooms, optionally of one type, free for every night of a stay"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("lakeside.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
