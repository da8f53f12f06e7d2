//! Multi-threaded admission: no two bookings of a room may ever overlap.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{add_room, coordinator, create_test_store, guest, open_store, range};
use lakeside::{Booking, CoordinatorSettings, DateRange, Error};

fn assert_pairwise_disjoint(bookings: &[Booking]) {
    for (i, a) in bookings.iter().enumerate() {
        for b in &bookings[i + 1..] {
            if a.room_id() == b.room_id() {
                assert!(
                    !a.range().overlaps(&b.range()),
                    "room {} double-booked: {} and {}",
                    a.room_id(),
                    a.range(),
                    b.range()
                );
            }
        }
    }
}

#[test]
fn test_identical_requests_admit_exactly_one() {
    const THREADS: usize = 12;
    let (_dir, store) = create_test_store();
    let room = add_room(&store, "Double").id();
    let c = Arc::new(coordinator(&store, CoordinatorSettings::default()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let c = Arc::clone(&c);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                c.reserve(
                    room,
                    range("2024-08-01..2024-08-08"),
                    guest(&format!("guest{i}@example.com")),
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(err, Error::RoomUnavailable { .. } | Error::Timeout { .. }),
            "unexpected error: {err}"
        );
    }
    assert_eq!(c.bookings_for_room(room).unwrap().len(), 1);
}

#[test]
fn test_separate_stores_share_the_guard() {
    // Two stores on one file behave like two processes: their coordinators
    // hold different room locks, so only the store-level check serializes them.
    const PER_STORE: usize = 4;
    let (dir, first) = create_test_store();
    let second = open_store(&dir);
    let room = add_room(&first, "Double").id();

    let coordinators = [
        Arc::new(coordinator(&first, CoordinatorSettings::default())),
        Arc::new(coordinator(&second, CoordinatorSettings::default())),
    ];
    let barrier = Arc::new(Barrier::new(PER_STORE * 2));

    let handles: Vec<_> = coordinators
        .iter()
        .flat_map(|c| std::iter::repeat(c).take(PER_STORE))
        .enumerate()
        .map(|(i, c)| {
            let c = Arc::clone(c);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                c.reserve(
                    room,
                    range("2024-09-01..2024-09-03"),
                    guest(&format!("guest{i}@example.com")),
                )
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(Result::is_ok)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(coordinators[1].bookings_for_room(room).unwrap().len(), 1);
}

#[test]
fn test_mixed_reserve_and_cancel_never_overlap() {
    const THREADS: u32 = 8;
    const ROUNDS: u32 = 15;
    let (_dir, store) = create_test_store();
    let rooms: Vec<_> = (0..3).map(|_| add_room(&store, "Single").id()).collect();
    let c = Arc::new(coordinator(&store, CoordinatorSettings::default()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let c = Arc::clone(&c);
            let rooms = rooms.clone();
            thread::spawn(move || {
                let base: DateRange = range("2024-10-01..2024-10-02");
                for round in 0..ROUNDS {
                    let room = rooms[((t + round) as usize) % rooms.len()];
                    let start = base.check_in() + chrono::Days::new(u64::from((t * 3 + round) % 20));
                    let stay = DateRange::new(start, start + chrono::Days::new(3)).unwrap();
                    match c.reserve_booking(room, stay, guest(&format!("t{t}@example.com"))) {
                        Ok(booking) if round % 3 == 0 => {
                            c.cancel(booking.id()).unwrap();
                        }
                        Ok(_) | Err(Error::RoomUnavailable { .. } | Error::Timeout { .. }) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let all = c.all_bookings().unwrap();
    assert!(!all.is_empty());
    assert_pairwise_disjoint(&all);
}

#[test]
fn test_different_rooms_share_one_connection() {
    const ROOMS: usize = 8;
    let (_dir, store) = create_test_store();
    let rooms: Vec<_> = (0..ROOMS).map(|_| add_room(&store, "Single").id()).collect();
    let c = Arc::new(coordinator(&store, CoordinatorSettings::default()));
    let barrier = Arc::new(Barrier::new(ROOMS));

    let handles: Vec<_> = rooms
        .iter()
        .map(|&room| {
            let c = Arc::clone(&c);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                c.reserve(room, range("2024-09-01..2024-09-04"), guest("a@example.com"))
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    for room in rooms {
        assert_eq!(c.bookings_for_room(room).unwrap().len(), 1);
    }
}
