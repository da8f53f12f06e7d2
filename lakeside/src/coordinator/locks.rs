//! Per-room mutual exclusion with bounded waits.
//!
//! Each room gets its own lock slot, created on first use and dropped again
//! once nobody holds or waits for it. Rooms never share a slot, so admission
//! for one room never waits on another.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::booking::RoomId;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct Slot {
    held: Mutex<bool>,
    released: Condvar,
}

/// Registry of room locks.
#[derive(Debug, Default)]
pub(crate) struct RoomLocks {
    slots: Mutex<HashMap<RoomId, Arc<Slot>>>,
}

fn relock<T>(result: std::sync::LockResult<T>) -> T {
    result.unwrap_or_else(PoisonError::into_inner)
}

impl RoomLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<RoomId, Arc<Slot>>> {
        relock(self.slots.lock())
    }

    /// Blocks until the room is free or `timeout` elapses.
    ///
    /// The lock is released when the returned guard is dropped.
    pub(crate) fn acquire(&self, room: RoomId, timeout: Duration) -> Result<RoomGuard<'_>> {
        let slot = Arc::clone(self.slots().entry(room).or_default());
        let started = Instant::now();

        let held = relock(slot.held.lock());
        let (mut held, wait) = relock(slot.released.wait_timeout_while(held, timeout, |h| *h));

        if wait.timed_out() && *held {
            drop(held);
            self.forget_if_unused(room, slot);
            return Err(Error::Timeout {
                what: format!("lock on room {room}"),
                waited_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            });
        }

        *held = true;
        drop(held);
        Ok(RoomGuard {
            locks: self,
            room,
            slot: Some(slot),
        })
    }

    // Removes the registry entry when `slot` is the last reference besides
    // the map's own. New references are only made under the registry lock,
    // so the count cannot grow while we look at it.
    fn forget_if_unused(&self, room: RoomId, slot: Arc<Slot>) {
        let mut slots = self.slots();
        if Arc::strong_count(&slot) == 2 {
            slots.remove(&room);
        }
    }

    /// Number of rooms with a live lock slot.
    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        self.slots().len()
    }
}

/// Exclusive access to one room until dropped.
#[derive(Debug)]
pub(crate) struct RoomGuard<'a> {
    locks: &'a RoomLocks,
    room: RoomId,
    slot: Option<Arc<Slot>>,
}

impl Drop for RoomGuard<'_> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            *relock(slot.held.lock()) = false;
            slot.released.notify_one();
            self.locks.forget_if_unused(self.room, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const LONG: Duration = Duration::from_secs(5);

    #[test]
    fn test_acquire_and_release() {
        let locks = RoomLocks::new();
        {
            let _guard = locks.acquire(RoomId::new(1), LONG).unwrap();
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);

        // Reacquire after release
        let _guard = locks.acquire(RoomId::new(1), LONG).unwrap();
    }

    #[test]
    fn test_timeout_when_held() {
        let locks = RoomLocks::new();
        let _held = locks.acquire(RoomId::new(1), LONG).unwrap();

        let err = locks
            .acquire(RoomId::new(1), Duration::from_millis(20))
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert!(err.to_string().contains("room 1"));
        assert_eq!(locks.active(), 1);
    }

    #[test]
    fn test_rooms_are_independent() {
        let locks = RoomLocks::new();
        let _a = locks.acquire(RoomId::new(1), LONG).unwrap();
        let _b = locks
            .acquire(RoomId::new(2), Duration::from_millis(20))
            .unwrap();
        assert_eq!(locks.active(), 2);
    }

    #[test]
    fn test_mutual_exclusion() {
        let locks = Arc::new(RoomLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _guard = locks.acquire(RoomId::new(7), LONG).unwrap();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }

    #[test]
    fn test_waiter_gets_lock_after_release() {
        let locks = Arc::new(RoomLocks::new());
        let guard = locks.acquire(RoomId::new(3), LONG).unwrap();

        let waiter = {
            let locks = Arc::clone(&locks);
            thread::spawn(move || locks.acquire(RoomId::new(3), LONG).map(|_| ()))
        };
        thread::sleep(Duration::from_millis(20));
        drop(guard);

        waiter.join().unwrap().unwrap();
    }
}
