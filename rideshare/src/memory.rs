//! In-memory entity store.
//!
//! Implements all three store traits over one table set so it can stand in for
//! postgres in tests. Foreign keys are enforced the way the schema enforces them,
//! any operation can be made to fail on demand, and every call is counted.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use abi::{BookingDetails, Ride, StoreError, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{BookingStore, RideStore, UserStore};

/// store operations that can be counted or made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    CreateUser,
    GetUser,
    DeleteUser,
    CreateRide,
    GetRide,
    UpdateRide,
    CreateBooking,
    GetBooking,
}

#[derive(Debug, Clone)]
struct BookingRecord {
    user_id: i32,
    ride_id: i32,
    booked_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Tables {
    users: BTreeMap<i32, String>,
    rides: BTreeMap<i32, Ride>,
    bookings: BTreeMap<i32, BookingRecord>,
    next_user_id: i32,
    next_ride_id: i32,
    next_booking_id: i32,
    failures: HashSet<Op>,
    calls: HashMap<Op, usize>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_next_ids(1, 1, 1)
    }

    /// start id sequences at the given values instead of 1
    pub fn with_next_ids(user_id: i32, ride_id: i32, booking_id: i32) -> Self {
        Self {
            tables: Mutex::new(Tables {
                users: BTreeMap::new(),
                rides: BTreeMap::new(),
                bookings: BTreeMap::new(),
                next_user_id: user_id,
                next_ride_id: ride_id,
                next_booking_id: booking_id,
                failures: HashSet::new(),
                calls: HashMap::new(),
            }),
        }
    }

    /// make every later call of `op` fail with `OperationFailed`
    pub fn fail_on(&self, op: Op) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.failures.insert(op);
        }
    }

    pub fn calls(&self, op: Op) -> usize {
        self.tables
            .lock()
            .map(|tables| tables.calls.get(&op).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn ride_count(&self) -> usize {
        self.tables.lock().map(|t| t.rides.len()).unwrap_or(0)
    }

    pub fn booking_count(&self) -> usize {
        self.tables.lock().map(|t| t.bookings.len()).unwrap_or(0)
    }

    /// lock the tables, count the call, and apply any injected failure
    fn enter(&self, op: Op) -> Result<MutexGuard<'_, Tables>, StoreError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| operation_failed("memory store lock poisoned".to_string()))?;

        *tables.calls.entry(op).or_insert(0) += 1;
        if tables.failures.contains(&op) {
            return Err(operation_failed(format!("injected failure on {:?}", op)));
        }

        Ok(tables)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn operation_failed(message: String) -> StoreError {
    StoreError::OperationFailed(sqlx::Error::Protocol(message))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, name: &str) -> Result<i32, StoreError> {
        let mut tables = self.enter(Op::CreateUser)?;
        let id = tables.next_user_id;
        tables.next_user_id += 1;
        tables.users.insert(id, name.to_string());
        Ok(id)
    }

    async fn get(&self, id: i32) -> Result<User, StoreError> {
        let tables = self.enter(Op::GetUser)?;
        let name = tables.users.get(&id).cloned().ok_or(StoreError::NotFound)?;
        Ok(User { id, name })
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.enter(Op::DeleteUser)?;
        if !tables.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.bookings.values().any(|b| b.user_id == id) {
            return Err(operation_failed(format!(
                "user {} is still referenced by bookings",
                id
            )));
        }
        tables.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl RideStore for MemoryStore {
    async fn create(&self, ride: &Ride) -> Result<i32, StoreError> {
        let mut tables = self.enter(Op::CreateRide)?;
        let id = tables.next_ride_id;
        tables.next_ride_id += 1;
        tables.rides.insert(id, ride.clone());
        Ok(id)
    }

    async fn get(&self, id: i32) -> Result<Ride, StoreError> {
        let tables = self.enter(Op::GetRide)?;
        tables.rides.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: i32, ride: &Ride) -> Result<(), StoreError> {
        let mut tables = self.enter(Op::UpdateRide)?;
        let stored = tables.rides.get_mut(&id).ok_or(StoreError::NotFound)?;
        *stored = ride.clone();
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create(
        &self,
        user_id: i32,
        ride_id: i32,
        booked_at: DateTime<Utc>,
    ) -> Result<i32, StoreError> {
        let mut tables = self.enter(Op::CreateBooking)?;
        if !tables.users.contains_key(&user_id) {
            return Err(operation_failed(format!("user {} does not exist", user_id)));
        }
        if !tables.rides.contains_key(&ride_id) {
            return Err(operation_failed(format!("ride {} does not exist", ride_id)));
        }

        let id = tables.next_booking_id;
        tables.next_booking_id += 1;
        tables.bookings.insert(
            id,
            BookingRecord {
                user_id,
                ride_id,
                booked_at,
            },
        );
        Ok(id)
    }

    async fn get_details(&self, id: i32) -> Result<BookingDetails, StoreError> {
        let tables = self.enter(Op::GetBooking)?;
        let booking = tables.bookings.get(&id).ok_or(StoreError::NotFound)?;
        // inner join semantics: a dangling reference means no row
        let name = tables
            .users
            .get(&booking.user_id)
            .ok_or(StoreError::NotFound)?;
        let ride = tables
            .rides
            .get(&booking.ride_id)
            .ok_or(StoreError::NotFound)?;

        Ok(BookingDetails {
            booking_id: id,
            user_id: booking.user_id,
            ride_id: booking.ride_id,
            booked_at: booking.booked_at,
            name: name.clone(),
            ride: ride.clone(),
        })
    }
}
