use chrono::{DateTime, Utc};

use crate::{convert_to_timestamp, BookingInfo, Error, ReservationId, ResourceId, UserId};

/// A committed claim on a resource for the half-open interval `[start_at, end_at)`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub resource_id: ResourceId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

/// Input of the capacity-checked creation transaction.
///
/// The store trusts these values; [`NewReservation::validate`] is run at the
/// transport boundary before the store is ever reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: UserId,
    pub resource_id: ResourceId,
    pub capacity: i32,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl NewReservation {
    pub fn new(
        user_id: UserId,
        resource_id: ResourceId,
        capacity: i32,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            resource_id,
            capacity,
            start_at,
            end_at,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.user_id <= 0 {
            return Err(Error::InvalidArgument("user_id must be positive".into()));
        }
        if self.resource_id <= 0 {
            return Err(Error::InvalidArgument("resource_id must be positive".into()));
        }
        if self.capacity <= 0 {
            return Err(Error::InvalidArgument(
                "resource_capacity must be positive".into(),
            ));
        }
        if self.end_at <= self.start_at {
            return Err(Error::InvalidArgument(
                "end_at must be after start_at".into(),
            ));
        }
        Ok(())
    }
}

impl From<Reservation> for BookingInfo {
    fn from(rsvp: Reservation) -> Self {
        Self {
            booking_id: rsvp.id,
            resource_id: rsvp.resource_id,
            user_id: rsvp.user_id,
            start_at: Some(convert_to_timestamp(rsvp.start_at)),
            end_at: Some(convert_to_timestamp(rsvp.end_at)),
        }
    }
}
