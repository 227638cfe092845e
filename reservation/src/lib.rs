mod error;
mod manager;

use abi::{NewReservation, Reservation, ReservationId, ResourceId, UserId};
use async_trait::async_trait;
use sqlx::PgPool;

pub use error::ReservationError;

/// Postgres-backed reservation store. Owns its connection pool.
#[derive(Debug, Clone)]
pub struct ReservationManager {
    pool: PgPool,
    lazy_init: bool,
}

#[async_trait]
pub trait Rsvp: Send + Sync + 'static {
    /// make a reservation if the resource still has capacity, returns the new reservation id
    async fn reserve(&self, rsvp: NewReservation) -> Result<ReservationId, ReservationError>;
    /// list reservations held against any of the given resources
    async fn list_by_resources(
        &self,
        resource_ids: Vec<ResourceId>,
    ) -> Result<Vec<Reservation>, ReservationError>;
    /// list reservations made by a user
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Reservation>, ReservationError>;
}
