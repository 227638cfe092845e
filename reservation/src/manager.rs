use abi::{BookingConfig, DbConfig, NewReservation, Reservation, ReservationId, ResourceId, UserId};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::{ReservationError, ReservationManager, Rsvp};

#[async_trait]
impl Rsvp for ReservationManager {
    #[instrument(skip(self), fields(resource_id = rsvp.resource_id, user_id = rsvp.user_id))]
    async fn reserve(&self, rsvp: NewReservation) -> Result<ReservationId, ReservationError> {
        // dropping the transaction on any early return rolls it back
        let mut tx = self.pool.begin().await?;

        if self.lazy_init {
            // a concurrent initializer blocks here on our uncommitted row, then does nothing
            sqlx::query(
                "INSERT INTO booking.resource_capacity (resource_id) VALUES ($1) ON CONFLICT (resource_id) DO NOTHING",
            )
            .bind(rsvp.resource_id)
            .execute(&mut tx)
            .await?;
        }

        // serializes every creation against this resource until commit or rollback
        let count: i32 = sqlx::query_scalar(
            "SELECT count FROM booking.resource_capacity WHERE resource_id = $1 FOR UPDATE",
        )
        .bind(rsvp.resource_id)
        .fetch_optional(&mut tx)
        .await?
        .ok_or(ReservationError::NotFound)?;

        if count >= rsvp.capacity {
            debug!(count, capacity = rsvp.capacity, "capacity reached");
            return Err(ReservationError::CapacityReached);
        }

        let id: ReservationId = sqlx::query_scalar(
            "INSERT INTO booking.reservations (user_id, resource_id, start_at, end_at) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(rsvp.user_id)
        .bind(rsvp.resource_id)
        .bind(rsvp.start_at)
        .bind(rsvp.end_at)
        .fetch_one(&mut tx)
        .await
        .map_err(ReservationError::from_insert)?;

        sqlx::query(
            "UPDATE booking.resource_capacity SET count = count + 1, updated_at = now() WHERE resource_id = $1",
        )
        .bind(rsvp.resource_id)
        .execute(&mut tx)
        .await?;

        tx.commit().await?;
        debug!(id, "reservation committed");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_by_resources(
        &self,
        resource_ids: Vec<ResourceId>,
    ) -> Result<Vec<Reservation>, ReservationError> {
        if resource_ids.is_empty() {
            return Ok(vec![]);
        }
        let rsvps = sqlx::query_as(
            "SELECT id, user_id, resource_id, start_at, end_at FROM booking.reservations WHERE resource_id = ANY($1) ORDER BY id",
        )
        .bind(resource_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rsvps)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Reservation>, ReservationError> {
        let rsvps = sqlx::query_as(
            "SELECT id, user_id, resource_id, start_at, end_at FROM booking.reservations WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rsvps)
    }
}

impl ReservationManager {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lazy_init: true,
        }
    }

    /// When disabled, reserving against a resource without a counter row fails with `NotFound`.
    pub fn with_lazy_init(mut self, lazy_init: bool) -> Self {
        self.lazy_init = lazy_init;
        self
    }

    pub async fn from_config(db: &DbConfig, booking: &BookingConfig) -> Result<Self, ReservationError> {
        let pool = PgPoolOptions::default()
            .max_connections(db.max_connections)
            .connect(&db.url())
            .await?;
        Ok(Self::new(pool).with_lazy_init(booking.lazy_init))
    }

    /// Create the capacity counter for a resource, a no-op if it already exists.
    pub async fn provision(&self, resource_id: ResourceId) -> Result<(), ReservationError> {
        sqlx::query(
            "INSERT INTO booking.resource_capacity (resource_id) VALUES ($1) ON CONFLICT (resource_id) DO NOTHING",
        )
        .bind(resource_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Current counter value, `None` if the resource was never reserved or provisioned.
    pub async fn count(&self, resource_id: ResourceId) -> Result<Option<i32>, ReservationError> {
        let count = sqlx::query_scalar(
            "SELECT count FROM booking.resource_capacity WHERE resource_id = $1",
        )
        .bind(resource_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(count)
    }
}
