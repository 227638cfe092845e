use std::{future::Future, sync::Arc};

use abi::{BookingInfo, Error, NewReservation, ReservationId, ResourceId, UserId};
use reservation::{ReservationError, Rsvp};
use tokio::time::{self, Instant};
use tracing::warn;

/// Bounds every store call by a caller deadline and speaks domain errors.
///
/// Store calls run on their own task. When the deadline wins the race the
/// caller gets [`Error::StorageTimeout`] right away, but the task is left
/// running: a reservation reported as timed out may still commit.
#[derive(Debug)]
pub struct ReservationService<S> {
    store: Arc<S>,
}

impl<S> Clone for ReservationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: Rsvp> ReservationService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create(
        &self,
        deadline: Instant,
        rsvp: NewReservation,
    ) -> Result<ReservationId, Error> {
        let store = self.store.clone();
        let input = rsvp.clone();
        race(deadline, async move { store.reserve(input).await })
            .await?
            .map_err(|e| map_create_error(e, &rsvp))
    }

    pub async fn list_by_resource_ids(
        &self,
        deadline: Instant,
        resource_ids: Vec<ResourceId>,
    ) -> Result<Vec<BookingInfo>, Error> {
        let store = self.store.clone();
        let rsvps = race(deadline, async move { store.list_by_resources(resource_ids).await })
            .await?
            .map_err(map_list_error)?;
        Ok(rsvps.into_iter().map(BookingInfo::from).collect())
    }

    pub async fn list_by_user(
        &self,
        deadline: Instant,
        user_id: UserId,
    ) -> Result<Vec<BookingInfo>, Error> {
        let store = self.store.clone();
        let rsvps = race(deadline, async move { store.list_by_user(user_id).await })
            .await?
            .map_err(map_list_error)?;
        Ok(rsvps.into_iter().map(BookingInfo::from).collect())
    }
}

/// Wait for `fut` on a separate task until `deadline`; the loser is never cancelled.
async fn race<T, F>(deadline: Instant, fut: F) -> Result<Result<T, ReservationError>, Error>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ReservationError>> + Send + 'static,
{
    let handle = tokio::spawn(fut);
    match time::timeout_at(deadline, handle).await {
        Ok(joined) => joined.map_err(Error::internal),
        Err(_) => {
            // dropping the JoinHandle detaches the task
            warn!("store call outlived its deadline, left running in background");
            Err(Error::StorageTimeout)
        }
    }
}

fn map_create_error(e: ReservationError, rsvp: &NewReservation) -> Error {
    match e {
        ReservationError::NotFound => Error::ResourceNotFound,
        ReservationError::CapacityReached => Error::CapacityReached {
            resource_id: rsvp.resource_id,
            capacity: rsvp.capacity,
        },
        ReservationError::TimeConflict => Error::TimeConflict {
            resource_id: rsvp.resource_id,
            start_at: rsvp.start_at,
            end_at: rsvp.end_at,
        },
        ReservationError::Db(e) => Error::internal(e),
    }
}

fn map_list_error(e: ReservationError) -> Error {
    match e {
        ReservationError::NotFound => Error::ResourceNotFound,
        e => Error::internal(e),
    }
}
