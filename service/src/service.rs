use std::future::Future;

use abi::{
    booking_service_server::BookingService, BookingConfig, CreateBookingRequest,
    CreateBookingResponse, GetBookingsByResourceRequest, GetBookingsByResourceResponse,
    GetBookingsByUserRequest, GetBookingsByUserResponse,
};
use reservation::Rsvp;
use tokio::time::Instant;
use tonic::{Request, Response, Status};
use tracing::{error, info};

use crate::{deadline::deadline_for, ReservationService, RsvpService};

impl<S: Rsvp> RsvpService<S> {
    pub fn new(store: S, config: BookingConfig) -> Self {
        Self {
            service: ReservationService::new(store),
            config,
        }
    }

    pub fn inner(&self) -> &ReservationService<S> {
        &self.service
    }
}

#[tonic::async_trait]
impl<S: Rsvp> BookingService for RsvpService<S> {
    async fn create_booking(
        &self,
        request: Request<CreateBookingRequest>,
    ) -> Result<Response<CreateBookingResponse>, Status> {
        let deadline = deadline_for(&request, self.config.create_timeout());
        let request = request.into_inner();
        traced("CreateBooking", async move {
            let rsvp = request.validate()?;
            let booking_id = self.service.create(deadline, rsvp).await?;
            Ok(CreateBookingResponse { booking_id })
        })
        .await
    }

    async fn get_bookings_by_resource(
        &self,
        request: Request<GetBookingsByResourceRequest>,
    ) -> Result<Response<GetBookingsByResourceResponse>, Status> {
        let deadline = deadline_for(&request, self.config.list_timeout());
        let request = request.into_inner();
        traced("GetBookingsByResource", async move {
            let resource_ids = request.validate()?.to_vec();
            let bookings = self
                .service
                .list_by_resource_ids(deadline, resource_ids)
                .await?;
            Ok(GetBookingsByResourceResponse { bookings })
        })
        .await
    }

    async fn get_bookings_by_user(
        &self,
        request: Request<GetBookingsByUserRequest>,
    ) -> Result<Response<GetBookingsByUserResponse>, Status> {
        let deadline = deadline_for(&request, self.config.list_timeout());
        let request = request.into_inner();
        traced("GetBookingsByUser", async move {
            let user_id = request.validate()?;
            let bookings = self.service.list_by_user(deadline, user_id).await?;
            Ok(GetBookingsByUserResponse { bookings })
        })
        .await
    }
}

async fn traced<T, F>(method: &'static str, fut: F) -> Result<Response<T>, Status>
where
    F: Future<Output = Result<T, abi::Error>>,
{
    let start = Instant::now();
    info!(method, "incoming request");

    match fut.await {
        Ok(resp) => {
            info!(method, duration = ?start.elapsed(), "request completed");
            Ok(Response::new(resp))
        }
        Err(e) => {
            error!(method, error = %e, duration = ?start.elapsed(), "request failed");
            Err(e.into())
        }
    }
}
