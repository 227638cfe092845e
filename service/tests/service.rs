#[path = "../src/test_utils.rs"]
mod test_utils;
use std::time::Duration;

use abi::{
    booking_service_client::BookingServiceClient, convert_to_timestamp,
    CreateBookingRequestBuilder, GetBookingsByResourceRequest, GetBookingsByUserRequest,
};
use chrono::{DateTime, Utc};
use reservation_service::start_server;
use test_utils::TestConfig;
use tokio::time;
use tonic::Code;

#[tokio::test]
async fn grpc_server_should_work() {
    let tconfig = TestConfig::default();
    let config_cloned = tconfig.clone();
    tokio::spawn(async move {
        start_server(&config_cloned).await.unwrap();
    });
    time::sleep(Duration::from_millis(100)).await;

    let mut client = BookingServiceClient::connect(tconfig.server.url(false))
        .await
        .unwrap();

    // first we make a booking on a room of capacity 2
    let id = client
        .create_booking(booking(1, 713, 2, "2022-12-26T15:00:00Z", "2022-12-30T12:00:00Z"))
        .await
        .unwrap()
        .into_inner()
        .booking_id;
    assert!(id > 0);

    // then we try the exact same window again
    let err = client
        .create_booking(booking(2, 713, 2, "2022-12-26T15:00:00Z", "2022-12-30T12:00:00Z"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::FailedPrecondition);

    // the second slot is still free, the third is not
    client
        .create_booking(booking(2, 713, 2, "2022-12-30T12:00:00Z", "2022-12-31T12:00:00Z"))
        .await
        .unwrap();
    let err = client
        .create_booking(booking(3, 713, 2, "2023-01-01T12:00:00Z", "2023-01-02T12:00:00Z"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::FailedPrecondition);

    // an empty window never reaches the store
    let err = client
        .create_booking(booking(3, 713, 2, "2023-01-01T12:00:00Z", "2023-01-01T12:00:00Z"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    // then we make 10 bookings on distinct rooms
    for i in 0..10 {
        client
            .create_booking(booking(4, 100 + i, 1, "2022-12-26T15:00:00Z", "2022-12-30T12:00:00Z"))
            .await
            .unwrap();
    }

    // then we list by resource
    let bookings = client
        .get_bookings_by_resource(GetBookingsByResourceRequest::new(vec![713, 100, 9999]))
        .await
        .unwrap()
        .into_inner()
        .bookings;
    assert_eq!(bookings.len(), 3);
    assert_eq!(bookings[0].booking_id, id);
    assert!(bookings.iter().all(|b| b.resource_id == 713 || b.resource_id == 100));

    let err = client
        .get_bookings_by_resource(GetBookingsByResourceRequest::new(vec![]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    // and by user
    let bookings = client
        .get_bookings_by_user(GetBookingsByUserRequest::new(4))
        .await
        .unwrap()
        .into_inner()
        .bookings;
    assert_eq!(bookings.len(), 10);
}

fn booking(
    user_id: i32,
    resource_id: i32,
    capacity: i32,
    start: &str,
    end: &str,
) -> abi::CreateBookingRequest {
    let start: DateTime<Utc> = start.parse().unwrap();
    let end: DateTime<Utc> = end.parse().unwrap();
    CreateBookingRequestBuilder::default()
        .user_id(user_id)
        .resource_id(resource_id)
        .resource_capacity(capacity)
        .start_at(convert_to_timestamp(start))
        .end_at(convert_to_timestamp(end))
        .build()
        .unwrap()
}
