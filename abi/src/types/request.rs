use crate::{
    convert_to_utc_time, CreateBookingRequest, Error, GetBookingsByResourceRequest,
    GetBookingsByUserRequest, NewReservation, ResourceId, UserId,
};

impl CreateBookingRequest {
    /// Check the request at the transport boundary and turn it into store input.
    pub fn validate(&self) -> Result<NewReservation, Error> {
        let (start_at, end_at) = match (&self.start_at, &self.end_at) {
            (Some(start), Some(end)) => (convert_to_utc_time(start)?, convert_to_utc_time(end)?),
            _ => {
                return Err(Error::InvalidArgument(
                    "start_at and end_at must be provided".into(),
                ))
            }
        };
        let rsvp = NewReservation::new(
            self.user_id,
            self.resource_id,
            self.resource_capacity,
            start_at,
            end_at,
        );
        rsvp.validate()?;
        Ok(rsvp)
    }
}

impl GetBookingsByResourceRequest {
    pub fn new(resource_ids: Vec<ResourceId>) -> Self {
        Self { resource_ids }
    }

    pub fn validate(&self) -> Result<&[ResourceId], Error> {
        if self.resource_ids.is_empty() {
            return Err(Error::InvalidArgument(
                "resource_ids must be provided".into(),
            ));
        }
        Ok(&self.resource_ids)
    }
}

impl GetBookingsByUserRequest {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn validate(&self) -> Result<UserId, Error> {
        if self.user_id <= 0 {
            return Err(Error::InvalidArgument("user_id must be positive".into()));
        }
        Ok(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{convert_to_timestamp, CreateBookingRequestBuilder};
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> prost_types::Timestamp {
        convert_to_timestamp(s.parse::<DateTime<Utc>>().unwrap())
    }

    #[test]
    fn create_request_should_validate_into_new_reservation() {
        let req = CreateBookingRequestBuilder::default()
            .user_id(1)
            .resource_id(7)
            .resource_capacity(2)
            .start_at(ts("2023-01-25T15:00:00Z"))
            .end_at(ts("2023-01-25T16:00:00Z"))
            .build()
            .unwrap();
        let rsvp = req.validate().unwrap();
        assert_eq!(rsvp.resource_id, 7);
        assert_eq!(rsvp.capacity, 2);
        assert_eq!(rsvp.end_at, "2023-01-25T16:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn missing_timestamps_should_be_rejected() {
        let req = CreateBookingRequest {
            user_id: 1,
            resource_id: 1,
            resource_capacity: 1,
            start_at: None,
            end_at: Some(ts("2023-01-25T16:00:00Z")),
        };
        assert_eq!(
            req.validate().unwrap_err(),
            Error::InvalidArgument("start_at and end_at must be provided".into())
        );
    }

    #[test]
    fn end_equal_to_start_should_be_rejected() {
        let req = CreateBookingRequestBuilder::default()
            .user_id(1)
            .resource_id(1)
            .resource_capacity(1)
            .start_at(ts("2023-01-25T15:00:00Z"))
            .end_at(ts("2023-01-25T15:00:00Z"))
            .build()
            .unwrap();
        assert!(matches!(req.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn empty_resource_ids_should_be_rejected() {
        let req = GetBookingsByResourceRequest::new(vec![]);
        assert!(req.validate().is_err());
        let req = GetBookingsByResourceRequest::new(vec![1, 2]);
        assert_eq!(req.validate().unwrap(), &[1, 2]);
    }

    #[test]
    fn non_positive_user_should_be_rejected() {
        assert!(GetBookingsByUserRequest::new(0).validate().is_err());
        assert_eq!(GetBookingsByUserRequest::new(3).validate().unwrap(), 3);
    }
}
