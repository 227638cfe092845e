use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ResourceId;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("resource not found")]
    ResourceNotFound,

    #[error("capacity {capacity} reached for resource {resource_id}")]
    CapacityReached {
        resource_id: ResourceId,
        capacity: i32,
    },

    #[error("conflicting time already booked on resource {resource_id}: [{start_at}, {end_at})")]
    TimeConflict {
        resource_id: ResourceId,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    },

    #[error("storage timeout")]
    StorageTimeout,

    #[error("internal error: {0}")]
    Internal(#[source] BoxError),

    #[error("failed to read configuration file")]
    ConfigRead(#[source] std::io::Error),

    #[error("failed to parse configuration file")]
    ConfigParse(#[source] serde_yaml::Error),
}

impl Error {
    pub fn internal(err: impl Into<BoxError>) -> Self {
        Self::Internal(err.into())
    }
}

// errors carrying opaque sources never compare equal
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::ResourceNotFound, Self::ResourceNotFound) => true,
            (
                Self::CapacityReached {
                    resource_id: r1,
                    capacity: c1,
                },
                Self::CapacityReached {
                    resource_id: r2,
                    capacity: c2,
                },
            ) => r1 == r2 && c1 == c2,
            (
                Self::TimeConflict {
                    resource_id: r1,
                    start_at: s1,
                    end_at: e1,
                },
                Self::TimeConflict {
                    resource_id: r2,
                    start_at: s2,
                    end_at: e2,
                },
            ) => r1 == r2 && s1 == s2 && e1 == e2,
            (Self::StorageTimeout, Self::StorageTimeout) => true,
            _ => false,
        }
    }
}

impl From<Error> for tonic::Status {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidArgument(_) => tonic::Status::invalid_argument(e.to_string()),
            Error::ResourceNotFound => tonic::Status::not_found(e.to_string()),
            Error::CapacityReached { .. } | Error::TimeConflict { .. } => {
                tonic::Status::failed_precondition(e.to_string())
            }
            Error::StorageTimeout => tonic::Status::deadline_exceeded(e.to_string()),
            Error::Internal(ref source) => tonic::Status::internal(source.to_string()),
            Error::ConfigRead(_) | Error::ConfigParse(_) => tonic::Status::internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn business_outcomes_should_map_to_failed_precondition() {
        let capacity: tonic::Status = Error::CapacityReached {
            resource_id: 1,
            capacity: 2,
        }
        .into();
        assert_eq!(capacity.code(), Code::FailedPrecondition);

        let conflict: tonic::Status = Error::TimeConflict {
            resource_id: 1,
            start_at: "2023-01-01T10:00:00Z".parse().unwrap(),
            end_at: "2023-01-01T11:00:00Z".parse().unwrap(),
        }
        .into();
        assert_eq!(conflict.code(), Code::FailedPrecondition);
    }

    #[test]
    fn status_mapping_should_follow_error_kind() {
        let cases = [
            (Error::InvalidArgument("x".into()), Code::InvalidArgument),
            (Error::ResourceNotFound, Code::NotFound),
            (Error::StorageTimeout, Code::DeadlineExceeded),
            (Error::internal("connection reset"), Code::Internal),
        ];
        for (err, code) in cases {
            let status: tonic::Status = err.into();
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn internal_status_should_carry_cause_message() {
        let status: tonic::Status = Error::internal("pool timed out").into();
        assert_eq!(status.message(), "pool timed out");
    }

    #[test]
    fn internal_errors_never_compare_equal() {
        assert_ne!(Error::internal("a"), Error::internal("a"));
        assert_eq!(Error::StorageTimeout, Error::StorageTimeout);
    }
}
