use thiserror::Error;

// postgres SQLSTATE codes
const UNIQUE_VIOLATION: &str = "23505";
const EXCLUSION_VIOLATION: &str = "23P01";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("record not found")]
    NotFound,

    #[error("capacity reached")]
    CapacityReached,

    #[error("conflicting time already booked on the resource")]
    TimeConflict,

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl ReservationError {
    /// Classify a failed reservation insert.
    pub(crate) fn from_insert(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) | Some(EXCLUSION_VIOLATION) => return Self::TimeConflict,
                Some(FOREIGN_KEY_VIOLATION) => return Self::NotFound,
                _ => {}
            }
        }
        e.into()
    }
}

impl PartialEq for ReservationError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound, Self::NotFound) => true,
            (Self::CapacityReached, Self::CapacityReached) => true,
            (Self::TimeConflict, Self::TimeConflict) => true,
            _ => false,
        }
    }
}
