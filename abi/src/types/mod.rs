mod request;
mod reservation;

pub use reservation::{NewReservation, Reservation};
