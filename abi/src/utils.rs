use chrono::{DateTime, TimeZone, Utc};
use prost_types::Timestamp;

use crate::Error;

pub fn convert_to_utc_time(ts: &Timestamp) -> Result<DateTime<Utc>, Error> {
    let nanos = u32::try_from(ts.nanos)
        .map_err(|_| Error::InvalidArgument(format!("invalid timestamp nanos: {}", ts.nanos)))?;
    Utc.timestamp_opt(ts.seconds, nanos)
        .single()
        .ok_or_else(|| Error::InvalidArgument(format!("timestamp out of range: {}", ts.seconds)))
}

pub fn convert_to_timestamp(dt: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as _,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversion_should_keep_sub_second_precision() {
        let dt: DateTime<Utc> = "2022-12-26T15:00:00.250Z".parse().unwrap();
        let ts = convert_to_timestamp(dt);
        assert_eq!(ts.nanos, 250_000_000);
        assert_eq!(convert_to_utc_time(&ts).unwrap(), dt);
    }

    #[test]
    fn negative_nanos_should_be_rejected() {
        let ts = Timestamp {
            seconds: 0,
            nanos: -1,
        };
        assert!(matches!(
            convert_to_utc_time(&ts),
            Err(Error::InvalidArgument(_))
        ));
    }
}
