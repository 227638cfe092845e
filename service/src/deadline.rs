use std::time::Duration;

use tokio::time::Instant;
use tonic::{metadata::MetadataMap, Request};

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// The transport starts its own `grpc-timeout` timer before the handler runs and
/// answers `CANCELLED` when it fires; client deadlines end this much earlier so
/// the storage race fires first and the caller sees `DEADLINE_EXCEEDED`.
pub const CLIENT_DEADLINE_MARGIN: Duration = Duration::from_millis(20);

/// Deadline for a call: the configured timeout, shortened by the client's
/// `grpc-timeout` (less [`CLIENT_DEADLINE_MARGIN`]) when that is smaller.
pub fn deadline_for<T>(request: &Request<T>, default: Duration) -> Instant {
    let timeout = client_timeout(request.metadata())
        .map_or(default, |t| t.saturating_sub(CLIENT_DEADLINE_MARGIN).min(default));
    Instant::now() + timeout
}

fn client_timeout(metadata: &MetadataMap) -> Option<Duration> {
    let value = metadata.get(GRPC_TIMEOUT_HEADER)?.to_str().ok()?;
    parse_grpc_timeout(value)
}

// "TimeoutValue TimeoutUnit", at most 8 ASCII digits followed by one of H M S m u n
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u64 = digits.parse().ok()?;
    let timeout = match unit {
        "H" => Duration::from_secs(n * 60 * 60),
        "M" => Duration::from_secs(n * 60),
        "S" => Duration::from_secs(n),
        "m" => Duration::from_millis(n),
        "u" => Duration::from_micros(n),
        "n" => Duration::from_nanos(n),
        _ => return None,
    };
    Some(timeout)
}
