//! Backend exceptions carried by `//EX` bodies.

use crate::envelope::{Envelope, Status};
use crate::error::{Error, Result};
use crate::escape::unescape;
use crate::value::WireValue;

/// Extract the human-readable message from an error body.
///
/// The third payload element is the exception array: its first entry is the
/// exception class, the following string entries are message fragments. The
/// fragments are joined with `", "` and unescaped.
pub fn decode_error(raw: &str) -> Result<String> {
    if Status::of(raw) != Some(Status::Error) {
        return Err(Error::MissingErrorPrefix);
    }
    let envelope = Envelope::parse(raw)?;
    let payload = envelope.payload();
    if payload.len() < 3 {
        return Err(Error::TooShort {
            expected: 3,
            got: payload.len(),
        });
    }

    let details = payload[2].as_array().ok_or_else(|| Error::BadShape {
        reason: format!("expected the exception array at position 2, found {}", payload[2].kind()),
    })?;
    if details.len() < 2 {
        return Err(Error::BadShape {
            reason: format!("exception array has {} element(s), expected at least 2", details.len()),
        });
    }

    let fragments: Vec<&str> = details[1..].iter().filter_map(WireValue::as_str).collect();
    if fragments.is_empty() {
        return Err(Error::NoMessage);
    }
    Ok(unescape(&fragments.join(", ")))
}

/// Turn an `//EX` body into [`Error::Backend`]; any other body passes.
///
/// Every response decoder calls this first, so a backend exception is reported
/// as such instead of as a missing `//OK` prefix.
pub fn reject_exception(raw: &str) -> Result<()> {
    if Status::of(raw) != Some(Status::Error) {
        return Ok(());
    }
    let message = decode_error(raw)?;
    tracing::warn!(error = %message, "backend returned an exception");
    Err(Error::Backend(message))
}
