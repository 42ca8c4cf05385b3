use serde::ser;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while encoding requests or decoding backend responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A custom error message from serde
    #[error("{0}")]
    Message(String),

    /// The array text could not be closed (bracket or quote) or was not bracketed at all
    #[error("malformed array at byte {offset}: {reason}")]
    MalformedArray { offset: usize, reason: &'static str },

    /// A success response did not start with `//OK`
    #[error("response body is missing the //OK prefix")]
    MissingOkPrefix,

    /// An error response did not start with `//EX`
    #[error("response body is missing the //EX prefix")]
    MissingErrorPrefix,

    /// A response body carried neither `//OK` nor `//EX`
    #[error("response body has neither an //OK nor an //EX prefix")]
    UnknownPrefix,

    /// The decoded payload is shorter than the decoder needs
    #[error("payload too short: expected at least {expected} elements, got {got}")]
    TooShort { expected: usize, got: usize },

    /// The trailing protocol version is not the one this codec speaks
    #[error("unsupported protocol version: {found} (expected 7)")]
    BadProtocolVersion { found: String },

    /// The element three from the end is not the shared string table
    #[error("payload has no string table (found {found})")]
    MissingStringTable { found: &'static str },

    /// The payload root does not carry the type tag the operation returns
    #[error("unexpected payload root: expected {expected}, found {found:?}")]
    UnexpectedRoot { expected: &'static str, found: String },

    /// A field position held a different kind of value than its record layout assumes
    #[error("field `{field}` at payload position {position}: expected {expected}, found {found}")]
    UnexpectedRecordShape {
        field: &'static str,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// An error envelope did not have the exception array where expected
    #[error("malformed error envelope: {reason}")]
    BadShape { reason: String },

    /// An error envelope carried no message fragment
    #[error("error envelope carries no message")]
    NoMessage,

    /// The backend answered with a well-formed exception
    #[error("backend error: {0}")]
    Backend(String),

    /// The document upload endpoint answered with something other than `SUCCESS:<path>:`
    #[error("unexpected upload response: {body:?}")]
    UnexpectedUploadResponse { body: String },

    /// A request template names a slot the arguments did not provide
    #[error("request template slot `{0}` has no argument")]
    MissingArgument(String),

    /// Request arguments must be strings
    #[error("request arguments do not support type: {0}")]
    Unsupported(&'static str),
}

impl Error {
    /// True when the backend itself reported the failure through an `//EX` envelope.
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// True when the response shape no longer matches what this codec was captured
    /// against. These must never be retried.
    pub fn is_contract_drift(&self) -> bool {
        matches!(
            self,
            Error::BadProtocolVersion { .. }
                | Error::MissingStringTable { .. }
                | Error::UnexpectedRoot { .. }
                | Error::UnexpectedRecordShape { .. }
        )
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}
