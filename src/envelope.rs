//! Response envelopes
//!
//! A success body is `//OK` followed by one array whose tail is always
//! `[..., declared size, root index, [string table], flags, version]`.
//! An error body is `//EX` followed by an array carrying the exception.

use crate::de::tokenize;
use crate::error::{Error, Result};
use crate::tags::TypeTag;
use crate::value::{StringTable, WireValue};

pub const OK_PREFIX: &str = "//OK";
pub const EX_PREFIX: &str = "//EX";
pub const PROTOCOL_VERSION: i64 = 7;

/// Which of the two prefixes a body carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

impl Status {
    /// Peek at a raw body without tokenizing it.
    pub fn of(raw: &str) -> Option<Status> {
        if raw.starts_with(OK_PREFIX) {
            Some(Status::Success)
        } else if raw.starts_with(EX_PREFIX) {
            Some(Status::Error)
        } else {
            None
        }
    }
}

/// A tokenized response body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    status: Status,
    payload: Vec<WireValue>,
}

impl Envelope {
    /// Split off either prefix and tokenize the rest. No tail checks are made.
    pub fn parse(raw: &str) -> Result<Envelope> {
        let (status, rest) = match Status::of(raw) {
            Some(Status::Success) => (Status::Success, &raw[OK_PREFIX.len()..]),
            Some(Status::Error) => (Status::Error, &raw[EX_PREFIX.len()..]),
            None => return Err(Error::UnknownPrefix),
        };
        Ok(Envelope {
            status,
            payload: tokenize(rest)?,
        })
    }

    /// Parse a success body and check its tail: at least four elements, the
    /// protocol version last, and the string table third from the end.
    pub fn validate(raw: &str) -> Result<Envelope> {
        let rest = raw.strip_prefix(OK_PREFIX).ok_or(Error::MissingOkPrefix)?;
        let envelope = Envelope {
            status: Status::Success,
            payload: tokenize(rest)?,
        };
        envelope.check_tail()?;
        Ok(envelope)
    }

    fn check_tail(&self) -> Result<()> {
        let len = self.payload.len();
        if len < 4 {
            return Err(Error::TooShort {
                expected: 4,
                got: len,
            });
        }
        let last = &self.payload[len - 1];
        if last.as_int() != Some(PROTOCOL_VERSION) {
            return Err(Error::BadProtocolVersion {
                found: last.to_string(),
            });
        }
        let table = &self.payload[len - 3];
        if table.as_array().is_none() {
            return Err(Error::MissingStringTable {
                found: table.kind(),
            });
        }
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn payload(&self) -> &[WireValue] {
        &self.payload
    }

    /// The string table of a validated envelope; empty if there is none.
    pub fn table(&self) -> StringTable<'_> {
        let entries = self
            .payload
            .len()
            .checked_sub(3)
            .and_then(|at| self.payload[at].as_array())
            .unwrap_or(&[]);
        StringTable::new(entries)
    }

    /// Position of the root index, fourth from the end.
    pub fn root_position(&self) -> Result<usize> {
        self.tail_position(4)
    }

    /// The table entry the root index points at.
    pub fn root_tag(&self) -> Result<Option<&str>> {
        let at = self.root_position()?;
        let index = self.payload[at]
            .as_int()
            .ok_or_else(|| Error::UnexpectedRecordShape {
                field: "root",
                position: at,
                expected: "integer",
                found: self.payload[at].kind(),
            })?;
        Ok(self.table().get(index))
    }

    /// Fail with [`Error::UnexpectedRoot`] unless the root carries `tag`.
    pub fn expect_root(&self, tag: TypeTag) -> Result<()> {
        match self.root_tag()? {
            Some(found) if tag.matches(found) => Ok(()),
            found => Err(Error::UnexpectedRoot {
                expected: tag.name(),
                found: found.unwrap_or("<absent>").to_string(),
            }),
        }
    }

    /// The list size the backend declared, fifth from the end.
    pub fn declared_len(&self) -> Result<usize> {
        let at = self.tail_position(5)?;
        self.payload[at]
            .as_int()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| Error::UnexpectedRecordShape {
                field: "list size",
                position: at,
                expected: "non-negative integer",
                found: self.payload[at].kind(),
            })
    }

    /// Everything before the list header: where list records live.
    pub fn records(&self) -> &[WireValue] {
        let end = self.payload.len().saturating_sub(5);
        &self.payload[..end]
    }

    fn tail_position(&self, from_end: usize) -> Result<usize> {
        self.payload
            .len()
            .checked_sub(from_end)
            .ok_or(Error::TooShort {
                expected: from_end,
                got: self.payload.len(),
            })
    }
}
