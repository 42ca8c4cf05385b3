//! Typed records decoded from success payloads.
//!
//! Records are not self-describing on the wire. A record is found by its type
//! tag in the string table, and its fields sit at fixed offsets before the tag
//! position. Each record kind keeps its offsets as named [`Field`] constants so a
//! backend-side layout change fails in one place.

pub mod ack;
pub mod documents;
pub mod file_search;
pub mod itinerary;

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::escape::unescape;
use crate::tags::{self, TypeTag};
use crate::value::{StringTable, WireValue};
use serde::{Deserialize, Serialize};

/// A decoded list response.
///
/// `count` is the size the backend declared in the list header. It is reported
/// as-is even when fewer records were found in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordList<T> {
    pub count: usize,
    pub results: Vec<T>,
}

/// How a field's payload position is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    /// One-based table index; zero or out of range reads as empty.
    Indexed,
    /// Like `Indexed`, then unescaped.
    Unescaped,
    /// Like `Indexed`, but a non-integer position also reads as empty.
    Optional,
    /// The string literal stored at the position itself.
    Inline,
}

/// A named field at a fixed position. For list records and itinerary entries the
/// position counts backward from the record's tag.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    pub name: &'static str,
    pub position: usize,
    pub source: Source,
}

impl Field {
    pub const fn indexed(name: &'static str, position: usize) -> Field {
        Field {
            name,
            position,
            source: Source::Indexed,
        }
    }

    pub const fn unescaped(name: &'static str, position: usize) -> Field {
        Field {
            name,
            position,
            source: Source::Unescaped,
        }
    }

    pub const fn optional(name: &'static str, position: usize) -> Field {
        Field {
            name,
            position,
            source: Source::Optional,
        }
    }

    pub const fn inline(name: &'static str, position: usize) -> Field {
        Field {
            name,
            position,
            source: Source::Inline,
        }
    }
}

/// Bounds-checked field reads over one payload and its string table.
pub(crate) struct Frame<'a> {
    payload: &'a [WireValue],
    table: StringTable<'a>,
}

impl<'a> Frame<'a> {
    pub fn new(envelope: &'a Envelope) -> Frame<'a> {
        Frame {
            payload: envelope.payload(),
            table: envelope.table(),
        }
    }

    pub fn payload(&self) -> &'a [WireValue] {
        self.payload
    }

    pub fn table(&self) -> StringTable<'a> {
        self.table
    }

    /// Read a field at its absolute position.
    pub fn read(&self, field: Field) -> Result<String> {
        self.read_at(field.position, field)
    }

    /// Read a field `field.position` elements before `anchor`.
    pub fn read_before(&self, anchor: usize, field: Field) -> Result<String> {
        match anchor.checked_sub(field.position) {
            Some(position) => self.read_at(position, field),
            None if field.source == Source::Optional => Ok(String::new()),
            None => Err(shape(field, 0, "nothing")),
        }
    }

    fn read_at(&self, position: usize, field: Field) -> Result<String> {
        let value = self
            .payload
            .get(position)
            .ok_or_else(|| shape(field, position, "nothing"))?;

        if field.source == Source::Inline {
            return value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| shape(field, position, value.kind()));
        }

        let index = match (value.as_int(), field.source) {
            (Some(index), _) => index,
            (None, Source::Optional) => return Ok(String::new()),
            (None, _) => return Err(shape(field, position, value.kind())),
        };
        match self.table.entry(index) {
            None => Ok(String::new()),
            Some(WireValue::String(text)) if field.source == Source::Unescaped => Ok(unescape(text)),
            Some(WireValue::String(text)) => Ok(text.clone()),
            Some(other) => Err(Error::UnexpectedRecordShape {
                field: field.name,
                position,
                expected: "string table entry",
                found: other.kind(),
            }),
        }
    }
}

fn shape(field: Field, position: usize, found: &'static str) -> Error {
    Error::UnexpectedRecordShape {
        field: field.name,
        position,
        expected: match field.source {
            Source::Inline => "inline string",
            _ => "table index",
        },
        found,
    }
}

/// Decode a list response: check the root is a list, read the declared size, and
/// walk the records region backward collecting one record per `tag`.
///
/// Walking backward from the list header meets records in list order. After a
/// record is harvested the cursor jumps over its `stride` fields.
pub(crate) fn list<T>(
    envelope: &Envelope,
    tag: TypeTag,
    stride: usize,
    mut harvest: impl FnMut(&Frame<'_>, usize) -> Result<T>,
) -> Result<RecordList<T>> {
    envelope.expect_root(tags::ARRAY_LIST)?;
    let count = envelope.declared_len()?;
    let frame = Frame::new(envelope);
    let table = frame.table();

    // The declared size is backend input; never trust it beyond what the payload holds.
    let mut i = envelope.records().len();
    let mut results = Vec::with_capacity(count.min(i / stride.max(1) + 1));
    while i > 0 {
        i -= 1;
        let Some(index) = frame.payload()[i].as_int() else {
            continue;
        };
        if table.get(index).is_some_and(|entry| tag.matches(entry)) {
            results.push(harvest(&frame, i)?);
            i = i.saturating_sub(stride);
        }
    }

    if results.len() != count {
        tracing::warn!(
            record = tag.name(),
            declared = count,
            found = results.len(),
            "declared list size differs from records found"
        );
    }
    tracing::debug!(record = tag.name(), count = results.len(), "decoded record list");
    Ok(RecordList { count, results })
}
