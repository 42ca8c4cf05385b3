//! Itinerary of one booking file.
//!
//! The payload starts with a `FileSummary` header at fixed absolute positions,
//! followed by a run of transaction summaries. Entries are not a list on the
//! wire: a cursor walks forward from [`ENTRIES_START`] counting positions since
//! the last entry closed, and a `TransactionSummary` tag closes the current one.

use super::Field;
use super::Frame;
use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::fault::reject_exception;
use crate::tags;
use crate::value::WireValue;
use serde::{Deserialize, Serialize};

const KIND: Field = Field::indexed("type", 1);
const PARTY_NAME: Field = Field::unescaped("partyName", 2);
const FILE_REFERENCE: Field = Field::indexed("fileReference", 4);
const FILE_IDENTIFIER: Field = Field::inline("fileIdentifier", 5);
const AGENT_REFERENCE: Field = Field::indexed("agentReference", 7);
const CLIENT_IDENTIFIER: Field = Field::inline("clientIdentifier", 8);

/// First payload position of the entry run.
pub const ENTRIES_START: usize = 11;

// Positions relative to the start of an entry.
const VOUCHER_AT: usize = 0;
const DATE_AT: usize = 2;
const TRANSACTION_AT: usize = 3;
const SUPPLIER_AT: usize = 5;
const STATUS_AT: usize = 9;

// Positions before the closing tag.
const CONFIRMATION: Field = Field::optional("confirmationNumber", 9);
const LOCATION: Field = Field::optional("location", 14);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Booking kind as labelled by the backend, e.g. `Quote` or `Partial`.
    #[serde(rename = "type")]
    pub kind: String,
    pub party_name: String,
    pub file_reference: String,
    pub file_identifier: String,
    pub client_identifier: String,
    pub agent_reference: String,
    pub itinerary_count: usize,
    pub itineraries: Vec<ItineraryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryEntry {
    pub voucher_identifier: String,
    pub date: String,
    pub transaction_identifier: String,
    pub supplier: String,
    pub status: String,
    pub confirmation_number: String,
    pub location: String,
}

pub fn decode(raw: &str) -> Result<Itinerary> {
    reject_exception(raw)?;
    extract(&Envelope::validate(raw)?)
}

pub fn extract(envelope: &Envelope) -> Result<Itinerary> {
    envelope.expect_root(tags::FILE_SUMMARY)?;
    let frame = Frame::new(envelope);
    let itineraries = entries(&frame)?;
    tracing::debug!(entries = itineraries.len(), "decoded itinerary");

    Ok(Itinerary {
        kind: frame.read(KIND)?,
        party_name: frame.read(PARTY_NAME)?,
        file_reference: frame.read(FILE_REFERENCE)?,
        file_identifier: frame.read(FILE_IDENTIFIER)?,
        client_identifier: frame.read(CLIENT_IDENTIFIER)?,
        agent_reference: frame.read(AGENT_REFERENCE)?,
        itinerary_count: itineraries.len(),
        itineraries,
    })
}

fn entries(frame: &Frame<'_>) -> Result<Vec<ItineraryEntry>> {
    let payload = frame.payload();
    let table = frame.table();
    let mut entries = Vec::new();
    let mut current = ItineraryEntry::default();
    let mut i = ENTRIES_START;
    let mut rel = 0;

    while i < payload.len() {
        let mut step = 1;
        let mut closed = false;

        match &payload[i] {
            WireValue::String(text) => {
                if rel == TRANSACTION_AT {
                    current.transaction_identifier = text.clone();
                }
                if current.transaction_identifier.is_empty() && looks_like_transaction_id(text) {
                    tracing::debug!(position = i, value = %text, "transaction identifier taken by pattern");
                    current.transaction_identifier = text.clone();
                }
            }
            WireValue::Integer(index) => {
                if let Some(entry) = table.entry(*index) {
                    let text = entry.as_str();
                    if text.is_some_and(tags::is_wrapper) {
                        // The next position is the boxed value.
                        step = 2;
                    } else {
                        if let Some((slot, field)) = slot_at(&mut current, rel) {
                            *slot = text
                                .ok_or(Error::UnexpectedRecordShape {
                                    field,
                                    position: i,
                                    expected: "string table entry",
                                    found: entry.kind(),
                                })?
                                .to_string();
                        }
                        if text.is_some_and(|t| tags::TRANSACTION_SUMMARY.matches(t)) {
                            current.confirmation_number = frame.read_before(i, CONFIRMATION)?;
                            current.location = frame.read_before(i, LOCATION)?;
                            entries.push(std::mem::take(&mut current));
                            closed = true;
                        }
                    }
                }
            }
            _ => {}
        }

        i += step;
        rel = if closed { 0 } else { rel + 1 };
    }

    // Entries close in reverse itinerary order.
    entries.reverse();
    Ok(entries)
}

fn slot_at(entry: &mut ItineraryEntry, rel: usize) -> Option<(&mut String, &'static str)> {
    match rel {
        VOUCHER_AT => Some((&mut entry.voucher_identifier, "voucherIdentifier")),
        DATE_AT => Some((&mut entry.date, "date")),
        SUPPLIER_AT => Some((&mut entry.supplier, "supplier")),
        STATUS_AT => Some((&mut entry.status, "status")),
        _ => None,
    }
}

/// Fallback for entries whose transaction identifier is not at its usual
/// position: a string of more than three bytes starting with `B` and a
/// lowercase ASCII letter.
// TODO: replace with a positional rule once a payload where the primary
// position is empty can be captured from the backend.
fn looks_like_transaction_id(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() > 3 && b[0] == b'B' && b[1].is_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_pattern() {
        assert!(looks_like_transaction_id("BgsOD"));
        assert!(looks_like_transaction_id("Bf$n4"));
        assert!(!looks_like_transaction_id("BAkC"));
        assert!(!looks_like_transaction_id("Bgs"));
        assert!(!looks_like_transaction_id("$2s7"));
    }

    #[test]
    fn test_root_must_be_file_summary() {
        let raw = r#"//OK[0,1,["java.util.ArrayList/4159755760"],0,7]"#;
        assert!(matches!(decode(raw), Err(Error::UnexpectedRoot { .. })));
    }

    #[test]
    fn test_short_fixture_layout() {
        let itinerary = decode(include_str!("../../tests/fixtures/itinerary_short.txt")).unwrap();
        assert_eq!(itinerary.kind, "Quote");
        assert_eq!(itinerary.itinerary_count, 2);
        assert_eq!(itinerary.itineraries[0].voucher_identifier, "16476987-1");
        assert_eq!(itinerary.itineraries[1].location, "CAIRNS, QLD");
    }
}
