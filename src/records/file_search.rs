//! File search results, returned by both search operations.

use super::{Field, RecordList, list};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::fault::reject_exception;
use crate::tags;
use serde::{Deserialize, Serialize};

const STRIDE: usize = 10;

const COMPANY_CODE: Field = Field::indexed("companyCode", 1);
const CLIENT_IDENTIFIER: Field = Field::inline("clientIdentifier", 2);
const CLIENT_REFERENCE: Field = Field::indexed("clientReference", 3);
const CURRENCY: Field = Field::indexed("currency", 4);
const FILE_IDENTIFIER: Field = Field::inline("fileIdentifier", 5);
const FILE_REFERENCE: Field = Field::indexed("fileReference", 6);
const PARTY_NAME: Field = Field::unescaped("partyName", 8);
const STATUS: Field = Field::indexed("status", 9);
const TRAVEL_DATE: Field = Field::indexed("travelDate", 10);

/// One booking file matching a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSearchResult {
    pub company_code: String,
    pub client_identifier: String,
    pub client_reference: String,
    pub currency: String,
    /// Opaque identifier used by every follow-up call on the file.
    pub file_identifier: String,
    /// Human-facing reference such as `FTSWA230184`.
    pub file_reference: String,
    pub party_name: String,
    pub status: String,
    pub travel_date: String,
}

/// Decode the body of a file search response.
pub fn decode(raw: &str) -> Result<RecordList<FileSearchResult>> {
    reject_exception(raw)?;
    extract(&Envelope::validate(raw)?)
}

pub fn extract(envelope: &Envelope) -> Result<RecordList<FileSearchResult>> {
    list(envelope, tags::FILE_SEARCH_RESULTS, STRIDE, |frame, at| {
        Ok(FileSearchResult {
            company_code: frame.read_before(at, COMPANY_CODE)?,
            client_identifier: frame.read_before(at, CLIENT_IDENTIFIER)?,
            client_reference: frame.read_before(at, CLIENT_REFERENCE)?,
            currency: frame.read_before(at, CURRENCY)?,
            file_identifier: frame.read_before(at, FILE_IDENTIFIER)?,
            file_reference: frame.read_before(at, FILE_REFERENCE)?,
            party_name: frame.read_before(at, PARTY_NAME)?,
            status: frame.read_before(at, STATUS)?,
            travel_date: frame.read_before(at, TRAVEL_DATE)?,
        })
    })
}
