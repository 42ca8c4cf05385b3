//! Documents attached to a file or to one of its transactions.

use super::{Field, RecordList, list};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::fault::reject_exception;
use crate::tags;
use serde::{Deserialize, Serialize};

const STRIDE: usize = 17;

const TRANSACTION_IDENTIFIER: Field = Field::inline("transactionIdentifier", 2);
const CONTENT: Field = Field::unescaped("content", 11);
const DOCUMENT_TYPE: Field = Field::indexed("documentType", 13);
const FILE_IDENTIFIER: Field = Field::inline("fileIdentifier", 14);
const DOCUMENT_NAME: Field = Field::indexed("documentName", 15);
const ATTACHMENT_URL: Field = Field::optional("attachmentUrl", 16);
const DOCUMENT_IDENTIFIER: Field = Field::indexed("documentIdentifier", 17);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDocument {
    pub file_identifier: String,
    pub transaction_identifier: String,
    pub document_identifier: String,
    pub document_name: String,
    pub document_type: String,
    /// HTML body, unescaped.
    pub content: String,
    /// Empty when the document has no attachment.
    pub attachment_url: String,
}

/// Decode the body of either document listing operation.
pub fn decode(raw: &str) -> Result<RecordList<FileDocument>> {
    reject_exception(raw)?;
    extract(&Envelope::validate(raw)?)
}

pub fn extract(envelope: &Envelope) -> Result<RecordList<FileDocument>> {
    list(envelope, tags::DOCUMENT_DETAILS, STRIDE, |frame, at| {
        Ok(FileDocument {
            file_identifier: frame.read_before(at, FILE_IDENTIFIER)?,
            transaction_identifier: frame.read_before(at, TRANSACTION_IDENTIFIER)?,
            document_identifier: frame.read_before(at, DOCUMENT_IDENTIFIER)?,
            document_name: frame.read_before(at, DOCUMENT_NAME)?,
            document_type: frame.read_before(at, DOCUMENT_TYPE)?,
            content: frame.read_before(at, CONTENT)?,
            attachment_url: frame.read_before(at, ATTACHMENT_URL)?,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/documents.txt");

    #[test]
    fn test_layout_against_fixture() {
        let list = decode(FIXTURE).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(
            list.results[0],
            FileDocument {
                file_identifier: "$2s7".to_string(),
                transaction_identifier: "BgsOD".to_string(),
                document_identifier: "d20250708231038".to_string(),
                document_name: "Voucher".to_string(),
                document_type: "PDF".to_string(),
                content: "<p>See attached voucher</p>".to_string(),
                attachment_url: "/documents/file/f16476987/d20250708231038.pdf".to_string(),
            }
        );
        assert_eq!(list.results[1].attachment_url, "");
    }
}
