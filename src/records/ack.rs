//! Acknowledgements of write operations.

use crate::envelope::OK_PREFIX;
use crate::error::{Error, Result};
use crate::fault::reject_exception;
use serde::{Deserialize, Serialize};

pub const UPLOAD_SUCCESS_PREFIX: &str = "SUCCESS:";

/// A save succeeds on any `//OK` body; its payload carries nothing useful.
pub fn decode_save_response(raw: &str) -> Result<()> {
    reject_exception(raw)?;
    if !raw.starts_with(OK_PREFIX) {
        return Err(Error::MissingOkPrefix);
    }
    Ok(())
}

/// Where the upload endpoint stored an attachment. The path is later passed as
/// the `attachment_url` of a document save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(rename = "attachmentUrl")]
    pub url: String,
}

/// Decode the plain-text reply of the upload endpoint, `SUCCESS:<path>:`.
pub fn decode_upload_response(raw: &str) -> Result<UploadReceipt> {
    let unexpected = || Error::UnexpectedUploadResponse {
        body: raw.to_string(),
    };
    let path = raw
        .strip_prefix(UPLOAD_SUCCESS_PREFIX)
        .map(str::trim)
        .and_then(|rest| rest.strip_suffix(':'))
        .ok_or_else(unexpected)?;
    if !path.starts_with('/') {
        return Err(unexpected());
    }
    tracing::debug!(url = path, "attachment uploaded");
    Ok(UploadReceipt {
        url: path.to_string(),
    })
}
