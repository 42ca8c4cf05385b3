//! Request encoding
//!
//! Every operation has one literal wire template, captured from the backend's
//! own client. Encoding never builds a request structurally: it substitutes the
//! host and the operation's arguments into `{name}` slots and leaves every other
//! byte untouched, because the backend checks the strong names and type
//! signatures embedded in the template.

use crate::error::{Error, Result};
use crate::ser::{Slots, to_slots};
use serde::Serialize;

/// Content type of every RPC body.
pub const CONTENT_TYPE: &str = "text/x-gwt-rpc; charset=utf-8";

/// Endpoint accepting multipart document uploads. Its reply is decoded by
/// [`crate::records::ack::decode_upload_response`].
pub const UPLOAD_PATH: &str = "/lynx/fileDocumentUpload";

const SECURITY_PATH: &str = "/lynx/service/security.rpc";
const FILE_PATH: &str = "/lynx/service/file.rpc";

const SECURITY_SERVICE: &str = "com.lynxtraveltech.common.gui.client.rpc.SecurityService";
const FILE_SERVICE: &str = "com.lynxtraveltech.client.client.rpc.FileService";

/// The RPC operations this crate knows how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    FileSearchByPartyName,
    FileSearchByFileReference,
    RetrieveItinerary,
    ListDocumentsByFile,
    ListDocumentsByTransaction,
    SaveFileDocument,
    SaveTransactionDocument,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Login,
        Operation::FileSearchByPartyName,
        Operation::FileSearchByFileReference,
        Operation::RetrieveItinerary,
        Operation::ListDocumentsByFile,
        Operation::ListDocumentsByTransaction,
        Operation::SaveFileDocument,
        Operation::SaveTransactionDocument,
    ];

    /// Endpoint path the body is posted to.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Login => SECURITY_PATH,
            _ => FILE_PATH,
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            Operation::Login => SECURITY_SERVICE,
            _ => FILE_SERVICE,
        }
    }

    /// Remote method name as it appears in the template.
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::FileSearchByPartyName | Operation::FileSearchByFileReference => "search",
            Operation::RetrieveItinerary => "retrieveItinerary",
            Operation::ListDocumentsByFile | Operation::ListDocumentsByTransaction => {
                "getFileDocumentsAsList"
            }
            Operation::SaveFileDocument | Operation::SaveTransactionDocument => {
                "saveFileDocumentsDetails"
            }
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Operation::Login => templates::LOGIN,
            Operation::FileSearchByPartyName => templates::SEARCH_BY_PARTY_NAME,
            Operation::FileSearchByFileReference => templates::SEARCH_BY_FILE_REFERENCE,
            Operation::RetrieveItinerary => templates::RETRIEVE_ITINERARY,
            Operation::ListDocumentsByFile => templates::DOCUMENTS_BY_FILE,
            Operation::ListDocumentsByTransaction => templates::DOCUMENTS_BY_TRANSACTION,
            Operation::SaveFileDocument => templates::SAVE_FILE_DOCUMENT,
            Operation::SaveTransactionDocument => templates::SAVE_TRANSACTION_DOCUMENT,
        }
    }
}

#[rustfmt::skip]
mod templates {
    pub const LOGIN: &str = "7|0|9|https://{host}/lynx/lynx/|4775EB021C85EC0B04470837F40FC64A|com.lynxtraveltech.common.gui.client.rpc.SecurityService|login|java.lang.String/2004016611|Z|{company_code}|{username}|{password}|1|2|3|4|4|5|5|5|6|7|8|9|0|";

    pub const SEARCH_BY_PARTY_NAME: &str = "7|0|9|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|search|com.lynxtraveltech.client.shared.model.FileSearchCriteria/1867541444||{party_name}|PARTY_NAME|DD MMM YYYY|1|2|3|4|1|5|5|6|6|1|1|1|7|6|50|8|6|0|9|0|0|6|";

    pub const SEARCH_BY_FILE_REFERENCE: &str = "7|0|9|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|search|com.lynxtraveltech.client.shared.model.FileSearchCriteria/1867541444||{file_reference}|PARTY_NAME|DD MMM YYYY|1|2|3|4|1|5|5|6|7|1|1|1|6|6|50|8|6|0|9|0|0|6|";

    pub const RETRIEVE_ITINERARY: &str = "7|0|6|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|retrieveItinerary|J|Z|1|2|3|4|4|5|6|6|6|{file_identifier}|0|0|0|";

    pub const DOCUMENTS_BY_FILE: &str = "7|0|8|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|getFileDocumentsAsList|J|java.lang.Long/4227064769|I|java.lang.String/2004016611|1|2|3|4|4|5|6|7|8|{file_identifier}|0|1|0|";

    pub const DOCUMENTS_BY_TRANSACTION: &str = "7|0|8|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|getFileDocumentsAsList|J|java.lang.Long/4227064769|I|java.lang.String/2004016611|1|2|3|4|4|5|6|7|8|{file_identifier}|6|{transaction_identifier}|1|0|";

    pub const SAVE_FILE_DOCUMENT: &str = "7|0|9|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|saveFileDocumentsDetails|com.lynxtraveltech.common.gui.shared.model.DocumentDetails/2779362264|{content}|{document_type}|{name}|{attachment_url}|1|2|3|4|1|5|5|0|1|A|0|0|0|P__________|6|7|0|{file_identifier}|8|9|0|";

    pub const SAVE_TRANSACTION_DOCUMENT: &str = "7|0|10|https://{host}/lynx/lynx/|63A734E3E71C14883B20AFEC1238F6A7|com.lynxtraveltech.client.client.rpc.FileService|saveFileDocumentsDetails|com.lynxtraveltech.common.gui.shared.model.DocumentDetails/2779362264|java.lang.Long/4227064769|{content}|{document_type}|{name}|{attachment_url}|1|2|3|4|1|5|5|6|{transaction_identifier}|1|A|0|0|0|P__________|7|8|0|{file_identifier}|9|10|0|";
}

// ── Arguments ──────────────────────────────────────────────────────────────

/// Argument struct of one operation. Field names are the template's slot names.
pub trait Call: Serialize {
    const OPERATION: Operation;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Login<'a> {
    pub company_code: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchByPartyName<'a> {
    pub party_name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchByFileReference<'a> {
    pub file_reference: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetrieveItinerary<'a> {
    pub file_identifier: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListDocumentsByFile<'a> {
    pub file_identifier: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListDocumentsByTransaction<'a> {
    pub file_identifier: &'a str,
    pub transaction_identifier: &'a str,
}

/// A document attached to the file itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveFileDocument<'a> {
    /// HTML body of the document, already escaped for the wire.
    pub content: &'a str,
    pub document_type: &'a str,
    pub name: &'a str,
    /// Path returned by a prior upload, if the document has an attachment.
    pub attachment_url: Option<&'a str>,
    pub file_identifier: &'a str,
}

/// A document attached to one transaction of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveTransactionDocument<'a> {
    pub content: &'a str,
    pub document_type: &'a str,
    pub name: &'a str,
    pub attachment_url: Option<&'a str>,
    pub transaction_identifier: &'a str,
    pub file_identifier: &'a str,
}

impl Call for Login<'_> {
    const OPERATION: Operation = Operation::Login;
}
impl Call for SearchByPartyName<'_> {
    const OPERATION: Operation = Operation::FileSearchByPartyName;
}
impl Call for SearchByFileReference<'_> {
    const OPERATION: Operation = Operation::FileSearchByFileReference;
}
impl Call for RetrieveItinerary<'_> {
    const OPERATION: Operation = Operation::RetrieveItinerary;
}
impl Call for ListDocumentsByFile<'_> {
    const OPERATION: Operation = Operation::ListDocumentsByFile;
}
impl Call for ListDocumentsByTransaction<'_> {
    const OPERATION: Operation = Operation::ListDocumentsByTransaction;
}
impl Call for SaveFileDocument<'_> {
    const OPERATION: Operation = Operation::SaveFileDocument;
}
impl Call for SaveTransactionDocument<'_> {
    const OPERATION: Operation = Operation::SaveTransactionDocument;
}

// ── Encoding ───────────────────────────────────────────────────────────────

/// Render the wire body for `call` against `host`.
pub fn encode<C: Call>(call: &C, host: &str) -> Result<String> {
    render(C::OPERATION.template(), host, &to_slots(call)?)
}

pub fn encode_login(host: &str, company_code: &str, username: &str, password: &str) -> Result<String> {
    encode(
        &Login {
            company_code,
            username,
            password,
        },
        host,
    )
}

pub fn encode_search_by_party_name(host: &str, party_name: &str) -> Result<String> {
    encode(&SearchByPartyName { party_name }, host)
}

pub fn encode_search_by_file_reference(host: &str, file_reference: &str) -> Result<String> {
    encode(&SearchByFileReference { file_reference }, host)
}

pub fn encode_retrieve_itinerary(host: &str, file_identifier: &str) -> Result<String> {
    encode(&RetrieveItinerary { file_identifier }, host)
}

pub fn encode_list_documents_by_file(host: &str, file_identifier: &str) -> Result<String> {
    encode(&ListDocumentsByFile { file_identifier }, host)
}

pub fn encode_list_documents_by_transaction(
    host: &str,
    file_identifier: &str,
    transaction_identifier: &str,
) -> Result<String> {
    encode(
        &ListDocumentsByTransaction {
            file_identifier,
            transaction_identifier,
        },
        host,
    )
}

pub fn encode_save_file_document(host: &str, document: &SaveFileDocument<'_>) -> Result<String> {
    encode(document, host)
}

pub fn encode_save_transaction_document(
    host: &str,
    document: &SaveTransactionDocument<'_>,
) -> Result<String> {
    encode(document, host)
}

/// Substitute `{name}` slots in one left-to-right pass. Substituted text is
/// never rescanned, so argument values containing braces are inserted verbatim.
fn render(template: &str, host: &str, slots: &Slots) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + len];
        let value = match name {
            "host" => host,
            _ => slots
                .get(name)
                .ok_or_else(|| Error::MissingArgument(name.to_string()))?,
        };
        out.push_str(&rest[..open]);
        out.push_str(value);
        rest = &rest[open + len + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// A fully encoded request, ready for a transport to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub operation: Operation,
    pub url: String,
    pub content_type: &'static str,
    pub body: String,
}

impl RpcRequest {
    pub fn new<C: Call>(call: &C, host: &str) -> Result<RpcRequest> {
        Ok(RpcRequest {
            operation: C::OPERATION,
            url: format!("https://{host}{}", C::OPERATION.path()),
            content_type: CONTENT_TYPE,
            body: encode(call, host)?,
        })
    }
}
