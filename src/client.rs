//! Typed operations over injected session and transport collaborators.
//!
//! The crate does no networking itself. A [`SessionProvider`] hands out a
//! credential (logging in through [`BackendConfig::login_request`] when needed)
//! and an [`HttpExecutor`] posts encoded requests. [`Client`] wires the codec
//! between them.

use crate::config::BackendConfig;
use crate::error::Error;
use crate::records::documents::{self, FileDocument};
use crate::records::file_search::{self, FileSearchResult};
use crate::records::itinerary::{self, Itinerary};
use crate::records::{RecordList, ack};
use crate::request::{
    Call, ListDocumentsByFile, ListDocumentsByTransaction, RetrieveItinerary, RpcRequest,
    SaveFileDocument, SaveTransactionDocument, SearchByFileReference, SearchByPartyName,
};
use std::fmt;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Proof of an authenticated session, as the transport attaches it to requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Credential(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub trait SessionProvider {
    /// A credential valid for at least one more request.
    fn credential(&self, config: &BackendConfig) -> Result<Credential, BoxError>;
}

pub trait HttpExecutor {
    /// Post `request.body` to `request.url` and return the response body.
    fn post(&self, request: &RpcRequest, credential: &Credential) -> Result<String, BoxError>;
}

impl<T: SessionProvider + ?Sized> SessionProvider for &T {
    fn credential(&self, config: &BackendConfig) -> Result<Credential, BoxError> {
        (**self).credential(config)
    }
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for &T {
    fn post(&self, request: &RpcRequest, credential: &Credential) -> Result<String, BoxError> {
        (**self).post(request, credential)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not obtain a session: {0}")]
    Session(#[source] BoxError),

    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    #[error(transparent)]
    Codec(#[from] Error),
}

impl ClientError {
    /// Only transport failures are worth retrying; codec and session failures
    /// repeat identically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn codec(&self) -> Option<&Error> {
        match self {
            ClientError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

pub struct Client<S, H> {
    config: BackendConfig,
    session: S,
    http: H,
}

impl<S: SessionProvider, H: HttpExecutor> Client<S, H> {
    pub fn new(config: BackendConfig, session: S, http: H) -> Self {
        Client {
            config,
            session,
            http,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    // Party names are traveller names; keep them out of span fields.
    #[tracing::instrument(name = "lynx_rpc.search_by_party_name", skip_all)]
    pub fn search_by_party_name(
        &self,
        party_name: &str,
    ) -> Result<RecordList<FileSearchResult>, ClientError> {
        self.call(&SearchByPartyName { party_name }, file_search::decode)
    }

    #[tracing::instrument(name = "lynx_rpc.search_by_file_reference", skip(self))]
    pub fn search_by_file_reference(
        &self,
        file_reference: &str,
    ) -> Result<RecordList<FileSearchResult>, ClientError> {
        self.call(&SearchByFileReference { file_reference }, file_search::decode)
    }

    #[tracing::instrument(name = "lynx_rpc.retrieve_itinerary", skip(self))]
    pub fn retrieve_itinerary(&self, file_identifier: &str) -> Result<Itinerary, ClientError> {
        self.call(&RetrieveItinerary { file_identifier }, itinerary::decode)
    }

    #[tracing::instrument(name = "lynx_rpc.list_file_documents", skip(self))]
    pub fn list_file_documents(
        &self,
        file_identifier: &str,
    ) -> Result<RecordList<FileDocument>, ClientError> {
        self.call(&ListDocumentsByFile { file_identifier }, documents::decode)
    }

    #[tracing::instrument(name = "lynx_rpc.list_transaction_documents", skip(self))]
    pub fn list_transaction_documents(
        &self,
        file_identifier: &str,
        transaction_identifier: &str,
    ) -> Result<RecordList<FileDocument>, ClientError> {
        self.call(
            &ListDocumentsByTransaction {
                file_identifier,
                transaction_identifier,
            },
            documents::decode,
        )
    }

    #[tracing::instrument(
        name = "lynx_rpc.save_file_document",
        skip_all,
        fields(file_identifier = document.file_identifier)
    )]
    pub fn save_file_document(&self, document: &SaveFileDocument<'_>) -> Result<(), ClientError> {
        self.call(document, ack::decode_save_response)
    }

    #[tracing::instrument(
        name = "lynx_rpc.save_transaction_document",
        skip_all,
        fields(
            file_identifier = document.file_identifier,
            transaction_identifier = document.transaction_identifier
        )
    )]
    pub fn save_transaction_document(
        &self,
        document: &SaveTransactionDocument<'_>,
    ) -> Result<(), ClientError> {
        self.call(document, ack::decode_save_response)
    }

    fn call<C: Call, T>(
        &self,
        call: &C,
        decode: fn(&str) -> crate::Result<T>,
    ) -> Result<T, ClientError> {
        let request = RpcRequest::new(call, &self.config.host)?;
        let credential = self
            .session
            .credential(&self.config)
            .map_err(ClientError::Session)?;
        let body = self
            .http
            .post(&request, &credential)
            .map_err(ClientError::Transport)?;
        tracing::debug!(operation = ?request.operation, bytes = body.len(), "response received");
        Ok(decode(&body)?)
    }
}
