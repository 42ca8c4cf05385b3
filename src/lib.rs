//! # lynx-rpc
//!
//! Request encoder and response decoder for the GWT-RPC wire format spoken by
//! the Lynx reservations backend.
//!
//! ## Overview
//!
//! Requests are pipe-delimited text built from fixed templates captured from
//! the backend's own web client; only the host and the call arguments vary.
//! Responses are a prefix (`//OK` or `//EX`) followed by one array literal whose
//! tail holds a shared string table. Record fields are either one-based indices
//! into that table or string literals stored inline.
//!
//! ## Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`request`] | operation catalogue, templates, serde-driven argument slots |
//! | [`de`] | array literal text to [`WireValue`]s |
//! | [`envelope`] | `//OK` validation, string table, root and list header |
//! | [`records`] | typed records: file search, itinerary, documents, acks |
//! | [`fault`] | `//EX` message extraction |
//! | [`client`] | one method per operation over injected collaborators |
//!
//! ## Example
//!
//! ```rust
//! use lynx_rpc::records::file_search;
//! use lynx_rpc::request::encode_search_by_party_name;
//!
//! let body = encode_search_by_party_name("www.lynx-reservations.com", "SMITH").unwrap();
//! assert!(body.contains("|SMITH|PARTY_NAME|"));
//!
//! let raw = r#"//OK[0,1,["java.util.ArrayList/4159755760"],0,7]"#;
//! let found = file_search::decode(raw).unwrap();
//! assert_eq!(found.count, 0);
//! ```

pub mod client;
pub mod config;
pub mod de;
pub mod envelope;
pub mod error;
pub mod escape;
pub mod fault;
pub mod records;
pub mod request;
pub mod ser;
pub mod tags;
pub mod value;

pub use de::tokenize;
pub use envelope::{Envelope, Status};
pub use error::{Error, Result};
pub use escape::unescape;
pub use fault::decode_error;
pub use records::RecordList;
pub use request::{Operation, RpcRequest};
pub use value::{StringTable, WireValue};
