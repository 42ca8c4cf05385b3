//! Backend type qualifiers found in the string table.
//!
//! Table entries look like `java.util.ArrayList/4159755760`: a class name
//! followed by a serialization signature. Only the class name is matched, so a
//! signature change on the backend does not break record detection.

/// A class-name prefix identifying a serialized type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag(&'static str);

impl TypeTag {
    pub const fn name(&self) -> &'static str {
        self.0
    }

    /// True when a table entry carries this tag.
    pub fn matches(&self, entry: &str) -> bool {
        entry.starts_with(self.0)
    }
}

pub const ARRAY_LIST: TypeTag = TypeTag("java.util.ArrayList");
pub const BIG_DECIMAL: TypeTag = TypeTag("java.math.BigDecimal");
pub const SQL_DATE: TypeTag = TypeTag("java.sql.Date");
pub const DOUBLE: TypeTag = TypeTag("java.lang.Double");
pub const LONG: TypeTag = TypeTag("java.lang.Long");
pub const STRING: TypeTag = TypeTag("java.lang.String");

pub const FILE_SEARCH_RESULTS: TypeTag =
    TypeTag("com.lynxtraveltech.client.shared.model.FileSearchResults");
pub const FILE_SUMMARY: TypeTag = TypeTag("com.lynxtraveltech.client.shared.model.FileSummary");
pub const TRANSACTION_SUMMARY: TypeTag =
    TypeTag("com.lynxtraveltech.client.shared.model.TransactionSummary");
pub const DOCUMENT_DETAILS: TypeTag =
    TypeTag("com.lynxtraveltech.common.gui.shared.model.DocumentDetails");

/// Boxed wrappers: the payload position after one of these holds the boxed
/// value itself and carries no record field.
pub const WRAPPERS: [TypeTag; 5] = [BIG_DECIMAL, SQL_DATE, DOUBLE, LONG, STRING];

pub fn is_wrapper(entry: &str) -> bool {
    WRAPPERS.iter().any(|tag| tag.matches(entry))
}
