use lynx_rpc::Error;
use lynx_rpc::records::ack::{UploadReceipt, decode_save_response, decode_upload_response};
use lynx_rpc::records::documents;
use lynx_rpc::records::file_search;
use lynx_rpc::records::itinerary::{self, ItineraryEntry};
use serde_json::json;

const ITINERARY_LONG: &str = include_str!("fixtures/itinerary_long.txt");
const ITINERARY_SHORT: &str = include_str!("fixtures/itinerary_short.txt");
const FILE_SEARCH: &str = include_str!("fixtures/file_search.txt");
const DOCUMENTS: &str = include_str!("fixtures/documents.txt");
const INCOMPATIBLE_TYPE: &str = include_str!("fixtures/incompatible_type.txt");

fn entry(
    voucher: &str,
    date: &str,
    transaction: &str,
    supplier: &str,
    status: &str,
    confirmation: &str,
    location: &str,
) -> ItineraryEntry {
    ItineraryEntry {
        voucher_identifier: voucher.to_string(),
        date: date.to_string(),
        transaction_identifier: transaction.to_string(),
        supplier: supplier.to_string(),
        status: status.to_string(),
        confirmation_number: confirmation.to_string(),
        location: location.to_string(),
    }
}

// ── Itinerary ──────────────────────────────────────────────────────────────

#[test]
fn test_itinerary_long_header() {
    let itinerary = itinerary::decode(ITINERARY_LONG).unwrap();
    assert_eq!(itinerary.kind, "Partial");
    assert_eq!(itinerary.party_name, "STIRFRY, Mrs / NOTA B, Lucy Mrs");
    assert_eq!(itinerary.file_reference, "FTSWA230184");
    assert_eq!(itinerary.file_identifier, "$xOpT");
    assert_eq!(itinerary.client_identifier, "7LC");
    assert_eq!(itinerary.agent_reference, "1061848");
    assert_eq!(itinerary.itinerary_count, 10);
}

#[test]
fn test_itinerary_long_entries() {
    let itinerary = itinerary::decode(ITINERARY_LONG).unwrap();
    let alice = "ALICE SPRINGS, NT";
    let perth = "PERTH, WA";
    let crowne = "CROWNE PLAZA ALICE SPRINGS LASSETERS";
    let adventure = "ADVENTURE TOURS AUSTRALIA";
    assert_eq!(
        itinerary.itineraries,
        vec![
            entry("", "02 Oct 2025", "BgFLy", "Own Arrangements", "Confirmed", "", ""),
            entry("16454569-4", "04/05 Oct 2025", "BgBFw", crowne, "Confirmed", "2194C574", alice),
            entry("16454569-3", "05/09 Oct 2025", "Bf$n4", adventure, "Confirmed", "PPA3CC057402/XX124156", alice),
            entry("16454569-5", "09/10 Oct 2025", "BgBFx", crowne, "Confirmed", "223447575", alice),
            entry("16454569-12", "10/13 Oct 2025", "BgExO", "IBIS PERTH", "Confirmed", "1773Z45J9500", perth),
            entry("16454569-16", "13/18 Oct 2025", "BgFGt", "UNTAMED ESCAPES", "Confirmed", "RUE234MPTA", perth),
            entry("16454569-13", "18/19 Oct 2025", "BgExP", "IBIS PERTH", "Confirmed", "1773ZJH546y", perth),
            entry("16454569-7", "19/21 Oct 2025", "BgBFz", "SEALINK ROTTNEST ISLAND", "Confirmed", "2C4WH6XX", perth),
            entry("", "21/25 Oct 2025", "BgIpk", "Own Arrangements", "Confirmed", "", ""),
            entry("16454569-2", "25/31 Oct 2025", "Bfz5A", adventure, "Confirmed", "PPA3XXX503-778", perth),
        ]
    );
}

#[test]
fn test_itinerary_short() {
    let itinerary = itinerary::decode(ITINERARY_SHORT).unwrap();
    assert_eq!(itinerary.kind, "Quote");
    assert_eq!(
        itinerary.party_name,
        "BRAY Claire-Marie Mrs & LAGIRAFE Sophie Mrs QUOTE ONLY"
    );
    assert_eq!(itinerary.file_reference, "FTAUB252039");
    assert_eq!(itinerary.file_identifier, "$2s7");
    assert_eq!(itinerary.client_identifier, "BAkC");
    assert_eq!(itinerary.agent_reference, "25052025");
    assert_eq!(
        itinerary.itineraries,
        vec![
            entry(
                "16476987-1",
                "01/02 Nov 2025",
                "BgsOD",
                "HOLIDAY INN SYDNEY POTTS POINT",
                "On Request",
                "",
                "SYDNEY, NSW"
            ),
            entry(
                "16476987-2",
                "02 Nov 2025",
                "Bg2yK",
                "FITZROY ISLAND RESORT",
                "On Request",
                "",
                "CAIRNS, QLD"
            ),
        ]
    );
}

#[test]
fn test_itinerary_json_field_names() {
    let itinerary = itinerary::decode(ITINERARY_SHORT).unwrap();
    let value = serde_json::to_value(&itinerary).unwrap();
    assert_eq!(value["type"], json!("Quote"));
    assert_eq!(value["itineraryCount"], json!(2));
    assert_eq!(value["fileIdentifier"], json!("$2s7"));
    assert_eq!(value["itineraries"][0]["voucherIdentifier"], json!("16476987-1"));
    assert_eq!(value["itineraries"][1]["confirmationNumber"], json!(""));
}

#[test]
fn test_itinerary_backend_exception() {
    let err = itinerary::decode(INCOMPATIBLE_TYPE).unwrap_err();
    assert!(err.is_backend());
    assert!(matches!(err, Error::Backend(msg) if msg.starts_with("Type 'com.lynxtraveltech")));
}

#[test]
fn test_itinerary_non_string_field_is_shape_error() {
    // Entry position 0 dereferences to a nested array instead of a voucher string.
    let raw = r#"//OK[0,1,1,0,1,'f',0,1,'c',0,0,2,1,["com.lynxtraveltech.client.shared.model.FileSummary/2582189904",[1]],0,7]"#;
    let err = itinerary::decode(raw).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedRecordShape { field: "voucherIdentifier", position: 11, .. }
    ));
}

// ── File search ────────────────────────────────────────────────────────────

#[test]
fn test_file_search_fixture() {
    let list = file_search::decode(FILE_SEARCH).unwrap();
    assert_eq!(list.count, 2);
    assert_eq!(list.results.len(), 2);

    let second = &list.results[1];
    assert_eq!(second.file_identifier, "$2s7");
    assert_eq!(second.file_reference, "FTAUB252039");
    assert_eq!(second.client_identifier, "BAkC");
    assert_eq!(second.client_reference, "");
    assert_eq!(second.party_name, "BRAY Claire-Marie Mrs & LAGIRAFE Sophie Mrs");
    assert_eq!(second.status, "Quote");
    assert_eq!(second.travel_date, "01 Nov 2025");
}

#[test]
fn test_file_search_json_field_names() {
    let list = file_search::decode(FILE_SEARCH).unwrap();
    let value = serde_json::to_value(&list).unwrap();
    assert_eq!(value["count"], json!(2));
    let first = &value["results"][0];
    for key in [
        "companyCode",
        "clientIdentifier",
        "clientReference",
        "currency",
        "fileIdentifier",
        "fileReference",
        "partyName",
        "status",
        "travelDate",
    ] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_file_search_declared_count_kept() {
    // Header declares three results, only one record is present.
    let raw = r#"//OK[9,8,7,0,6,'$x',4,5,'7LC',3,2,3,1,["java.util.ArrayList/4159755760","com.lynxtraveltech.client.shared.model.FileSearchResults/3116215352","PPAC","AUD","TRAVELCO","FTSWA230184","Party","Partial","02 Oct 2025"],0,7]"#;
    let list = file_search::decode(raw).unwrap();
    assert_eq!(list.count, 3);
    assert_eq!(list.results.len(), 1);
    assert_eq!(list.results[0].party_name, "Party");
}

#[test]
fn test_huge_declared_count_does_not_preallocate() {
    let raw = r#"//OK[999999999999,1,["java.util.ArrayList/4159755760"],0,7]"#;

    let found = file_search::decode(raw).unwrap();
    assert_eq!(found.count, 999_999_999_999);
    assert!(found.results.is_empty());

    let docs = documents::decode(raw).unwrap();
    assert_eq!(docs.count, 999_999_999_999);
    assert!(docs.results.is_empty());
}

#[test]
fn test_file_search_truncated_record() {
    // The tag sits too close to the start of the payload for a full record.
    let raw = r#"//OK['$x',4,2,1,1,["java.util.ArrayList/4159755760","com.lynxtraveltech.client.shared.model.FileSearchResults/3116215352","PPAC","AUD"],0,7]"#;
    assert!(matches!(
        file_search::decode(raw),
        Err(Error::UnexpectedRecordShape { .. })
    ));
}

#[test]
fn test_file_search_version_drift() {
    let raw = FILE_SEARCH.replace("],0,7]", "],0,8]");
    let err = file_search::decode(&raw).unwrap_err();
    assert!(matches!(err, Error::BadProtocolVersion { ref found } if found == "8"));
    assert!(err.is_contract_drift());
}

#[test]
fn test_file_search_missing_prefix() {
    assert_eq!(
        file_search::decode(&FILE_SEARCH[4..]),
        Err(Error::MissingOkPrefix)
    );
}

// ── Documents ──────────────────────────────────────────────────────────────

#[test]
fn test_documents_fixture() {
    let list = documents::decode(DOCUMENTS).unwrap();
    assert_eq!(list.count, 2);
    let notes = &list.results[1];
    assert_eq!(notes.document_identifier, "d20250709100000");
    assert_eq!(notes.document_name, "Notes");
    assert_eq!(notes.document_type, "NOTE");
    assert_eq!(notes.transaction_identifier, "Bg2yK");
    assert_eq!(notes.content, "Client prefers 'late' check-in");
    assert_eq!(notes.attachment_url, "");
}

#[test]
fn test_documents_json_field_names() {
    let list = documents::decode(DOCUMENTS).unwrap();
    let value = serde_json::to_value(&list.results[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "fileIdentifier": "$2s7",
            "transactionIdentifier": "BgsOD",
            "documentIdentifier": "d20250708231038",
            "documentName": "Voucher",
            "documentType": "PDF",
            "content": "<p>See attached voucher</p>",
            "attachmentUrl": "/documents/file/f16476987/d20250708231038.pdf",
        })
    );
}

#[test]
fn test_documents_wrong_root() {
    let err = documents::decode(ITINERARY_SHORT).unwrap_err();
    assert!(matches!(err, Error::UnexpectedRoot { expected: "java.util.ArrayList", .. }));
}

// ── Acknowledgements ───────────────────────────────────────────────────────

#[test]
fn test_save_response_backend_message() {
    let err = decode_save_response(INCOMPATIBLE_TYPE).unwrap_err();
    assert!(err.is_backend());
}

#[test]
fn test_upload_receipt_json() {
    let receipt = decode_upload_response("SUCCESS:/documents/file/f1/d2.pdf:\r\n").unwrap();
    assert_eq!(
        receipt,
        UploadReceipt {
            url: "/documents/file/f1/d2.pdf".to_string()
        }
    );
    assert_eq!(
        serde_json::to_value(&receipt).unwrap(),
        json!({ "attachmentUrl": "/documents/file/f1/d2.pdf" })
    );
}
