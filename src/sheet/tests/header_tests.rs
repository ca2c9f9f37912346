//! Header row detection tests

use super::{sheet_config, text_row};
use crate::error::ExportError;
use crate::models::{GridBlock, LogicalType};
use crate::sheet::header::{concat_blocks, is_header_row, locate_header_and_rows};

#[test]
fn test_first_matching_row_is_header() {
    let config = sheet_config("Users", &[("id", LogicalType::Number), ("name", LogicalType::String)]);
    let rows = vec![
        text_row(&["User list", ""]),
        text_row(&[]),
        text_row(&["", "id", "name"]),
        text_row(&["", "1", "alice"]),
        text_row(&["", "2", "bob"]),
    ];

    let located = locate_header_and_rows(rows, &config).unwrap();

    assert_eq!(located.header, vec!["", "id", "name"]);
    assert_eq!(located.rows.len(), 2);
    assert_eq!(located.rows[0][2].display(), "alice");
}

#[test]
fn test_one_matching_name_is_enough() {
    let config = sheet_config("S", &[("id", LogicalType::Number), ("missing", LogicalType::String)]);
    assert!(is_header_row(&text_row(&["x", "id"]), &config));
    assert!(!is_header_row(&text_row(&["ID", "identifier"]), &config));
}

#[test]
fn test_later_rows_matching_column_names_are_data() {
    let config = sheet_config("S", &[("name", LogicalType::String)]);
    let rows = vec![
        text_row(&["name"]),
        text_row(&["name"]),
        text_row(&["carol"]),
    ];

    let located = locate_header_and_rows(rows, &config).unwrap();
    assert_eq!(located.rows.len(), 2);
    assert_eq!(located.rows[0][0].display(), "name");
}

#[test]
fn test_missing_header_is_fatal() {
    let config = sheet_config("Orders", &[("sku", LogicalType::String)]);
    let rows = vec![text_row(&["a", "b"]), text_row(&["1", "2"])];

    match locate_header_and_rows(rows, &config) {
        Err(ExportError::ColumnsNotFound { name }) => assert_eq!(name, "Orders"),
        other => panic!("Expected ColumnsNotFound, got {:?}", other.map(|r| r.header)),
    }
}

#[test]
fn test_empty_sheet_has_no_header() {
    let config = sheet_config("Empty", &[("sku", LogicalType::String)]);
    assert!(locate_header_and_rows(Vec::new(), &config).is_err());
}

#[test]
fn test_blocks_concatenate_by_start_row() {
    let blocks = vec![
        GridBlock {
            start_row: 2,
            rows: vec![text_row(&["c"]), text_row(&["d"])],
        },
        GridBlock {
            start_row: 0,
            rows: vec![text_row(&["a"]), text_row(&["b"])],
        },
    ];

    let rows = concat_blocks(blocks);
    let firsts: Vec<&str> = rows.iter().map(|row| row[0].display()).collect();
    assert_eq!(firsts, vec!["a", "b", "c", "d"]);
}
