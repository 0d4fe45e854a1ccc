use chrono::NaiveDate;
use passbook_core::{TransactionRecord, TransactionType};
use passbook_ledger::{
    merge_tables, read_table, source_table_path, write_ledger, write_unified, LedgerBuilder, UNIFIED_FILE_NAME,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn rec(source: &str, day: u32, desc: &str, amount: &str, t: TransactionType) -> TransactionRecord {
    TransactionRecord {
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        description: desc.to_string(),
        amount: amount.parse().unwrap(),
        transaction_type: t,
        source_name: source.to_string(),
    }
}

fn write_source(dir: &Path, source: &str, records: Vec<TransactionRecord>) -> PathBuf {
    let mut b = LedgerBuilder::new(source);
    for r in records {
        b.push(r);
    }
    let path = source_table_path(dir, source);
    write_ledger(&b.build(), &path).unwrap();
    path
}

fn fixture(dir: &Path) -> Vec<PathBuf> {
    // The same charge exported twice into one source's table (overlapping
    // statement periods) and once more as a distinct row in another source.
    let hdfc = write_source(
        dir,
        "hdfc_bank",
        vec![
            rec("hdfc_bank", 1, "SALARY", "50000.0", TransactionType::Credit),
            rec("hdfc_bank", 2, "RENT", "20000.0", TransactionType::Debit),
            rec("hdfc_bank", 2, "RENT", "20000.0", TransactionType::Debit),
        ],
    );
    let amex = write_source(
        dir,
        "amex",
        vec![
            rec("amex", 2, "RENT", "20000.0", TransactionType::Debit),
            rec("amex", 5, "UBER", "245.0", TransactionType::Debit),
        ],
    );
    vec![hdfc, amex, dir.join("never_ran_transactions.csv")]
}

#[test]
fn test_identical_rows_collapse_to_one() {
    let tmp = TempDir::new().unwrap();
    let tables = fixture(tmp.path());

    let merged = merge_tables(&tables).unwrap();
    assert_eq!(merged.tables_read, 3);
    assert_eq!(merged.duplicates_dropped, 1);
    assert_eq!(merged.rows.len(), 4);
    // source_name is part of the row, so the amex RENT survives
    assert_eq!(merged.rows.iter().filter(|r| r[1] == "RENT").count(), 2);
    assert_eq!(merged.rows[0], ["01-03-2024", "SALARY", "50000.00", "CREDIT", "hdfc_bank"]);
}

#[test]
fn test_merge_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let tables = fixture(tmp.path());
    let unified = tmp.path().join(UNIFIED_FILE_NAME);

    write_unified(&merge_tables(&tables).unwrap(), &unified).unwrap();
    let first = fs::read_to_string(&unified).unwrap();

    // feeding the unified ledger back in changes nothing
    let again = merge_tables(&[unified.clone()]).unwrap();
    assert_eq!(again.duplicates_dropped, 0);
    write_unified(&again, &unified).unwrap();
    assert_eq!(fs::read_to_string(&unified).unwrap(), first);

    write_unified(&merge_tables(&tables).unwrap(), &unified).unwrap();
    assert_eq!(fs::read_to_string(&unified).unwrap(), first);
    assert_eq!(read_table(&unified).unwrap().len(), 4);
}

#[test]
fn test_row_set_independent_of_table_order() {
    let tmp = TempDir::new().unwrap();
    let mut tables = fixture(tmp.path());

    let forward: HashSet<_> = merge_tables(&tables).unwrap().rows.into_iter().collect();
    tables.reverse();
    let backward: HashSet<_> = merge_tables(&tables).unwrap().rows.into_iter().collect();
    assert_eq!(forward, backward);
}
