// Record stream builders shared by the integration suites
#![allow(dead_code)]

use stdfscope::record::{RawRecord, RecordKind};

/// Encoded PTR with `test_num` and `result`
pub fn ptr_record(test_num: u32, result: f32) -> Vec<u8> {
    let mut payload = test_num.to_le_bytes().to_vec();
    payload.extend_from_slice(&result.to_le_bytes());
    RawRecord::encode(RecordKind::ParametricTest, &payload).expect("PTR payload fits")
}

/// Encoded MIR with the two header timestamps
pub fn mir_record(setup_time: u32, start_time: u32) -> Vec<u8> {
    let mut payload = setup_time.to_le_bytes().to_vec();
    payload.extend_from_slice(&start_time.to_le_bytes());
    RawRecord::encode(RecordKind::MasterInfo, &payload).expect("MIR payload fits")
}

/// Encoded record of any kind
pub fn raw_record(kind: RecordKind, payload: &[u8]) -> Vec<u8> {
    RawRecord::encode(kind, payload).expect("payload fits")
}

/// Stream of PTRs for `(test_num, result)` pairs
pub fn ptr_stream(results: &[(u32, f32)]) -> Vec<u8> {
    results
        .iter()
        .flat_map(|&(test_num, result)| ptr_record(test_num, result))
        .collect()
}

/// Write `bytes` to a fresh file in `dir`
pub fn write_fixture(dir: &std::path::Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("fixture written");
    path
}
