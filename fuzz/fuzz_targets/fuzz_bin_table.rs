//! Fuzz target for loading BIN tables from JSON.

#![no_main]

use card_validator::enrich::MemoryBinLookup;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(table) = MemoryBinLookup::from_json(data) {
        for bin in ["000000", "411111", "999999", "4111", "abcdef"] {
            let _ = table.get(bin);
        }
    }
});
