//! Log output of the validation engine, captured through a fmt subscriber.

use std::io;
use std::sync::{Arc, Mutex};

use card_validator::{MemoryBinLookup, Validator, ValidatorConfig};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

const VISA_16: &str = "4111111111111111";
const VISA_16_FORMATTED: &str = "4111 1111 1111 1111";
const VISA_16_MASKED: &str = "4111********1111";

/// In-memory sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes events on this thread into a fresh buffer until the guard drops.
fn capture() -> (Buffer, DefaultGuard) {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

/// Validator whose lookups always miss, so the enrichment warning fires.
fn validator(mask_sensitive: bool) -> Validator {
    let config = ValidatorConfig::default().with_mask_sensitive(mask_sensitive);
    Validator::with_lookup(config, Arc::new(MemoryBinLookup::new()))
}

#[tokio::test]
async fn test_masked_mode_logs_masked_number_only() {
    let (buffer, _guard) = capture();

    let result = validator(true)
        .validate_card(VISA_16_FORMATTED)
        .await
        .unwrap();
    assert!(result.valid);

    let logs = buffer.contents();
    assert!(logs.contains("card validation completed"), "{logs}");
    assert!(logs.contains(&format!("card_number={VISA_16_MASKED}")), "{logs}");
    assert!(!logs.contains(VISA_16), "{logs}");
    assert!(!logs.contains(VISA_16_FORMATTED), "{logs}");
}

#[tokio::test]
async fn test_unmasked_mode_omits_card_number() {
    let (buffer, _guard) = capture();

    let result = validator(false)
        .validate_card(VISA_16_FORMATTED)
        .await
        .unwrap();
    assert!(result.valid);

    let logs = buffer.contents();
    assert!(logs.contains("card validation completed"), "{logs}");
    assert!(logs.contains("bin=411111"), "{logs}");
    assert!(!logs.contains("card_number"), "{logs}");
    assert!(!logs.contains(VISA_16_MASKED), "{logs}");
    assert!(!logs.contains(VISA_16), "{logs}");
    assert!(!logs.contains(VISA_16_FORMATTED), "{logs}");
}

#[tokio::test]
async fn test_enrichment_failure_is_logged_without_digits() {
    let (buffer, _guard) = capture();

    validator(true).validate_card(VISA_16).await.unwrap();

    let logs = buffer.contents();
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("failed to enrich with BIN information"), "{logs}");
    assert!(logs.contains("lookup_failure=true"), "{logs}");
    assert!(!logs.contains(VISA_16), "{logs}");
}

#[test]
fn test_offline_validation_logs_masked_number() {
    let (buffer, _guard) = capture();

    Validator::offline().validate_card_simple(VISA_16).unwrap();

    let logs = buffer.contents();
    assert!(logs.contains(VISA_16_MASKED), "{logs}");
    assert!(!logs.contains(VISA_16), "{logs}");
}

#[test]
fn test_malformed_bin_key_is_logged_at_warn() {
    let (buffer, _guard) = capture();

    let table = MemoryBinLookup::from_json(
        r#"{"411111": {"scheme": "visa"}, "41x111": {"scheme": "visa"}}"#,
    )
    .unwrap();
    assert_eq!(table.len(), 1);

    let logs = buffer.contents();
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("skipping malformed BIN key"), "{logs}");
    assert!(logs.contains("41x111"), "{logs}");
}
