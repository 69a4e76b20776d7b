use chrono::{DateTime, TimeZone, Utc};
use folio_core::types::Name;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

pub fn name(s: &str) -> Name {
    Name::try_new(s.to_string()).unwrap()
}
