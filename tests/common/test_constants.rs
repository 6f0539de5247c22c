//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Default bucket used for the storage round trip when no override is provided.
#[allow(dead_code, reason = "not every integration test exercises storage")]
pub const TEST_BUCKET: &str = "stratus-roundtrip-demo";

/// Default object key the round-trip payload is written under.
#[allow(dead_code, reason = "not every integration test exercises storage")]
pub const TEST_KEY: &str = "test.txt";

/// Default payload uploaded during the round trip.
#[allow(dead_code, reason = "not every integration test exercises storage")]
pub const TEST_PAYLOAD: &[u8] = b"hello world!";

/// Default instance size class used when no override is provided.
#[allow(dead_code, reason = "not every integration test exercises provisioning")]
pub const DEFAULT_INSTANCE_TYPE: &str = "t2.micro";
