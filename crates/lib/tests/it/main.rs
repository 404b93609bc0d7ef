/*! Integration tests for Threadline.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - reducer: Tests for the root reducer and its slice reducers
 * - store: Tests for dispatch, observers and re-entrancy
 * - wire: Tests for decoding and replaying JSON actions
 * - config: Tests for loading and validating seed files
 * - properties: Invariants checked over generated action sequences
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("threadline=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod config;
mod helpers;
mod wire;
