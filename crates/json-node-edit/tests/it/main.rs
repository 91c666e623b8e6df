//! Integration tests for json-node-edit.
//!
//! - edit: node edits driven through pointers and derived shapes
//! - session: store, edit and broadcast together with mounted views

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("json_node_edit=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod edit;
mod session;
