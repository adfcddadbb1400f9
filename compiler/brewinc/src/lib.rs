//! Brewin command-line runner.
//!
//! Library half of the `brewin` binary: loading source files, running
//! them through the lexer and interpreter, and reporting failures.
//!
//! # Tracing
//!
//! - `RUST_LOG=brewin_eval=debug`: calls, returns, and program lifecycle
//! - `RUST_LOG=brewin_eval=trace`: every dispatched statement
//! - `BREWIN_LOG_TREE=1`: render spans as an indented tree

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var("BREWIN_LOG_TREE").is_ok_and(|v| v == "1");
        // The tree layer writes to stderr by default.
        let tree_layer =
            tree.then(|| tracing_tree::HierarchicalLayer::new(2).with_targets(true));
        let fmt_layer = (!tree).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
        });
        tracing_subscriber::registry()
            .with(tree_layer)
            .with(fmt_layer)
            .with(EnvFilter::from_default_env())
            .init();
    });
}
