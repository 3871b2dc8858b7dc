//! Tokio runtime construction for the backend worker thread.

use anyhow::Context;

pub fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build backend runtime")
}
