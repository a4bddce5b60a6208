//! Log subscriber setup.
//!
//! The subscriber is installed before the configuration is read so that
//! warnings raised while loading it are not lost. The configured level is
//! applied afterwards through a reload handle.

use anyhow::{Context, Result};
use std::io;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Replaces the active filter of an installed subscriber
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// A formatting subscriber writing to `writer`, filtered by a reloadable `filter`
pub fn subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Install the global subscriber on stderr.
///
/// `RUST_LOG` applies from the start; without it everything at `info` and
/// above is shown until [`apply_level`] narrows or widens the filter.
pub fn init() -> FilterHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (subscriber, handle) = subscriber(filter, io::stderr);
    subscriber.init();
    handle
}

/// Switch to the configured level unless `RUST_LOG` is set
pub fn apply_level(handle: &FilterHandle, level: &str) -> Result<()> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(());
    }
    set_level(handle, level)
}

pub fn set_level(handle: &FilterHandle, level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{level}'"))?;
    handle
        .reload(filter)
        .context("Failed to update the log filter")
}
