pub mod commands;
pub mod flows;

/// Route test logs through the env-filtered subscriber when `RUST_LOG`
/// is set. Safe to call from every test; later calls are no-ops.
#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
