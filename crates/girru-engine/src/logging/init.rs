use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// `RUST_LOG` overrides the filter; otherwise the engine logs at `info`
/// with wgpu/naga internals held to `warn`. Idempotent; intended usage is
/// early in `main`, before the window opens.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.parse_filters("info,wgpu_core=warn,wgpu_hal=warn,naga=warn");
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
