fn builder(
    root_module: &str,
    verbose: bool,
) -> env_logger::Builder {
    let level = if verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Debug
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .filter_module("serialmcu_bridge", level)
        .filter_module(root_module, level);
    builder
}

/// Installs the global logger.
///
/// Other crates log from `Info` up. Crate and `root_module` messages are shown from `Debug` up,
/// or everything when `verbose` is set. `RUST_LOG` directives are applied on top.
pub fn configure(
    root_module: &str,
    verbose: bool,
) {
    builder(root_module, verbose).parse_default_env().init();
}
