//! Logger installation behind the `log` facade.
//!
//! In the browser records go to the devtools console through `console_log`.
//! Native builds (tests) log to stderr through `env_logger`.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) -> bool {
    match level.to_level() {
        Some(level) => console_log::init_with_level(level).is_ok(),
        None => false,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) -> bool {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .is_test(cfg!(test))
        .try_init()
        .is_ok()
}

/// Install the logger. Calling it twice only updates the level.
pub fn init(level: LevelFilter) {
    if !install(level) {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(LevelFilter::Debug);
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(log::log_enabled!(log::Level::Error));
    }
}
