//! Logging setup utilities for the Huddle binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logs are shown at the default level.
const WORKSPACE_CRATES: [&str; 3] = ["huddle_shared", "huddle_server", "huddle_client"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every workspace crate, `tower_http` and the binary itself log at
/// `default_log_level`.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    WORKSPACE_CRATES
        .iter()
        .copied()
        .chain(["tower_http", binary_name])
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "huddle-server", "huddle-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use huddle_shared::logger::setup_logger;
///
/// setup_logger("huddle-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_and_binary() {
        // テスト項目: デフォルトのフィルタにワークスペースの全 crate とバイナリが含まれる
        // given (前提条件):
        let binary_name = "huddle-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert_eq!(
            filter,
            "huddle_shared=info,huddle_server=info,huddle_client=info,tower_http=info,huddle_server=info"
        );
    }
}
