use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未設定 RUST_LOG 時使用的過濾規則
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "coupon_check=debug,info"
    } else {
        "coupon_check=info"
    }
}

/// Logs go to stderr so stdout only carries verdicts; `json` switches the
/// layer to machine-readable output for `--json` runs.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_follow_verbose_flag() {
        assert_eq!(default_directives(false), "coupon_check=info");
        assert!(default_directives(true).starts_with("coupon_check=debug"));
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }
}
