use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Verbose output also shows the HTTP client's request traces.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "listing_form=debug,reqwest=debug,info"
    } else {
        "listing_form=info,reqwest=warn,warn"
    }
}

/// `RUST_LOG` wins over the built-in directives.
fn env_or_default(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_or_default(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// One JSON object per line, with targets so transport and form events can be told apart.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_or_default(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
