use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "SYMTAB_LOG";

/// Installs a compact stderr logger. An explicit `directives` string wins over
/// the `SYMTAB_LOG` environment variable; with neither, only warnings show.
pub fn register_global_logger(directives: Option<&str>) -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::format()
        .compact()
        .with_target(false)
        .with_thread_ids(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(std::io::stderr);

    let filter_layer = match directives {
        Some(directives) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse(directives)?,
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(LevelFilter::WARN.to_string())),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
