use pseudocmd::core::config::Config;
use pseudocmd::error::ShellError;
use pseudocmd::flags::Flags;
use pseudocmd::shell::Shell;
use std::env;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(debug: bool) -> Result<(), ShellError> {
    let level = if debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}

fn main() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("PseudoCmd {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(flags.is_set("debug"))?;

    let config = Config::from_flags(&flags);
    tracing::debug!(?config, "starting");

    let mut shell = Shell::new(config)?;
    let code = shell.run()?;
    std::process::exit(code)
}
