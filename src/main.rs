use anyhow::Context;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::debug;
use vecsort::{init_logging, load_config, run, BUILD_DATE, CONFIG_ENV, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    debug!(version = VERSION, build_date = BUILD_DATE, "starting vecsort");

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = load_config(config_path.as_deref())
        .with_context(|| format!("failed to load configuration from {}", CONFIG_ENV))?;

    let input = io::stdin().lock();
    let output = BufWriter::new(io::stdout().lock());
    let diagnostics = io::stderr().lock();

    run(input, output, diagnostics, &config).context("vector job failed")?;

    Ok(())
}
