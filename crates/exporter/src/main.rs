use config::{Args, ExporterConfig};
use polkadot_block_exporter::export::BlockRangeExporter;
use polkadot_block_exporter::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_or_exit();
    args.load_env_file();

    let config = ExporterConfig::from_env()?;
    logging::init(&config.log)?;

    // Range validation happens before the connection is opened.
    let range = match args.block_range() {
        Ok(range) => range,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Usage: export <startBlock> <endBlock>");
            std::process::exit(1);
        }
    };

    tracing::info!("Log level: {}", config.log.level);
    tracing::info!("Substrate URL: {}", config.substrate.url);

    let exporter = BlockRangeExporter::new(config);
    let summary = exporter.run(*range.start(), *range.end()).await?;

    tracing::info!(
        "Saved {} blocks to {}",
        summary.count,
        summary.path.display()
    );

    Ok(())
}
