use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tickstats_core::AnalyzerConfig;
use tickstats_data::{CsvSink, LineReader};
use tickstats_engine::StreamDriver;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "tickstats")]
#[command(about = "Streaming per-symbol technical indicators over timestamp,symbol,price,volume trade data")]
#[command(version)]
struct Cli {
    /// Input file, or `-` for stdin
    input: PathBuf,

    /// Emit a simple moving average over N prices
    #[arg(long, value_name = "N")]
    sma: Option<usize>,

    /// Emit an exponential moving average with span N
    #[arg(long, value_name = "N")]
    ema: Option<usize>,

    /// Emit rolling volatility of returns over N returns
    #[arg(long, value_name = "N")]
    vol: Option<usize>,

    /// Emit VWAP, reset per session
    #[arg(long, value_enum)]
    vwap: Option<VwapMode>,

    /// Only process rows for this symbol
    #[arg(long)]
    symbol: Option<String>,

    /// TOML config file; command-line flags take precedence
    #[arg(short, long, env = "TICKSTATS_CONFIG")]
    config: Option<PathBuf>,

    /// Decimal places for prices and indicator values
    #[arg(long)]
    precision: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VwapMode {
    /// Reset at each calendar day (leading `YYYY-MM-DD` of the timestamp)
    Daily,
}

impl Cli {
    /// Load the config file (if any) and layer the command-line flags on top.
    fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::load(path)?,
            None => AnalyzerConfig::default(),
        };

        if let Some(n) = self.sma {
            config.sma_window = n;
            config.output_sma = true;
        }
        if let Some(n) = self.ema {
            config.ema_span = n;
            config.output_ema = true;
        }
        if let Some(n) = self.vol {
            config.vol_window = n;
            config.output_vol = true;
        }
        if let Some(VwapMode::Daily) = self.vwap {
            config.output_vwap = true;
        }
        if let Some(symbol) = &self.symbol {
            config.filter_symbol = Some(symbol.clone());
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Usage errors exit with 1 like every other failure; help and version exit 0.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(1);
        }
        e.exit()
    });

    // Logs go to stderr; stdout carries the data.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    if cli.log_json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    let config = cli.analyzer_config()?;
    let precision = config.precision;
    let mut driver = StreamDriver::new(config)?;

    let mut source = LineReader::open(&cli.input)
        .with_context(|| format!("Failed to open input '{}'", cli.input.display()))?;
    let mut sink = CsvSink::with_precision(io::stdout().lock(), precision);

    let stats = driver.run(&mut source, &mut sink)?;

    tracing::info!(
        lines = stats.total_lines,
        parsed = stats.parsed,
        malformed = stats.malformed,
        filtered = stats.filtered,
        emitted = stats.emitted,
        symbols = stats.symbols,
        "Stream complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tickstats").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_enable_columns() {
        let cli = parse(&["--sma=5", "--vwap=daily", "trades.csv"]);
        let config = cli.analyzer_config().unwrap();
        assert_eq!(config.sma_window, 5);
        assert!(config.output_sma);
        assert!(config.output_vwap);
        assert!(!config.output_ema);
        assert_eq!(config.ema_span, 50);
        assert_eq!(cli.input, PathBuf::from("trades.csv"));
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = parse(&["-"]).analyzer_config().unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_symbol_and_precision() {
        let config = parse(&["--symbol", "AAPL", "--precision", "2", "-"])
            .analyzer_config()
            .unwrap();
        assert_eq!(config.filter_symbol.as_deref(), Some("AAPL"));
        assert_eq!(config.precision, 2);
    }

    #[test]
    fn test_rejects_unknown_vwap_mode() {
        let args = ["tickstats", "--vwap=weekly", "-"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_window() {
        let args = ["tickstats", "--sma=abc", "-"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"sma_window = 10\noutput_sma = true\nvol_window = 7\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--sma", "3", "-"])
            .analyzer_config()
            .unwrap();
        assert_eq!(config.sma_window, 3);
        assert_eq!(config.vol_window, 7);
        assert!(config.output_sma);
        assert!(!config.output_vol);
    }
}
