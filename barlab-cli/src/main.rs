//! Barlab CLI — run backtests from the command line.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config plus bar/signal CSVs
//! - `sweep` — grid-search stop/take/fee settings over one dataset
//! - `demo` — end-to-end run on seeded synthetic data

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use barlab_runner::{
    load_bars_csv, load_signals_csv, run_backtest, save_artifacts, synthetic_bars,
    synthetic_signals, BacktestOutcome, ParamGrid, ParamSweep, RunConfig,
};

#[derive(Parser)]
#[command(name = "barlab", about = "Barlab CLI — signal-driven backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config plus bar/signal CSV files.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// CSV with columns timestamp,open,high,low,close,volume.
        #[arg(long)]
        bars: PathBuf,

        /// CSV with a `signal` column aligned 1:1 with the bars.
        #[arg(long)]
        signals: PathBuf,

        /// Output directory for artifacts (trades.csv, equity.csv, outcome.json).
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Skip writing artifacts; print the summary only.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
    /// Grid-search stop/take/fee settings over one dataset.
    Sweep {
        /// Path to a TOML config file used as the base for every grid cell.
        #[arg(long)]
        config: PathBuf,

        /// CSV with columns timestamp,open,high,low,close,volume.
        #[arg(long)]
        bars: PathBuf,

        /// CSV with a `signal` column aligned 1:1 with the bars.
        #[arg(long)]
        signals: PathBuf,

        /// How many of the best configurations to print.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// End-to-end run on seeded synthetic data.
    Demo {
        /// Number of synthetic bars.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// RNG seed; the same seed reproduces the same demo exactly.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            bars,
            signals,
            output_dir,
            no_artifacts,
        } => run_cmd(config, bars, signals, output_dir, no_artifacts),
        Commands::Sweep {
            config,
            bars,
            signals,
            top,
        } => sweep_cmd(config, bars, signals, top),
        Commands::Demo {
            bars,
            seed,
            output_dir,
        } => demo_cmd(bars, seed, output_dir),
    }
}

fn run_cmd(
    config_path: PathBuf,
    bars_path: PathBuf,
    signals_path: PathBuf,
    output_dir: PathBuf,
    no_artifacts: bool,
) -> Result<()> {
    let config = RunConfig::from_file(&config_path)?;
    let bars = load_bars_csv(&bars_path)?;
    let signals = load_signals_csv(&signals_path)?;

    let outcome = run_backtest(&bars, &signals, &config)?;
    print_summary(&outcome);

    if !no_artifacts {
        let run_dir = save_artifacts(&outcome, &output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn sweep_cmd(
    config_path: PathBuf,
    bars_path: PathBuf,
    signals_path: PathBuf,
    top: usize,
) -> Result<()> {
    let base = RunConfig::from_file(&config_path)?;
    let bars = load_bars_csv(&bars_path)?;
    let signals = load_signals_csv(&signals_path)?;

    let grid = ParamGrid::default_risk_grid();
    println!("Sweeping {} configurations...", grid.size());

    let results = ParamSweep::new().sweep(&bars, &signals, &grid, &base)?;

    println!();
    println!(
        "{:<8} {:<8} {:<10} {:>14} {:>10} {:>8}",
        "Stop", "Take", "Fee", "Final Equity", "Max DD", "Trades"
    );
    println!("{}", "-".repeat(64));
    for outcome in results.sorted_by_final_equity().into_iter().take(top) {
        println!(
            "{:<8.3} {:<8.3} {:<10.5} {:>14.2} {:>9.2}% {:>8}",
            outcome.config.stop_fraction,
            outcome.config.take_fraction,
            outcome.config.fee_rate,
            outcome.report.final_equity,
            outcome.report.max_drawdown * 100.0,
            outcome.report.trade_count,
        );
    }

    Ok(())
}

fn demo_cmd(bar_count: usize, seed: u64, output_dir: PathBuf) -> Result<()> {
    let bars = synthetic_bars(bar_count, 100.0, seed);
    let signals = synthetic_signals(bar_count, 20, seed.wrapping_add(1));
    let config = RunConfig {
        initial_capital: 100_000.0,
        stop_fraction: 0.03,
        take_fraction: 0.06,
        fee_rate: 0.001,
        tax_rate: 0.003,
        allow_short: true,
    };

    println!("Demo: {bar_count} synthetic bars, seed {seed}");
    let outcome = run_backtest(&bars, &signals, &config)?;
    print_summary(&outcome);

    let run_dir = save_artifacts(&outcome, &output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn print_summary(outcome: &BacktestOutcome) {
    let report = &outcome.report;
    println!();
    println!("=== Backtest Result ===");
    println!("Bars:           {}", report.bar_count);
    println!("Trades:         {}", report.trade_count);
    println!();
    println!("--- Performance ---");
    println!("Initial:        {:.2}", report.initial_capital);
    println!("Final Equity:   {:.2}", report.final_equity);
    println!("Total Return:   {:.2}%", report.total_return * 100.0);
    println!("Max Drawdown:   {:.2}%", report.max_drawdown * 100.0);
    println!("Win Rate:       {:.1}%", report.win_rate * 100.0);
    println!("Profit Factor:  {:.2}", report.profit_factor);
    println!();
    println!("--- By Direction ---");
    println!(
        "Long:  {} trade(s), pnl {:.2}, win rate {:.1}%",
        report.long_trades.count,
        report.long_trades.total_pnl,
        report.long_trades.win_rate * 100.0
    );
    println!(
        "Short: {} trade(s), pnl {:.2}, win rate {:.1}%",
        report.short_trades.count,
        report.short_trades.total_pnl,
        report.short_trades.win_rate * 100.0
    );
    for warn in &report.warnings {
        println!("WARNING: {warn}");
    }
    println!("Run hash:       {}", &report.run_hash[..12]);
    println!();
}
