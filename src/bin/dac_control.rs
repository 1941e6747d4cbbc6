//! Configures, starts, or stops the tethered device's DAC playback.
//! At least one of `--start`, `--stop`, `--configure` must be given.

use std::process::exit;
use std::thread::sleep;
use std::time::Duration;

use argali_tether::{cli::CommonArgs, init_logger, Frame, Session};
use clap::Parser;

#[derive(Parser)]
#[command(name = "argali-dac-control", about = "Configure or drive the tethered DAC")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Start the DAC
    #[arg(long)]
    start: bool,

    /// Stop the DAC
    #[arg(long)]
    stop: bool,

    /// Configure the DAC before starting it
    #[arg(long)]
    configure: bool,

    #[arg(long, default_value_t = 0)]
    prescaler: u16,
    #[arg(long, default_value_t = 0)]
    period: u32,
    #[arg(long, default_value_t = 0)]
    scale: u8,
    #[arg(long, default_value_t = 0)]
    points_per_wave: u16,
    #[arg(long, default_value_t = 1)]
    num_waves: u8,
    #[arg(long, default_value_t = 0)]
    theta0: u8,
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    if !(cli.start || cli.stop || cli.configure) {
        eprintln!("Need one of --start, --stop, or --configure (with its args)");
        exit(1);
    }

    let mut port = cli.common.open()?;
    let mut session = Session::new();
    session.register_logline_cb(|f: &Frame| {
        println!("  Log: {}", String::from_utf8_lossy(&f.payload));
    });

    if cli.stop {
        session.dac_stop_req();
        session.poll(&mut port)?;
    }
    if cli.configure {
        session.dac_config_req(
            cli.prescaler,
            cli.period,
            cli.scale,
            cli.points_per_wave,
            cli.num_waves,
            cli.theta0,
        );
        session.poll(&mut port)?;
    }
    if cli.start {
        session.dac_start_req();
        session.poll(&mut port)?;
    }

    sleep(Duration::from_secs(1));
    Ok(())
}
