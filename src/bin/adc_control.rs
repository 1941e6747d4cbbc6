//! Requests an ADC capture from the tethered device and prints the
//! samples as they stream back in.

use std::process::exit;
use std::thread::sleep;
use std::time::Duration;

use argali_tether::{cli::CommonArgs, init_logger, Frame, Session};
use clap::Parser;

#[derive(Parser)]
#[command(name = "argali-adc-control", about = "Capture ADC samples from the tethered device")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Request readings from the ADC
    #[arg(long)]
    request: bool,

    /// Don't print byte offsets, just the hex blob
    #[arg(short = 'q')]
    quiet_offsets: bool,

    #[arg(long, default_value_t = 0)]
    prescaler: u16,
    #[arg(long, default_value_t = 0)]
    period: u32,
    #[arg(long, default_value_t = 1)]
    num_points: u16,
    #[arg(long, default_value_t = 2)]
    sample_width: u8,
    #[arg(long, default_value_t = 0)]
    sample_time: u16,
    /// Comma-separated list of channel numbers, e.g. 0,1,2
    #[arg(long, value_delimiter = ',', default_value = "0")]
    channels: Vec<u8>,
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    if !cli.request {
        eprintln!("Need --request (with its args)");
        exit(1);
    }

    let mut port = cli.common.open()?;
    let quiet_offsets = cli.quiet_offsets;

    let mut session = Session::new();
    session.register_logline_cb(|f: &Frame| {
        println!("  Log: {}", String::from_utf8_lossy(&f.payload));
    });
    session.set_adc_cb(move |buf: &[u8]| {
        for (i, chunk) in buf.chunks(16).enumerate() {
            let prefix = if quiet_offsets {
                String::new()
            } else {
                format!("{:4}: ", i * 16)
            };
            println!("{prefix}{}", hex::encode(chunk));
        }
    });

    session.adc_capture_req(
        cli.prescaler,
        cli.period,
        cli.num_points,
        cli.sample_width,
        cli.sample_time,
        &cli.channels,
    );

    while session.pending_input() {
        session.poll(&mut port)?;
        sleep(Duration::from_millis(10));
    }

    Ok(())
}
