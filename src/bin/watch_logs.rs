//! Prints firmware log lines as they arrive over the tether, with an
//! optional local timestamp prefix for correlating against other logs
//! captured on the EOL station.

use std::thread::sleep;
use std::time::Duration;

use argali_tether::{cli::CommonArgs, init_logger, Frame, Session};
use clap::Parser;

#[derive(Parser)]
#[command(name = "argali-watch-logs", about = "Watch firmware log lines over the tether")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Prefix each log line with a local timestamp
    #[arg(long)]
    timestamp: bool,
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();
    let mut port = cli.common.open()?;
    let with_timestamp = cli.timestamp;

    let mut session = Session::new();
    session.register_logline_cb(move |f: &Frame| {
        let decoded = String::from_utf8_lossy(&f.payload);
        if with_timestamp {
            println!("{} {decoded}", chrono::Local::now().format("%c"));
        } else {
            println!("{decoded}");
        }
    });

    loop {
        session.poll(&mut port)?;
        sleep(Duration::from_millis(10));
    }
}
