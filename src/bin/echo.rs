//! Round-trips echo packets against a tethered device, printing
//! firmware log lines as they arrive. Mirrors the reference `echo.py`
//! driver, including its forgiving 3-second self-timeout: if a reply
//! hasn't shown up by then, give up waiting and send another rather
//! than hanging the station forever on a dropped packet.

use std::thread::sleep;
use std::time::{Duration, Instant};

use argali_tether::{cli::CommonArgs, init_logger, Frame, Session};
use clap::Parser;

#[derive(Parser)]
#[command(name = "argali-echo", about = "Echo diagnostic against a tethered device")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

const ECHO_SELF_TIMEOUT: Duration = Duration::from_secs(3);

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();
    let mut port = cli.common.open()?;

    let mut session = Session::new();
    session.register_logline_cb(|f: &Frame| {
        println!("  Log: {}", String::from_utf8_lossy(&f.payload));
    });

    let mut last_echo_sent: Option<Instant> = None;

    loop {
        if !session.pending_input() {
            session.echo(b"hi mom");
            last_echo_sent = Some(Instant::now());
            println!("Sending");
        } else if let Some(sent) = last_echo_sent {
            if sent.elapsed() > ECHO_SELF_TIMEOUT {
                // The device didn't answer in time; stop waiting so the
                // station doesn't stall forever on one dropped reply.
                session.cancel_pending_echo();
                last_echo_sent = None;
            }
        }

        session.poll(&mut port)?;
        sleep(Duration::from_millis(10));
    }
}
