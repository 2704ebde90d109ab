use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::cmd::{parse_duration, ConnectArgs, WatchArgs};
use crate::exit::{protocol_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_json, OutputFormat};
use crate::session::with_session;

const SLEEP_SLICE: Duration = Duration::from_millis(50);

#[derive(Serialize)]
struct Sample {
    sample: usize,
    current: i16,
    max: i16,
}

pub fn run(args: WatchArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let interval = parse_duration(&args.interval)?;
    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let samples = with_session(connect, |s| {
        let mut taken = 0usize;
        while running.load(Ordering::SeqCst) {
            let temp = s
                .protocol
                .get_temperature(&mut s.channel)
                .map_err(|err| protocol_error("read temperature", err))?;
            print_sample(
                &Sample {
                    sample: taken,
                    current: temp.current,
                    max: temp.max,
                },
                format,
            );
            taken += 1;
            if args.count.is_some_and(|count| taken >= count) {
                break;
            }
            sleep_while(&running, interval);
        }
        Ok(taken)
    })?;

    info!(samples, "watch finished");
    Ok(SUCCESS)
}

fn sleep_while(running: &AtomicBool, interval: Duration) {
    let deadline = Instant::now() + interval;
    while running.load(Ordering::SeqCst) {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return;
        }
        std::thread::sleep(left.min(SLEEP_SLICE));
    }
}

fn print_sample(sample: &Sample, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(sample),
        OutputFormat::Table | OutputFormat::Pretty => println!(
            "#{:<5} temperature {:>4} C  (max {} C)",
            sample.sample, sample.current, sample.max
        ),
        OutputFormat::Raw => println!("{} {}", sample.current, sample.max),
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("failed to install Ctrl-C handler: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_returns_early_when_stopped() {
        let running = AtomicBool::new(false);
        let start = Instant::now();
        sleep_while(&running, Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn sleep_waits_out_the_interval() {
        let running = AtomicBool::new(true);
        let start = Instant::now();
        sleep_while(&running, Duration::from_millis(60));
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
