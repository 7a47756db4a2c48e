mod format;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dmmtap_core::{list_ports, open_source, Monitor, SerialConfig};
use log::{info, LevelFilter};

use crate::format::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "dmmtap",
    version,
    about = "Decode the serial stream of a seven-segment multimeter"
)]
struct Args {
    /// Serial device or capture file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Serial line speed
    #[arg(short, long, default_value_t = 2400)]
    baud: u32,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Stop after this many readings
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// List serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if args.list_ports {
        for port in list_ports() {
            println!("{port}");
        }
        return Ok(());
    }

    let config = SerialConfig {
        baud_rate: args.baud,
        ..Default::default()
    };
    let source = open_source(args.input.as_deref(), &config)?;
    info!("decoding from {}", source.describe());

    let mut monitor = Monitor::new(source);
    let stop = monitor.stop_handle();
    let mut stdout = std::io::stdout().lock();
    let mut printed = 0u64;
    let mut write_err = None;

    let stats = monitor.run(|reading| {
        let line = match args.format.render(&reading) {
            Ok(line) => line,
            Err(e) => {
                write_err = Some(anyhow::Error::from(e));
                stop.stop();
                return;
            }
        };
        if let Err(e) = writeln!(stdout, "{line}").and_then(|_| stdout.flush()) {
            // closed pipe, e.g. `dmmtap | head`
            write_err = Some(e.into());
            stop.stop();
            return;
        }
        printed += 1;
        if args.count.is_some_and(|n| printed >= n) {
            stop.stop();
        }
    })?;

    if let Some(e) = write_err {
        return Err(e.context("writing readings"));
    }
    info!("{} readings, {} frames dropped", stats.frames, stats.dropped());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = Args::parse_from([
            "dmmtap",
            "/dev/ttyUSB0",
            "-b",
            "9600",
            "-f",
            "json",
            "-n",
            "5",
            "-vv",
        ]);
        assert_eq!(args.input, Some(PathBuf::from("/dev/ttyUSB0")));
        assert_eq!(args.baud, 9600);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.count, Some(5));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["dmmtap"]);
        assert_eq!(args.input, None);
        assert_eq!(args.baud, 2400);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.list_ports);
    }
}
