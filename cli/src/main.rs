use std::fmt::Display;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::Parser;
use itertools::Itertools;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use wabi_window::{Median, Sample, TotalF64, sliding_medians};

const DEMO_VALUES: [i64; 8] = [1, 3, -1, -3, 5, 3, 6, 7];
const DEMO_WINDOW: usize = 3;

fn main() -> ExitCode {
    init_logger();

    match App::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    // stdout carries only medians.
    tracing_subscriber::fmt()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_target(true)
        .compact()
        .try_init()
        .ok();
}

/// Print the median of every sliding window over a stream of numbers
#[derive(Parser)]
#[clap(name = "wabi-window", version)]
struct App {
    /// number of values in each window
    #[clap(short = 'k', long, env = "WABI_WINDOW_SIZE", required_unless_present_any = ["demo", "header"])]
    window: Option<usize>,

    /// file with whitespace-separated numbers (reads stdin if omitted)
    #[clap(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// parse values as floating point numbers instead of integers
    #[clap(long)]
    float: bool,

    /// the input starts with `n k` followed by `n` numbers
    #[clap(long, conflicts_with = "demo")]
    header: bool,

    /// print one median per line instead of one line in total
    #[clap(long)]
    lines: bool,

    /// run on a built-in sample and show the input alongside the medians
    #[clap(long)]
    demo: bool,
}

impl App {
    fn run(self) -> Result<()> {
        if self.demo {
            return self.run_demo();
        }

        let text = self.read_input()?;
        let output = if self.float {
            render(&self.compute::<TotalF64>(&text)?, self.lines)
        } else {
            render(&self.compute::<i64>(&text)?, self.lines)
        };

        if !output.is_empty() {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{output}")?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn run_demo(&self) -> Result<()> {
        let report = demo_report(self.lines)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{report}")?;
        stdout.flush()?;
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display())),
            None => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
                Ok(text)
            }
        }
    }

    fn compute<T>(&self, text: &str) -> Result<Vec<Median<T>>>
    where
        T: Sample + FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let mut tokens = text.split_whitespace();

        let (window, announced) = if self.header {
            let count: usize = parse_header(tokens.next(), "value count")?;
            let window: usize = parse_header(tokens.next(), "window size")?;
            (self.window.unwrap_or(window), Some(count))
        } else {
            (self.window.context("window size is required")?, None)
        };

        let values = tokens
            .enumerate()
            .map(|(i, token)| {
                token
                    .parse::<T>()
                    .with_context(|| format!("invalid number `{token}` at position {}", i + 1))
            })
            .collect::<Result<Vec<T>>>()?;

        if let Some(count) = announced
            && count != values.len()
        {
            bail!("header announced {count} values, found {}", values.len());
        }

        tracing::info!(values = values.len(), window, "computing sliding medians");
        let medians = sliding_medians(values, window).context("failed to compute medians")?;
        tracing::debug!(medians = medians.len(), "done");
        Ok(medians)
    }
}

fn parse_header<T>(token: Option<&str>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let token = token.with_context(|| format!("missing {what} in header"))?;
    token.parse().with_context(|| format!("invalid {what} `{token}` in header"))
}

fn demo_report(lines: bool) -> Result<String> {
    let medians = sliding_medians(DEMO_VALUES, DEMO_WINDOW)?;
    Ok(format!(
        "Sliding Window Median - Demo\nInput: {}\nWindow size k = {DEMO_WINDOW}\nMedians: {}",
        DEMO_VALUES.iter().join(" "),
        render(&medians, lines),
    ))
}

fn render<T: Display>(medians: &[Median<T>], lines: bool) -> String {
    medians.iter().join(if lines { "\n" } else { " " })
}
