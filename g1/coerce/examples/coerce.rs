use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use g1_coerce::{IntHolder, Signed, Value};

#[derive(Debug, Parser)]
struct Cli {
    #[arg(long, short = 'v', action = ArgAction::Count, help = "Make tracing output more verbose")]
    verbose: u8,
    #[arg(long, action = ArgAction::Count, help = "Make tracing output less verbose")]
    silent: u8,

    #[arg(long, value_enum, default_value_t = Width::I64)]
    width: Width,

    #[arg(long, help = "Parse each value as a JSON document rather than an integer literal")]
    json: bool,

    values: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Width {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
}

impl Cli {
    fn init_tracing(&self) {
        let level = match i16::from(self.verbose) - i16::from(self.silent) {
            ..=-3 => LevelFilter::OFF,
            -2 => LevelFilter::ERROR,
            -1 => LevelFilter::WARN,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2.. => LevelFilter::TRACE,
        };
        tracing_subscriber::fmt()
            .compact()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(level.into())
                    .from_env_lossy(),
            )
            .init();
    }

    fn run(&self) -> bool {
        match self.width {
            Width::I8 => self.run_with::<i8>(),
            Width::I16 => self.run_with::<i16>(),
            Width::I32 => self.run_with::<i32>(),
            Width::I64 => self.run_with::<i64>(),
            Width::I128 => self.run_with::<i128>(),
            Width::Isize => self.run_with::<isize>(),
        }
    }

    fn run_with<T>(&self) -> bool
    where
        T: Signed + Default,
    {
        let mut ok = true;
        for value in &self.values {
            let result = if self.json {
                serde_json::from_str::<serde_json::Value>(value)
                    .map_err(|error| error.to_string())
                    .and_then(|json| convert::<T>(&json))
            } else {
                let mut holder = IntHolder::<T>::default();
                holder
                    .set(value)
                    .map(|()| holder.to_string())
                    .map_err(|error| error.to_string())
            };
            match result {
                Ok(output) => println!("{value} -> {output}"),
                Err(error) => {
                    eprintln!("{value}: {error}");
                    ok = false;
                }
            }
        }
        ok
    }
}

fn convert<T>(value: &dyn Value) -> Result<String, String>
where
    T: Signed,
{
    g1_coerce::int::<T>(value)
        .map(|output| output.to_string())
        .map_err(|error| error.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_tracing();
    if cli.run() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
