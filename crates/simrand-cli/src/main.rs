//! CLI for simrand — deterministic random streams, sampling, and bit-stream
//! diagnostics.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "simrand")]
#[command(about = "simrand — deterministic random streams for statistical simulation")]
#[command(version = simrand_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit raw 64-bit generator words
    Stream {
        /// Number of words to emit
        #[arg(long, default_value = "16")]
        count: u64,

        /// Seed (0 = OS entropy)
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output format
        #[arg(long, default_value = "u64", value_parser = ["u64", "hex", "raw"])]
        format: String,
    },

    /// Unbiased integers from an inclusive range
    Bounded {
        /// Inclusive lower bound
        #[arg(long)]
        min: u64,

        /// Inclusive upper bound
        #[arg(long)]
        max: u64,

        /// Number of draws
        #[arg(long, default_value = "16")]
        count: u64,

        /// Seed (0 = OS entropy)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// 64-bit words whose bits are set with probability n/2^m
    Bias {
        /// Probability numerator n (0 < n < 2^m)
        #[arg(short = 'n', long)]
        numerator: u64,

        /// Probability exponent m (1..=64)
        #[arg(short = 'm', long, default_value = "8")]
        exponent: u32,

        /// Number of words to emit
        #[arg(long, default_value = "16")]
        count: u64,

        /// Seed (0 = OS entropy)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Binomial success counts over k trials at p = n/2^m
    Binomial {
        /// Trials per sample
        #[arg(long)]
        trials: u64,

        /// Probability numerator n (0 < n < 2^m)
        #[arg(short = 'n', long, default_value = "128")]
        numerator: u64,

        /// Probability exponent m (1..=64)
        #[arg(short = 'm', long, default_value = "8")]
        exponent: u32,

        /// Number of samples
        #[arg(long, default_value = "16")]
        count: u64,

        /// Seed (0 = OS entropy)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Run a biased stream through the Von Neumann extractor
    Debias {
        /// Source stream length in bits (even)
        #[arg(long, default_value = "2240")]
        bits: u64,

        /// Destination capacity in bits
        #[arg(long, default_value = "135")]
        capacity: u64,

        /// Bias numerator for the source stream
        #[arg(short = 'n', long, default_value = "32")]
        numerator: u64,

        /// Bias exponent for the source stream
        #[arg(short = 'm', long, default_value = "8")]
        exponent: u32,

        /// Seed (0 = OS entropy)
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Lag autocorrelation profile of a generated stream
    Autocorr {
        /// Stream length in bits
        #[arg(long, default_value = "65536")]
        bits: u64,

        /// Highest lag to estimate
        #[arg(long, default_value = "64")]
        max_lag: u64,

        /// Bias numerator for the stream (default: unbiased)
        #[arg(short = 'n', long, default_value = "128")]
        numerator: u64,

        /// Bias exponent for the stream
        #[arg(short = 'm', long, default_value = "8")]
        exponent: u32,

        /// Seed (0 = OS entropy)
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Emit the profile as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stream {
            count,
            seed,
            format,
        } => commands::stream(count, seed, &format),
        Commands::Bounded {
            min,
            max,
            count,
            seed,
        } => commands::bounded(min, max, count, seed),
        Commands::Bias {
            numerator,
            exponent,
            count,
            seed,
        } => commands::bias(numerator, exponent, count, seed),
        Commands::Binomial {
            trials,
            numerator,
            exponent,
            count,
            seed,
        } => commands::binomial(trials, numerator, exponent, count, seed),
        Commands::Debias {
            bits,
            capacity,
            numerator,
            exponent,
            seed,
        } => commands::debias(bits, capacity, numerator, exponent, seed),
        Commands::Autocorr {
            bits,
            max_lag,
            numerator,
            exponent,
            seed,
            json,
        } => commands::autocorr(bits, max_lag, numerator, exponent, seed, json),
    }
}
