//! PocxVanity CLI
//!
//! Vanity address generator for PoCX native SegWit wallets.

use std::io::Write;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use pocxvanity_core::{
    add_checksum, calculate_difficulty, estimate_time_50pct, format_difficulty, format_duration,
    validate_pattern, verify_checksum, CancellationToken, Candidate, GeneratedAddress, Network,
    PocxProvider, SearchConfig, SearchError, SearchPattern, SearchResult, VanitySearch,
    WalletDescriptors,
};
use serde::Serialize;
use tracing::warn;

#[derive(Parser)]
#[command(name = "pocxvanity")]
#[command(author = "PocxVanity Team")]
#[command(version = "0.1.0")]
#[command(about = "Vanity address generator for PoCX wallets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a wallet whose first receiving address starts with a pattern
    Generate {
        /// Bech32 characters to match right after `pocx1q`
        #[arg(short, long)]
        pattern: String,

        /// Use testnet (`tpocx1q...`) addresses
        #[arg(long)]
        testnet: bool,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Maximum attempts (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_attempts: u64,

        /// Maximum time in seconds (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_time: u64,

        /// Progress refresh interval in milliseconds
        #[arg(long, default_value = "250")]
        progress_ms: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also print importable output descriptors
        #[arg(long)]
        descriptors: bool,
    },

    /// Append or verify a descriptor checksum
    Checksum {
        /// Descriptor, optionally with `#checksum`
        descriptor: String,
    },

    /// Check a pattern and show its difficulty
    Validate {
        pattern: String,
    },

    /// Run benchmark
    Benchmark {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Use testnet addresses
        #[arg(long)]
        testnet: bool,
    },
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,
    wallet: &'a GeneratedAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptors: Option<&'a WalletDescriptors>,
}

fn main() -> Result<()> {
    // Logs go to stderr so results on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            pattern,
            testnet,
            threads,
            max_attempts,
            max_time,
            progress_ms,
            json,
            descriptors,
        } => {
            let config = SearchConfig {
                threads,
                max_attempts,
                max_time_secs: max_time,
                progress_interval_ms: progress_ms,
            };
            cmd_generate(&pattern, network_of(testnet), config, json, descriptors)?;
        }
        Commands::Checksum { descriptor } => {
            cmd_checksum(&descriptor)?;
        }
        Commands::Validate { pattern } => {
            cmd_validate(&pattern);
        }
        Commands::Benchmark {
            duration,
            threads,
            testnet,
        } => {
            cmd_benchmark(duration, threads, network_of(testnet))?;
        }
    }

    Ok(())
}

fn network_of(testnet: bool) -> Network {
    if testnet {
        Network::Test
    } else {
        Network::Main
    }
}

/// Cancel `token` on Ctrl-C
fn install_interrupt(token: &CancellationToken) {
    let token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\n[!] Stopping...");
        token.cancel();
    }) {
        warn!(error = %e, "Could not install Ctrl-C handler");
    }
}

fn cmd_generate(
    pattern: &str,
    network: Network,
    config: SearchConfig,
    json_output: bool,
    with_descriptors: bool,
) -> Result<()> {
    let search = VanitySearch::new(PocxProvider, pattern, network, config)?;
    let difficulty = search.difficulty();

    if !json_output {
        eprintln!("PocxVanity v0.1.0");
        eprintln!("Network:    {}", network);
        eprintln!("Pattern:    {}{}", network.address_prefix(), search.pattern());
        eprintln!("Threads:    {}", search.threads());
        eprintln!("Difficulty: {}", format_difficulty(difficulty));
        eprintln!();
    }

    let cancel = CancellationToken::new();
    install_interrupt(&cancel);

    let result = search.run(&cancel, |progress| {
        if !json_output {
            eprint!("\r{}", progress.format(difficulty));
            let _ = std::io::stderr().flush();
        }
    });
    if !json_output {
        eprintln!();
    }

    let result = match result {
        Ok(result) => result,
        Err(SearchError::Cancelled) => {
            eprintln!("Search cancelled.");
            return Ok(());
        }
        Err(SearchError::LimitReached { attempts }) => {
            if json_output {
                let output = serde_json::json!({
                    "error": "No match found within limits",
                    "attempts": attempts,
                });
                println!("{}", output);
            } else {
                eprintln!("No match found within limits ({} attempts).", attempts);
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let candidate = Candidate::from_phrase(&result.mnemonic)?;
    let wallet = PocxProvider.generate_from_candidate(&candidate, network)?;
    let descriptors = if with_descriptors {
        Some(WalletDescriptors::from_candidate(&candidate, network)?)
    } else {
        None
    };

    if json_output {
        let output = GenerateOutput {
            result: &result,
            wallet: &wallet,
            descriptors: descriptors.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_result(&result, &wallet, descriptors.as_ref());
    }

    Ok(())
}

fn cmd_checksum(descriptor: &str) -> Result<()> {
    if descriptor.contains('#') {
        if !verify_checksum(descriptor) {
            bail!("Invalid descriptor checksum: {}", descriptor);
        }
        println!("Checksum OK");
    } else {
        println!("{}", add_checksum(descriptor));
    }
    Ok(())
}

fn cmd_validate(pattern: &str) {
    if !validate_pattern(pattern) {
        println!("Invalid: `{}` contains characters outside the bech32 alphabet", pattern);
        println!("Allowed: qpzry9x8gf2tvdw0s3jn54khce6mua7l (case-insensitive)");
        return;
    }

    match SearchPattern::new(pattern) {
        Ok(pattern) => {
            let difficulty = calculate_difficulty(pattern.len());
            println!("Valid:      {}", pattern);
            println!("Difficulty: {}", format_difficulty(difficulty));
        }
        Err(e) => println!("Invalid: {}", e),
    }
}

fn cmd_benchmark(duration_secs: u64, threads: usize, network: Network) -> Result<()> {
    eprintln!("Benchmarking {} wallet generation for {} seconds...", network, duration_secs);
    eprintln!("Threads: {}", if threads == 0 { num_cpus::get() } else { threads });
    eprintln!();

    // Long enough that it will not match before the time limit
    let config = SearchConfig {
        threads,
        max_time_secs: duration_secs.max(1),
        ..Default::default()
    };
    let search = VanitySearch::new(PocxProvider, "qqqqqqqqqqqqqqqqqqqq", network, config)?;

    let cancel = CancellationToken::new();
    install_interrupt(&cancel);

    let start = Instant::now();
    let attempts = match search.run(&cancel, |_| {}) {
        Err(SearchError::LimitReached { attempts }) => attempts,
        Ok(result) => result.attempts,
        Err(SearchError::Cancelled) => {
            eprintln!("Benchmark cancelled.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let elapsed = start.elapsed().as_secs_f64();
    let rate = attempts as f64 / elapsed.max(f64::EPSILON);

    println!("Wallets:  {}", attempts);
    println!("Time:     {:.2}s", elapsed);
    println!("Speed:    {:.2} wallets/s", rate);

    for len in [4usize, 6, 8] {
        let difficulty = calculate_difficulty(len);
        println!(
            "  {} chars: 50% chance in {}",
            len,
            format_duration(estimate_time_50pct(difficulty, rate))
        );
    }

    Ok(())
}

fn print_result(
    result: &SearchResult,
    wallet: &GeneratedAddress,
    descriptors: Option<&WalletDescriptors>,
) {
    println!();
    println!("MATCH FOUND!");
    println!("{:-<60}", "");
    println!("Address:     {}", result.address);
    println!("Mnemonic:    {}", result.mnemonic);
    println!("Private Key: {}", wallet.private_key_wif);
    println!("Public Key:  {}", wallet.public_key_hex);
    println!("Path:        {}", wallet.derivation_path);
    println!("{:-<60}", "");
    println!("Keys Tested: {}", result.attempts);
    println!("Time:        {:.2}s", result.elapsed_secs);
    println!("Speed:       {:.2} key/s", result.keys_per_second);

    if let Some(descriptors) = descriptors {
        println!("{:-<60}", "");
        println!("Receive:     {}", descriptors.receive);
        println!("Change:      {}", descriptors.change);
        println!("Primary:     {}", descriptors.primary);
    }
}
