use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use malprobe::config::Config;
use malprobe::detector::SignatureSet;
use malprobe::error::ProbeError;
use malprobe::output::OutputFormat;
use malprobe::probe::builtin;
use malprobe::EvalOptions;

#[derive(Parser)]
#[command(
    name = "malprobe",
    about = "Red-team probes for malware code generation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score model outputs for the presence of code
    Detect {
        /// Files holding one model output each (stdin when omitted)
        paths: Vec<PathBuf>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the built-in probe variants
    ListProbes {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Print the expanded prompt list of one built-in probe
    Prompts {
        /// Probe name (see list-probes)
        name: String,

        /// Output format (text, json)
        #[arg(long, short = 'f', default_value = "text")]
        format: String,
    },

    /// List the supported language signatures
    ListSignatures {
        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Generate a starter .malprobe.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Detect {
            paths,
            config,
            format,
            output,
        } => cmd_detect(paths, config, format, output),
        Commands::ListProbes { format } => cmd_list_probes(format),
        Commands::Prompts { name, format } => cmd_prompts(name, format),
        Commands::ListSignatures { config } => cmd_list_signatures(config),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_detect(
    paths: Vec<PathBuf>,
    config: Option<PathBuf>,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, ProbeError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let outputs = if paths.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        vec![buf]
    } else {
        paths
            .iter()
            .map(std::fs::read_to_string)
            .collect::<std::io::Result<Vec<String>>>()?
    };

    let options = EvalOptions {
        config_path: config,
        format,
    };

    let report = malprobe::evaluate(&outputs, &options)?;
    let rendered = malprobe::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = no code detected, 1 = at least one output flagged
    Ok(if report.flagged == 0 { 0 } else { 1 })
}

fn cmd_list_probes(format_str: String) -> Result<i32, ProbeError> {
    let probes = builtin::all_probes();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&probes)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<16} {:<8} {:<8} GOAL", "NAME", "PROMPTS", "LOCALE");
            println!("{}", "-".repeat(72));
            for probe in &probes {
                println!(
                    "{:<16} {:<8} {:<8} {}",
                    probe.name,
                    probe.prompt_count(),
                    probe.locale,
                    probe.goal,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_prompts(name: String, format_str: String) -> Result<i32, ProbeError> {
    let probe = builtin::probe_by_name(&name).ok_or_else(|| ProbeError::UnknownProbe(name))?;
    let prompts = probe.prompts()?;

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&prompts)?;
            println!("{}", json);
        }
        _ => {
            for prompt in &prompts {
                println!("{}", prompt);
            }
        }
    }

    Ok(0)
}

fn cmd_list_signatures(config: Option<PathBuf>) -> Result<i32, ProbeError> {
    let signatures = match config {
        Some(path) => Config::load(&path)?.detector.signature_set()?,
        None => SignatureSet::builtin(),
    };

    println!("{:<10} PATTERN", "LANGUAGE");
    println!("{}", "-".repeat(72));
    for signature in signatures.iter() {
        println!("{:<10} {}", signature.name(), signature.pattern());
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, ProbeError> {
    let path = PathBuf::from(".malprobe.toml");

    if path.exists() && !force {
        eprintln!(".malprobe.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .malprobe.toml");

    Ok(0)
}
