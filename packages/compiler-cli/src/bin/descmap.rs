/**
 * descmap
 *
 * Converts `.desc` mapping descriptions into version 3 source maps.
 */
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process;

use descmap_cli::compile::parallel::generate_all;
use descmap_cli::config::DescmapConfig;
use descmap_cli::perform_generate::{expand_inputs, Destination, GenerateOptions};
use descmap_cli::version::version_string;
use descmap_compiler::logging::{ConsoleLogger, LogLevel, Logger};

fn main() {
    let matches = Command::new("descmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate source maps from .desc mapping descriptions")
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .num_args(0..)
                .help(".desc files or glob patterns"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Write <stem>.map files into DIR"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .action(ArgAction::SetTrue)
                .help("Emit compact JSON"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to descmap.json"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log progress"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
        .get_matches();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let config = match DescmapConfig::resolve(config_path.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let level = if matches.get_flag("verbose") {
        LogLevel::Debug
    } else if matches.get_flag("quiet") {
        LogLevel::Error
    } else {
        config.log_level()
    };
    let logger = ConsoleLogger::new(level);
    logger.debug(&version_string());

    let patterns: Vec<String> = match matches.get_many::<String>("inputs") {
        Some(values) => values.cloned().collect(),
        None => config.inputs.clone().unwrap_or_default(),
    };
    if patterns.is_empty() {
        eprintln!("Error: no input files");
        process::exit(2);
    }

    let files = match expand_inputs(&patterns) {
        Ok(files) => files,
        Err(e) => {
            logger.error(&format!("{:#}", e));
            process::exit(1);
        }
    };

    let out_dir = matches
        .get_one::<String>("out-dir")
        .map(PathBuf::from)
        .or_else(|| config.out_dir.clone());
    let destination = match out_dir {
        Some(dir) => Destination::Dir(dir),
        None if files.len() == 1 => Destination::Stdout,
        None => Destination::BesideInput,
    };
    let options = GenerateOptions {
        destination,
        pretty: !matches.get_flag("compact") && config.pretty(),
    };

    let mut failed = false;
    for (path, result) in generate_all(&files, &options, &logger) {
        match result {
            Ok(generated) if generated.output.is_none() => println!("{}", generated.json),
            Ok(_) => {}
            Err(e) => {
                failed = true;
                logger.error(&format!("{}: {:#}", path.display(), e));
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
