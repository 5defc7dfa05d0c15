use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io;
use std::path::PathBuf;

use mlwheel_cli::demo;
use mlwheel_cli::load_config;
use mlwheel_core::config::MathConfig;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MLWHEEL_LOG", "error,mlwheel=info"))
        .init();

    let matches = Command::new("mlwheel")
        .version(clap::crate_version!())
        .about("From-scratch matrix, vector and autograd primitives")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a JSON MathConfig file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .help("Random seed. Overrides the seed in the configuration file.")
                .value_parser(clap::value_parser!(u64)),
        )
        .subcommand(
            Command::new("demo")
                .about("Run one of the reference scenarios")
                .subcommand_required(true)
                .subcommand(Command::new("matrix").about("Add, subtract, multiply and transpose"))
                .subcommand(Command::new("vector").about("Dot product, L2 norm and projection"))
                .subcommand(Command::new("activation").about("ReLU, sigmoid and tanh on a grid"))
                .subcommand(
                    Command::new("graph")
                        .about("Record the matrix scenario in a computation graph"),
                )
                .subcommand(
                    Command::new("random")
                        .about("Sample a uniform random matrix in [-1, 1)")
                        .arg(
                            Arg::new("rows")
                                .long("rows")
                                .default_value("3")
                                .value_parser(clap::value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("cols")
                                .long("cols")
                                .default_value("3")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ),
        )
        .get_matches();

    let config = resolve_config(&matches)?;

    match matches.subcommand() {
        Some(("demo", sub_m)) => match handle_demo(sub_m, &config) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("Demo failed: {:#}", e);
                std::process::exit(1)
            }
        },
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<MathConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[mlwheel] Using config: {:?}", path);
            load_config(path)?
        }
        None => MathConfig::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    Ok(config)
}

fn handle_demo(matches: &ArgMatches, config: &MathConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match matches.subcommand() {
        Some(("matrix", _)) => demo::run_matrix_demo(&mut out, config),
        Some(("vector", _)) => demo::run_vector_demo(&mut out, config),
        Some(("activation", _)) => demo::run_activation_demo(&mut out, config),
        Some(("graph", _)) => demo::run_graph_demo(&mut out, config),
        Some(("random", random_m)) => {
            let rows = *random_m.get_one::<usize>("rows").unwrap_or(&3);
            let cols = *random_m.get_one::<usize>("cols").unwrap_or(&3);
            demo::run_random_demo(&mut out, config, rows, cols)
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}
