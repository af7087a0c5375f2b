use druids::character::{CharacterClass, SaveManager};
use druids::simulator::{run_simulation, SimConfig};
use druids::zones::Location;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        print_help();
        std::process::exit(1);
    };

    match command.as_str() {
        "simulate" => match parse_sim_args(&args[2..]) {
            Ok(config) => simulate(&config),
            Err(message) => {
                eprintln!("{}\n", message);
                print_help();
                std::process::exit(1);
            }
        },
        "saves" => match parse_saves_args(&args[2..]) {
            Ok(dir) => list_saves(dir),
            Err(message) => {
                eprintln!("{}\n", message);
                print_help();
                std::process::exit(1);
            }
        },
        "--version" | "-v" => {
            println!("druids {}", env!("CARGO_PKG_VERSION"));
        }
        "--help" | "-h" => print_help(),
        other => {
            eprintln!("Unknown command: {}\n", other);
            print_help();
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` directives when set and valid, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn simulate(config: &SimConfig) {
    println!("Configuration:");
    println!("  Class:          {}", config.class.name());
    println!("  Location:       {}", config.location.name());
    println!("  Runs:           {}", config.num_runs);
    println!("  Prior wins:     {}", config.starting_victories);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let report = run_simulation(config);
    println!("{}", report.to_text());
}

fn list_saves(dir: Option<PathBuf>) {
    let manager = match dir {
        Some(dir) => SaveManager::with_dir(dir),
        None => SaveManager::new(),
    };
    let saves = manager.and_then(|manager| manager.list_saves());

    match saves {
        Ok(saves) if saves.is_empty() => println!("No saves found."),
        Ok(saves) => {
            for save in saves {
                if save.is_corrupted {
                    println!("{:<45} [CORRUPTED]", save.key);
                    continue;
                }
                let date = save
                    .save_date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                let kind = if save.is_quick_save {
                    " (quick)"
                } else if save.is_auto_save {
                    " (auto)"
                } else {
                    ""
                };
                println!(
                    "{:<45} {} the {}, level {}, {} gold, {} shards  {}{}",
                    save.key,
                    save.character_name,
                    save.class_name,
                    save.level,
                    save.gold,
                    save.dragon_shards,
                    date,
                    kind
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_sim_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match flag {
            "-c" | "--class" => {
                let name = value(flag)?;
                config.class = CharacterClass::from_name(&name)
                    .filter(|class| class.preset().is_some())
                    .ok_or_else(|| format!("Unknown class: {}", name))?;
            }
            "-l" | "--location" => {
                let name = value(flag)?;
                config.location = Location::ALL
                    .into_iter()
                    .find(|location| location.name().eq_ignore_ascii_case(name.trim()))
                    .ok_or_else(|| format!("Unknown location: {}", name))?;
            }
            "-n" | "--runs" => config.num_runs = parse_number(flag, &value(flag)?)?,
            "-s" | "--seed" => config.seed = Some(parse_number(flag, &value(flag)?)?),
            "--victories" => config.starting_victories = parse_number(flag, &value(flag)?)?,
            "-t" | "--turns" => config.max_turns_per_battle = parse_number(flag, &value(flag)?)?,
            "--verbose" => config.verbosity = 2,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(config)
}

fn parse_saves_args(args: &[String]) -> Result<Option<PathBuf>, String> {
    match args {
        [] => Ok(None),
        [flag, dir] if flag == "--dir" => Ok(Some(PathBuf::from(dir))),
        [other, ..] => Err(format!("Unknown argument: {}", other)),
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

fn print_help() {
    println!("Battle of the Druids - combat resolver\n");
    println!("USAGE:");
    println!("    druids <COMMAND> [OPTIONS]\n");
    println!("COMMANDS:");
    println!("    simulate        Run a battle balance simulation");
    println!("    saves           List save files");
    println!("    --version       Show version information");
    println!("    --help          Show this help message\n");
    println!("SIMULATE OPTIONS:");
    println!("    -c, --class <C>       Knight, Wizard, Rogue or Soldier (default: Knight)");
    println!("    -l, --location <L>    Location name, e.g. \"Haunted Mansion\" (default: Arena)");
    println!("    -n, --runs <N>        Number of battles (default: 1000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("        --victories <V>   Prior victories, scales enemies (default: 0)");
    println!("    -t, --turns <T>       Player turns before a timeout (default: 200)");
    println!("        --verbose         Print every battle\n");
    println!("SAVES OPTIONS:");
    println!("        --dir <PATH>      Read saves from PATH instead of the default");
    println!("\nSet RUST_LOG=debug to see every combat event.");
}
