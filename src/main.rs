use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use role_scout::config::{load_config, validate_config, Config};
use role_scout::output;
use role_scout::players::{load_players, PlayerDataset};
use role_scout::roles::{load_catalog, RoleCatalog};
use role_scout::scoring::{
    rank_roles, squad_scores, GoalkeeperRoles, PlayerFilter, Restriction, RoleScorer, Selection,
    MAX_TOP_N,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_EXPORT: i32 = 5;

#[derive(Args, Debug, Clone, Default)]
struct RankArgs {
    /// Role abbreviations to rank, comma separated (all roles if omitted)
    #[arg(short, long, value_delimiter = ',')]
    roles: Vec<String>,

    /// Only players in this division (-ALL- for any)
    #[arg(long)]
    division: Option<String>,

    /// Only players of this nationality (-ALL- for any)
    #[arg(long)]
    nationality: Option<String>,

    /// Only players of this club (-ALL- for any)
    #[arg(long)]
    club: Option<String>,

    /// Minimum age, inclusive
    #[arg(long)]
    min_age: Option<u32>,

    /// Maximum age, inclusive
    #[arg(long)]
    max_age: Option<u32>,

    /// Players kept per role
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Skip goalkeeper roles
    #[arg(long)]
    exclude_gk: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank players for the selected roles (default if no subcommand)
    Rank(RankArgs),
    /// Rank players and save one CSV file per role
    Export {
        #[command(flatten)]
        args: RankArgs,

        /// Directory for the CSV files (defaults to config output_dir, then ".")
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Score every player of one club against every role
    Squad {
        /// Club name, exactly as in the player table
        #[arg(long)]
        club: String,

        /// Skip goalkeeper roles
        #[arg(long)]
        exclude_gk: bool,

        /// Also save the table as CSV
        #[arg(long)]
        save: bool,

        /// Directory for the CSV file (defaults to config output_dir, then ".")
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// List role categories and roles
    Roles,
    /// List the divisions, nationalities and clubs in the player table
    Facets {
        /// Only list the clubs of this division
        #[arg(long)]
        division: Option<String>,
    },
    /// Show how a player's score for one role is built
    Explain {
        /// Role abbreviation
        #[arg(long)]
        role: String,

        /// Player name, exactly as in the player table
        #[arg(long)]
        player: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "role-scout")]
#[command(about = "Rank players against weighted role definitions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/role-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Role catalog (JSON)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Player table (CSV, or TSV by extension)
    #[arg(short, long, global = true)]
    players: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "role_scout=debug" } else { "role_scout=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank(RankArgs::default()));
    let start_time = Instant::now();

    // Load config
    let config = match load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let goalkeepers = match GoalkeeperRoles::new(config.goalkeeper_patterns().as_slice()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Config error: goalkeeper_roles: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Load role catalog
    let Some(catalog_path) = cli.catalog.or_else(|| config.catalog.clone()) else {
        eprintln!("No role catalog given. Pass --catalog <file.json> or set 'catalog' in the config file.");
        std::process::exit(EXIT_INPUT);
    };
    let catalog = match load_catalog(&catalog_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Role catalog error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let use_colors = output::should_use_colors();

    if let Commands::Roles = command {
        println!("{}", output::format_catalog(&catalog, use_colors));
        std::process::exit(EXIT_SUCCESS);
    }

    // Load player table
    let Some(players_path) = cli.players.or_else(|| config.players.clone()) else {
        eprintln!("No player table given. Pass --players <file.csv> or set 'players' in the config file.");
        std::process::exit(EXIT_INPUT);
    };
    let dataset = match load_players(&players_path, None) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Player table error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    debug!("inputs loaded in {:?}", start_time.elapsed());

    match command {
        Commands::Rank(args) => {
            let selection = build_selection(&args, &catalog, &config);
            let report = rank_roles(&catalog, &dataset, &selection, &goalkeepers);
            println!("{}", output::format_report(&report, use_colors));
        }
        Commands::Export { args, output_dir } => {
            let selection = build_selection(&args, &catalog, &config);
            let report = rank_roles(&catalog, &dataset, &selection, &goalkeepers);
            let dir = output_dir.unwrap_or_else(|| config.output_dir());
            let generated_at = chrono::Local::now().naive_local();

            match output::write_report(&dir, &report, &generated_at) {
                Ok(paths) if paths.is_empty() => {
                    println!("No players matched; nothing saved.");
                }
                Ok(paths) => {
                    for path in paths {
                        println!("Saved {}", path.display());
                    }
                }
                Err(e) => {
                    eprintln!("Export failed: {}", e);
                    std::process::exit(EXIT_EXPORT);
                }
            }
        }
        Commands::Squad {
            club,
            exclude_gk,
            save,
            output_dir,
        } => {
            let squad = squad_scores(&catalog, &dataset, &club, exclude_gk, &goalkeepers);
            println!("{}", output::format_squad_table(&squad, use_colors));

            if save && !squad.rows.is_empty() {
                let dir = output_dir.unwrap_or_else(|| config.output_dir());
                let generated_at = chrono::Local::now().naive_local();
                match output::write_squad(&dir, &squad, &generated_at) {
                    Ok(path) => println!("Saved {}", path.display()),
                    Err(e) => {
                        eprintln!("Export failed: {}", e);
                        std::process::exit(EXIT_EXPORT);
                    }
                }
            }
        }
        Commands::Facets { division } => print_facets(&dataset, division.as_deref(), use_colors),
        Commands::Explain { role, player } => {
            let Some(role) = catalog.role(&role) else {
                eprintln!("Unknown role abbreviation '{}'.", role);
                std::process::exit(EXIT_INPUT);
            };
            let Some(player) = dataset.find(&player) else {
                eprintln!("No player named '{}' in the player table.", player);
                std::process::exit(EXIT_INPUT);
            };
            match RoleScorer::new(role) {
                Some(scorer) => {
                    let breakdown = scorer.explain(player);
                    println!(
                        "{}",
                        output::format_breakdown(role, player, &breakdown, use_colors)
                    );
                }
                None => {
                    eprintln!("Role '{}' cannot be scored: its weights sum to zero.", role.name);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Roles => unreachable!("handled before the player table is loaded"),
    }

    debug!("done in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}

/// Merge command-line selection flags with config defaults
fn build_selection(args: &RankArgs, catalog: &RoleCatalog, config: &Config) -> Selection {
    let roles = if args.roles.is_empty() {
        catalog.roles().map(|r| r.abbreviation.clone()).collect()
    } else {
        args.roles.iter().map(|r| r.trim().to_string()).collect()
    };

    let top_n = args.top.unwrap_or_else(|| config.top_n());
    if top_n == 0 {
        warn!("--top 0 keeps no players");
    } else if top_n > MAX_TOP_N {
        warn!("--top {} is above {}, keeping {}", top_n, MAX_TOP_N, MAX_TOP_N);
    }

    let filter = PlayerFilter::build(
        Restriction::from_option(args.division.as_deref()),
        Restriction::from_option(args.nationality.as_deref()),
        Restriction::from_option(args.club.as_deref()),
        args.min_age.unwrap_or_else(|| config.min_age()),
        args.max_age.unwrap_or_else(|| config.max_age()),
    );

    Selection {
        roles,
        filter,
        top_n,
        exclude_goalkeepers: args.exclude_gk,
    }
}

fn print_facets(dataset: &PlayerDataset, division: Option<&str>, use_colors: bool) {
    if let Some(division) = division {
        let clubs = dataset.clubs_in_division(division);
        println!(
            "{}",
            output::format_facet(&format!("Clubs in {}", division), &clubs, use_colors)
        );
        return;
    }

    let sections = [
        output::format_facet("Divisions", &dataset.divisions(), use_colors),
        output::format_facet("Nationalities", &dataset.nationalities(), use_colors),
        output::format_facet("Clubs", &dataset.clubs(), use_colors),
    ];
    println!("{}", sections.join("\n\n"));
}
