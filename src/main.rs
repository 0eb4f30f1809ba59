//! Silverhold - Entry Point
//!
//! A thin text controller around the simulation core: it translates typed
//! commands into engine commands and prints the resulting snapshot. All
//! game rules live in the library.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use silverhold::catalog::{BuildingType, StatsCatalog, UnitType};
use silverhold::core::config::EngineConfig;
use silverhold::core::types::{MatchOutcome, TileId, UnitId};
use silverhold::engine::{Command, GameWorld};
use silverhold::ledger::ResourceType;

#[derive(Parser, Debug)]
#[command(name = "silverhold", about = "Turn-based conquest simulation")]
struct Cli {
    /// RNG seed for a reproducible campaign
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional stat table file (defaults to the builtin tables)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("silverhold=info")
        .init();

    let cli = Cli::parse();

    let stats = match &cli.catalog {
        Some(path) => match StatsCatalog::load_from_toml(path) {
            Ok(stats) => stats,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => StatsCatalog::with_defaults(),
    };

    let mut world = GameWorld::new(EngineConfig::default(), stats, cli.seed);

    println!("\n=== SILVERHOLD ===");
    println!("A turn-based conquest simulation");
    println!();
    println!("Commands:");
    println!("  status / s              - Treasury, army, and recent events");
    println!("  map / m                 - Tile overview");
    println!("  units / u               - Army overview");
    println!("  match win|loss          - Bank a simulated match result");
    println!("  build <tile> <kind>     - e.g. build 4 farm");
    println!("  train <tile> <kind>     - e.g. train 1 soldier");
    println!("  attack <unit> <tile>    - e.g. attack 1 2");
    println!("  move <unit> <tile>      - e.g. move 1 4");
    println!("  end / e                 - End the turn (costs 10 Silver Shields)");
    println!("  export <file>           - Write a JSON snapshot of the world");
    println!("  quit / q                - Exit");
    println!();

    loop {
        print!("[turn {}] > ", world.turn);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_input(input) {
            Input::Quit => break,
            Input::Status => display_status(&world),
            Input::Map => display_map(&world),
            Input::Units => display_units(&world),
            Input::Command(command) => {
                world.execute(command);
                display_events(&world);
            }
            Input::Export(path) => match export_snapshot(&world, &path) {
                Ok(()) => println!("Snapshot written to {}", path),
                Err(e) => println!("Export failed: {}", e),
            },
            Input::Unrecognized => {
                println!("Unrecognized command. Try: status, map, units, match, build, train, attack, move, end, quit");
            }
        }
    }

    println!("\nFarewell! Final state: turn {}, {} tiles held, {} units.",
        world.turn,
        world.owned_tiles().count(),
        world.army_size()
    );
    Ok(())
}

enum Input {
    Command(Command),
    Status,
    Map,
    Units,
    Export(String),
    Quit,
    Unrecognized,
}

/// Persistence is a collaborator concern; the engine only hands out the
/// snapshot.
fn export_snapshot(world: &GameWorld, path: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&world.snapshot())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

fn parse_input(input: &str) -> Input {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    match tokens.as_slice() {
        ["quit"] | ["q"] => Input::Quit,
        ["status"] | ["s"] => Input::Status,
        ["map"] | ["m"] => Input::Map,
        ["units"] | ["u"] => Input::Units,
        ["end"] | ["e"] => Input::Command(Command::EndTurn),
        ["export", path] => Input::Export((*path).to_string()),
        ["match", outcome] => match *outcome {
            "win" => Input::Command(Command::SimulateMatch { outcome: MatchOutcome::Win }),
            "loss" => Input::Command(Command::SimulateMatch { outcome: MatchOutcome::Loss }),
            _ => Input::Unrecognized,
        },
        ["build", tile, kind] => match (tile.parse(), BuildingType::parse(kind)) {
            (Ok(tile), Some(building)) => Input::Command(Command::Build {
                tile: TileId(tile),
                building,
            }),
            _ => Input::Unrecognized,
        },
        ["train", tile, kind] => match (tile.parse(), UnitType::parse(kind)) {
            (Ok(tile), Some(unit)) => Input::Command(Command::Train {
                tile: TileId(tile),
                unit,
            }),
            _ => Input::Unrecognized,
        },
        ["attack", unit, tile] => match (unit.parse(), tile.parse()) {
            (Ok(unit), Ok(tile)) => Input::Command(Command::Attack {
                unit: UnitId(unit),
                target: TileId(tile),
            }),
            _ => Input::Unrecognized,
        },
        ["move", unit, tile] => match (unit.parse(), tile.parse()) {
            (Ok(unit), Ok(tile)) => Input::Command(Command::Move {
                unit: UnitId(unit),
                target: TileId(tile),
            }),
            _ => Input::Unrecognized,
        },
        _ => Input::Unrecognized,
    }
}

fn display_status(world: &GameWorld) {
    let snapshot = world.snapshot();
    let ledger = &snapshot.ledger;

    println!();
    println!(
        "--- Turn {} | Shields: {} | Army: {}/{} ---",
        snapshot.turn,
        ledger.get(ResourceType::Shields),
        snapshot.units.len(),
        ledger.get(ResourceType::Food),
    );
    println!(
        "  Wood: {} | Stone: {} | Metal: {} | Petricite: {} | Valor: {}",
        ledger.get(ResourceType::Wood),
        ledger.get(ResourceType::Stone),
        ledger.get(ResourceType::Metal),
        ledger.get(ResourceType::Petricite),
        ledger.get(ResourceType::Valor),
    );
    display_events(world);
}

fn display_events(world: &GameWorld) {
    for line in world.log.iter() {
        println!("  * {}", line);
    }
}

fn display_map(world: &GameWorld) {
    println!();
    for tile in &world.tiles {
        let status = if tile.owned { "OWNED" } else { "HOSTILE" };
        let building = tile
            .building
            .as_ref()
            .map(|b| b.building_type.label())
            .unwrap_or("-");
        println!(
            "  [{}] {} ({}) {} | Building: {} | Threat: {} | Garrison: {}",
            tile.id.0,
            tile.name,
            tile.terrain.label(),
            status,
            building,
            tile.threat,
            tile.garrison.map(|g| g.0.to_string()).unwrap_or_else(|| "-".into()),
        );
    }
}

fn display_units(world: &GameWorld) {
    println!();
    if world.units.is_empty() {
        println!("  No units. Train some at the capital.");
        return;
    }
    for unit in &world.units {
        let location = world
            .tile(unit.location)
            .map(|tile| tile.name.as_str())
            .unwrap_or("?");
        println!(
            "  [{}] {} | Power: {} | At: {} | {:?}",
            unit.id.0, unit.name, unit.power, location, unit.state,
        );
    }
}
