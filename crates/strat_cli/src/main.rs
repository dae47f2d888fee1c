use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

use strat_core::{GameClock, Persist, SavedGame};
use strat_world::{load_ruleset, new_campaign, read_save, write_save};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "strat_cli", about = "Campaign save-document tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new campaign and write its save document.
    New {
        #[arg(long, default_value = "./content")]
        content_dir: String,
        /// Save document to write.
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = 4_000_000)]
        funds: i64,
        #[arg(long, default_value = "Outpost One")]
        base_name: String,
    },
    /// Print a summary of a save document.
    Inspect {
        #[arg(long, default_value = "./content")]
        content_dir: String,
        save: String,
    },
    /// Load a save document and verify its round trip is stable.
    Check {
        #[arg(long, default_value = "./content")]
        content_dir: String,
        save: String,
    },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn campaign_start() -> GameClock {
    GameClock {
        second: 0,
        minute: 0,
        hour: 12,
        weekday: 5,
        day: 1,
        month: 1,
        year: 2099,
    }
}

fn cmd_new(content_dir: &str, out: &str, funds: i64, base_name: &str) -> Result<()> {
    let rules = load_ruleset(content_dir)?;
    let game = new_campaign(&rules, campaign_start(), funds, base_name);
    write_save(Path::new(out), &game)?;
    println!(
        "new campaign: {} regions, {} countries, base '{}' -> {out}",
        game.regions.len(),
        game.countries.len(),
        base_name,
    );
    Ok(())
}

fn cmd_inspect(content_dir: &str, save: &str) -> Result<()> {
    let rules = load_ruleset(content_dir)?;
    let game = read_save(Path::new(save), &rules)?;
    print_summary(&game);
    Ok(())
}

fn print_summary(game: &SavedGame) {
    let time = &game.time;
    println!(
        "time: {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        time.year, time.month, time.day, time.hour, time.minute, time.second
    );
    println!("funds: {}", game.funds);
    for base in &game.bases {
        println!(
            "base '{}': {} facilities, {} items stocked, {} productions, {} vehicles",
            base.name,
            base.facilities.len(),
            base.stockpile.total_quantity(),
            base.productions.len(),
            base.vehicles.len(),
        );
    }
    for region in &game.regions {
        println!(
            "region {}: own {} / alien {} this month",
            region.rule,
            region.activity_own.current(),
            region.activity_alien.current(),
        );
    }
    println!(
        "strategy: {} regions weighted, {} deaths recorded",
        game.strategy.region_weights().len(),
        game.deaths.len(),
    );
}

fn cmd_check(content_dir: &str, save: &str) -> Result<()> {
    let rules = load_ruleset(content_dir)?;
    let path = Path::new(save);
    let game = read_save(path, &rules)?;

    let text = std::fs::read_to_string(path).with_context(|| format!("reading {save}"))?;
    let original: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {save}"))?;
    let resaved = game.save();
    if resaved != original {
        bail!("round trip of {save} is not stable — re-saved document differs");
    }
    println!("{save}: ok");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    match Cli::parse().command {
        Commands::New {
            content_dir,
            out,
            funds,
            base_name,
        } => cmd_new(&content_dir, &out, funds, &base_name),
        Commands::Inspect { content_dir, save } => cmd_inspect(&content_dir, &save),
        Commands::Check { content_dir, save } => cmd_check(&content_dir, &save),
    }
}
