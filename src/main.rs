//! mudcombat - duel runner
//!
//! Loads the rules tables and a roster, then drives every combatant from a
//! fixed tick until one side is left standing.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mudcombat::combat::{
    AttackOutcome, Character, CombatEvent, CombatManager, Combatant, RngRoller, TickOutcome,
};
use mudcombat::{CombatConfig, Tables};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "mudcombat", about = "Run a duel using the combat tables")]
struct Args {
    /// Roster file: JSON array of characters
    roster: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the table data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mudcombat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = CombatConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let tables = Tables::load(&config.data_dir)?;
    let contents = std::fs::read_to_string(&args.roster)
        .with_context(|| format!("reading roster {}", args.roster.display()))?;
    let roster: Vec<Character> =
        serde_json::from_str(&contents).with_context(|| format!("parsing roster {}", args.roster.display()))?;

    let mut manager = CombatManager::new(&tables, &config);
    let (npcs, players): (Vec<String>, Vec<String>) = {
        let (npcs, players): (Vec<_>, Vec<_>) = roster.iter().partition(|c| c.kind.is_npc());
        (
            npcs.into_iter().map(|c| c.id.clone()).collect(),
            players.into_iter().map(|c| c.id.clone()).collect(),
        )
    };
    for character in roster {
        manager.insert(character);
    }
    for player in &players {
        for npc in &npcs {
            manager.enter_combat(player, npc)?;
        }
    }
    info!("{} players vs {} npcs", players.len(), npcs.len());

    let mut roller = RngRoller::thread();
    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));

    for _ in 0..args.max_ticks {
        interval.tick().await;

        for (actor, outcome) in manager.tick_all()? {
            let TickOutcome::Ready { target } = outcome else {
                continue;
            };
            if let Some(outcome) = manager.attack(&actor, &target, &mut roller)? {
                narrate(&manager, &actor, &target, &outcome);
            }
        }

        for event in manager.take_events() {
            match event {
                CombatEvent::Deathblow { killer, victim } => {
                    println!("{} has slain {}!", display_name(&manager, &killer), display_name(&manager, &victim));
                }
                CombatEvent::Killed { victim, .. } => {
                    println!("{} collapses to the ground.", display_name(&manager, &victim));
                }
                CombatEvent::Despawn { id } => {
                    manager.remove(&id);
                }
            }
        }

        let fighting = manager
            .ids()
            .iter()
            .filter_map(|id| manager.get(id))
            .any(|c| !c.combat().killed && c.combat().in_combat());
        if !fighting {
            break;
        }
    }

    for id in manager.ids() {
        let Some(survivor) = manager.get(&id) else {
            continue;
        };
        if survivor.combat().killed {
            continue;
        }
        if survivor.combat().in_combat() {
            warn!("{} is still fighting after {} ticks", survivor.name(), args.max_ticks);
        }
        let health = survivor.health().unwrap_or(0);
        let name = survivor.name().to_string();
        if manager.start_regeneration(&id)? {
            println!("{} ({} health) begins to recover.", name, health);
        }
    }

    Ok(())
}

fn display_name<K: mudcombat::Clock>(manager: &CombatManager<'_, Character, K>, id: &str) -> String {
    manager
        .get(id)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

fn narrate<K: mudcombat::Clock>(
    manager: &CombatManager<'_, Character, K>,
    attacker_id: &str,
    target_id: &str,
    outcome: &AttackOutcome,
) {
    let attacker = display_name(manager, attacker_id);
    let target = display_name(manager, target_id);
    let weapon = manager
        .get(attacker_id)
        .and_then(|c| c.equipped_weapon())
        .map(|w| w.name.clone())
        .unwrap_or_else(|| "their fists".to_string());

    println!("{} swings {} at {}!", attacker, weapon, target);
    println!("  {}", outcome.trace_message);
    match (&outcome.critical_message, outcome.damage) {
        (Some(message), Some(damage)) => println!("  ... {} points of damage!\n  {}", damage, message),
        (None, Some(_)) => println!("  A glancing blow."),
        _ => println!("  A clean miss."),
    }
    println!("  Roundtime: {} sec.", outcome.round_time_secs());
}
