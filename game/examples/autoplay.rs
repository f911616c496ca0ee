//! Autoplay Example
//!
//! Plays a short session against the bundled dataset: spawn, weaken the wild
//! creature, throw balls, heal when the party is hurt. Game time is simulated
//! so cooldowns never block.
//!
//! Run with `RUST_LOG=pawanmon_game=debug` to see the engine's log events.

use anyhow::Result;
use pawanmon_battle::{Ball, Creature};
use pawanmon_game::{EncounterEnd, Game, GameConfig, GameError, InMemoryProvider, Item};
use tracing_subscriber::EnvFilter;

const ENCOUNTERS: usize = 12;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut game = Game::new(InMemoryProvider::bundled()?, GameConfig::default());
    let mut clock: u64 = 0;

    println!("{} species in the dataset. Shop:", game.provider().species_count());
    for ball in Ball::ALL {
        println!("  {:<12} {:>3}  {}", ball.name(), ball.cost(), ball.note());
    }
    for item in Item::ALL {
        println!("  {:<12} {:>3}  {}", item.name(), item.cost(), item.note());
    }
    println!();

    for round in 1..=ENCOUNTERS {
        clock += game.config().spawn_cooldown_ms;

        let wild = match game.spawn(clock).await {
            Ok(wild) => wild,
            Err(e) => {
                println!("[{round}] {e}");
                continue;
            }
        };
        println!(
            "[{round}] A wild {} appeared! ({}, Lv {}, {} HP)",
            wild.name(),
            wild.creature.rarity,
            wild.creature.level,
            wild.creature.max_hp
        );

        play_encounter(&mut game)?;

        let party_hurt = game
            .party()
            .members()
            .iter()
            .any(|c| c.hp < c.max_hp || c.fainted);
        if party_hurt && game.heal_seconds_left(clock) == 0 {
            game.heal_party(clock)?;
            println!("    Party healed.");
        }
        clock += 1_000;
    }

    let session = game.session();
    println!();
    println!(
        "Coins: {}  Streak: {}  Seen: {}  Caught: {}",
        session.coins,
        session.streak,
        session.dex_seen.len(),
        session.dex_caught.len()
    );
    for creature in session.party.members() {
        println!("  {}", render(creature));
    }
    if !session.pc.is_empty() {
        println!("  ({} more in the PC)", session.pc.len());
    }

    Ok(())
}

/// Fight while the wild creature is healthy, then throw the best ball on hand.
fn play_encounter(game: &mut Game<InMemoryProvider>) -> Result<()> {
    while let Some(wild) = game.encounter() {
        let weakened = wild.creature.hp_ratio() <= 0.5;

        if game.party().is_empty() || weakened {
            let Some(ball) = best_ball(game) else {
                println!("    {}", game.run()?);
                return Ok(());
            };
            let report = game.throw_ball(ball)?;
            println!("    {ball}: {}", report.message);
            continue;
        }

        let Some(move_index) = game
            .party()
            .active()
            .and_then(|c| c.usable_moves().next())
        else {
            println!("    {}", game.run()?);
            return Ok(());
        };

        match game.attack(move_index) {
            Ok(report) => {
                for line in &report.log {
                    println!("    {line}");
                }
                if let Some(active) = game.party().active() {
                    println!("    > {}", render(active));
                }
                if report.ended == Some(EncounterEnd::PlayerWipedOut) {
                    return Ok(());
                }
            }
            Err(GameError::PartyWipedOut(name)) => {
                println!("    Your party can't fight; {name} left.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Highest-chance ball owned, buying a Poke Ball when the bag is empty.
fn best_ball(game: &mut Game<InMemoryProvider>) -> Option<Ball> {
    if game.ball_count() == 0 && game.buy_ball(Ball::PokeBall).is_err() {
        return None;
    }
    Ball::ALL
        .into_iter()
        .filter(|b| game.session().balls(*b) > 0)
        .max_by(|a, b| game.capture_chance(*a).total_cmp(&game.capture_chance(*b)))
}

/// One-line status: name, level, HP and any status badge
fn render(creature: &Creature) -> String {
    let badge = creature
        .status
        .map(|s| format!(" [{}]", s.short()))
        .unwrap_or_default();
    format!(
        "{} Lv {} {}/{} HP ({}%){}",
        creature.name(),
        creature.level,
        creature.hp,
        creature.max_hp,
        creature.hp_percent(),
        badge
    )
}
