//! The player-facing game: one method per action, each either applied in full or declined.

use std::time::{SystemTime, UNIX_EPOCH};

use pawanmon_battle::{
    ActionOutcome, Ball, CaptureContext, Creature, Move, Party, TurnOrder, WildEncounter,
    capture_chance, decide_turn_order, end_of_turn_effect, perform_move, resolve_action,
    roll_capture,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::encounter::{SpawnPlan, generate_encounter};
use crate::error::GameError;
use crate::items::Item;
use crate::provider::{CreatureProvider, ProviderError};
use crate::session::{Destination, Session};

/// Wall-clock milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// How an encounter came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterEnd {
    Caught(Destination),
    WildFainted,
    WildFled,
    PlayerWipedOut,
}

/// Narrative and outcome of one battle round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Battle log lines in the order they happened
    pub log: Vec<String>,

    /// Set when the round ended the encounter
    pub ended: Option<EncounterEnd>,

    /// New active slot after the previous one fainted
    pub switched_to: Option<usize>,
}

impl RoundReport {
    fn line(message: String) -> Self {
        Self {
            log: vec![message],
            ended: None,
            switched_to: None,
        }
    }

    /// Whole log as one line
    pub fn message(&self) -> String {
        self.log.join(" ")
    }
}

/// Result of a capture attempt
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowReport {
    pub ball: Ball,

    /// Probability the throw had
    pub chance: f64,

    pub caught: bool,

    /// The creature broke free and then ran away
    pub fled: bool,

    /// Where the catch went, on success
    pub destination: Option<Destination>,

    pub message: String,
}

/// A single-player game: session state plus the data provider and randomness it runs on.
///
/// # Example
///
/// ```ignore
/// let provider = InMemoryProvider::bundled()?;
/// let mut game = Game::new(provider, GameConfig::default());
///
/// let wild = game.spawn(now_ms()).await?;
/// println!("A wild {} appeared!", wild.name());
///
/// let report = game.throw_ball(Ball::PokeBall)?;
/// println!("{}", report.message);
/// ```
pub struct Game<P, R = StdRng> {
    config: GameConfig,
    session: Session,
    provider: P,
    rng: R,
    busy: bool,
}

impl<P: CreatureProvider> Game<P, StdRng> {
    /// Fresh session with an entropy-seeded RNG
    pub fn new(provider: P, config: GameConfig) -> Self {
        Self::with_rng(provider, config, StdRng::from_entropy())
    }
}

impl<P: CreatureProvider, R: Rng> Game<P, R> {
    pub fn with_rng(provider: P, config: GameConfig, rng: R) -> Self {
        let session = Session::new(&config);
        Self {
            config,
            session,
            provider,
            rng,
            busy: false,
        }
    }

    /// Continue from a saved session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Direct access for save layers and tooling
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn encounter(&self) -> Option<&WildEncounter> {
        self.session.encounter.as_ref()
    }

    pub fn party(&self) -> &Party {
        &self.session.party
    }

    /// Whether a spawn is waiting on the provider
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn ball_count(&self) -> u32 {
        self.session.ball_count()
    }

    pub fn heal_seconds_left(&self, now_ms: u64) -> u64 {
        self.session.heal_seconds_left(now_ms)
    }

    pub fn spawn_seconds_left(&self, now_ms: u64) -> u64 {
        self.session.spawn_seconds_left(now_ms)
    }

    /// Spawn a wild creature.
    ///
    /// Runs [`begin_spawn`](Self::begin_spawn), fetches the species and its
    /// moves, then [`finish_spawn`](Self::finish_spawn).
    pub async fn spawn(&mut self, now_ms: u64) -> Result<&WildEncounter, GameError> {
        let plan = self.begin_spawn(now_ms)?;
        let result = generate_encounter(&self.provider, plan, &mut self.rng).await;
        self.finish_spawn(result)
    }

    /// First half of a spawn: check preconditions, mark the game busy, stamp
    /// the cooldown, use up a booster charge and decide what to spawn.
    pub fn begin_spawn(&mut self, now_ms: u64) -> Result<SpawnPlan, GameError> {
        if self.busy {
            return Err(GameError::Busy);
        }
        if let Some(enc) = &self.session.encounter {
            return Err(GameError::EncounterActive(enc.name().to_string()));
        }
        let seconds = self.session.spawn_seconds_left(now_ms);
        if seconds > 0 {
            return Err(GameError::SpawnCooldown { seconds });
        }

        self.busy = true;
        self.session.spawn_cooldown_until = now_ms + self.config.spawn_cooldown_ms;
        let boosted = self.session.items.consume_booster_use();
        let boost = if boosted { self.config.rarity_boost } else { 1.0 };

        let plan = SpawnPlan::roll(boost, &mut self.rng);
        tracing::debug!(
            rarity = %plan.rarity,
            species_id = plan.species_id,
            boosted,
            "Spawning"
        );
        Ok(plan)
    }

    /// Second half of a spawn: install the encounter, or clear it on provider failure.
    pub fn finish_spawn(
        &mut self,
        result: Result<WildEncounter, ProviderError>,
    ) -> Result<&WildEncounter, GameError> {
        self.busy = false;
        match result {
            Ok(enc) => {
                self.session.dex_seen.insert(enc.species_id());
                tracing::info!(
                    name = %enc.name(),
                    rarity = %enc.creature.rarity,
                    level = enc.creature.level,
                    "A wild creature appeared"
                );
                Ok(self.session.encounter.insert(enc))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Spawn failed");
                self.session.encounter = None;
                Err(GameError::SpawnFailed(e))
            }
        }
    }

    /// Make sure a battle can be fought, switching away from a fainted active creature.
    ///
    /// With every party member fainted the wild creature leaves and the
    /// encounter is cleared.
    pub fn ensure_battle_ready(&mut self) -> Result<(), GameError> {
        let Some(enc) = &self.session.encounter else {
            return Err(GameError::NoEncounter);
        };
        if self.session.party.is_empty() {
            return Err(GameError::EmptyParty);
        }
        if self.session.party.ensure_active_alive().is_none() {
            let name = enc.name().to_string();
            self.session.abandon_encounter();
            tracing::info!(wild = %name, "Party wiped out");
            return Err(GameError::PartyWipedOut(name));
        }
        Ok(())
    }

    /// Fight one round with the active creature's move at `move_index`.
    ///
    /// The faster side acts first; the slower side only acts if it is still
    /// standing. Then poison and burn tick for both, the round counter goes up
    /// and the wild creature may flee. Picking a move with no PP left reports
    /// it and plays no round.
    pub fn attack(&mut self, move_index: usize) -> Result<RoundReport, GameError> {
        self.ensure_battle_ready()?;

        let session = &mut self.session;
        let rng = &mut self.rng;
        let (Some(enc), Some(player)) = (session.encounter.as_mut(), session.party.active_mut())
        else {
            return Err(GameError::NoEncounter);
        };
        let wild = &mut enc.creature;

        if !player.moves.get(move_index).is_some_and(Move::has_pp) {
            let outcome = resolve_action(player, wild, move_index, true, rng);
            return Ok(RoundReport::line(outcome.message));
        }

        let mut log = Vec::new();
        match decide_turn_order(player, wild, rng) {
            TurnOrder::PlayerFirst => {
                log.push(resolve_action(player, wild, move_index, true, rng).message);
                if !wild.fainted {
                    log.push(wild_action(wild, player, rng).message);
                }
            }
            TurnOrder::WildFirst => {
                log.push(wild_action(wild, player, rng).message);
                if !player.fainted {
                    log.push(resolve_action(player, wild, move_index, true, rng).message);
                }
            }
        }

        for creature in [&mut *player, &mut *wild] {
            if let Some(tick) = end_of_turn_effect(creature) {
                log.push(tick.message);
            }
        }

        let wild_name = wild.name().to_string();
        let wild_fainted = wild.fainted;
        let player_fainted = player.fainted;
        enc.turns += 1;
        let turns = enc.turns;

        if wild_fainted {
            session.abandon_encounter();
            tracing::info!(wild = %wild_name, turns, "Wild creature fainted");
            log.push(format!("Wild {wild_name} fainted!"));
            return Ok(RoundReport {
                log,
                ended: Some(EncounterEnd::WildFainted),
                switched_to: None,
            });
        }

        let mut switched_to = None;
        if player_fainted {
            match session.party.ensure_active_alive() {
                Some(idx) => {
                    if let Some(next) = session.party.get(idx) {
                        log.push(format!("Go, {}!", next.name()));
                    }
                    switched_to = Some(idx);
                }
                None => {
                    session.abandon_encounter();
                    tracing::info!(wild = %wild_name, "Party wiped out");
                    log.push(format!(
                        "All your creatures fainted… wild {wild_name} ran away."
                    ));
                    return Ok(RoundReport {
                        log,
                        ended: Some(EncounterEnd::PlayerWipedOut),
                        switched_to: None,
                    });
                }
            }
        }

        if self.config.round_flee.roll(turns, rng) {
            session.abandon_encounter();
            tracing::info!(wild = %wild_name, turns, "Wild creature fled");
            log.push(format!("Wild {wild_name} ran away!"));
            return Ok(RoundReport {
                log,
                ended: Some(EncounterEnd::WildFled),
                switched_to,
            });
        }

        Ok(RoundReport {
            log,
            ended: None,
            switched_to,
        })
    }

    /// Current capture probability for `ball`, without throwing
    pub fn capture_chance(&self, ball: Ball) -> f64 {
        capture_chance(&self.capture_context(), ball)
    }

    fn capture_context(&self) -> CaptureContext<'_> {
        let encounter = self.session.encounter.as_ref();
        CaptureContext {
            encounter,
            species_caught_before: encounter
                .is_some_and(|e| self.session.dex_caught.contains(&e.species_id())),
            capture_boost_active: self.session.items.catch_spray_active,
        }
    }

    /// Throw a ball at the wild creature.
    ///
    /// The ball and any active Catch Spray are used up whatever happens.
    pub fn throw_ball(&mut self, ball: Ball) -> Result<ThrowReport, GameError> {
        if self.session.encounter.is_none() {
            return Err(GameError::NoEncounter);
        }
        self.session.take_ball(ball)?;

        let chance = self.capture_chance(ball);
        self.session.items.consume_catch_spray();

        let session = &mut self.session;
        let rng = &mut self.rng;
        let Some(enc) = session.encounter.as_mut() else {
            return Err(GameError::NoEncounter);
        };
        enc.throws += 1;
        let caught = roll_capture(chance, rng);

        let name = enc.name().to_string();
        let throws = enc.throws;

        if caught {
            let reward = enc.reward_coins;
            let species_id = enc.species_id();
            let snapshot = enc.to_caught();
            session.encounter = None;
            session.dex_caught.insert(species_id);
            session.coins += reward;
            session.streak += 1;
            let destination = session.add_caught(snapshot);
            tracing::info!(name = %name, ball = %ball, chance, ?destination, "Caught");
            return Ok(ThrowReport {
                ball,
                chance,
                caught: true,
                fled: false,
                destination: Some(destination),
                message: format!("Caught {name}! +{reward} coins"),
            });
        }

        let mut message = format!(
            "{name} broke free… ({}% chance)",
            (chance * 100.0).round() as u32
        );
        let fled = self.config.throw_flee.roll(throws, rng);
        if fled {
            session.abandon_encounter();
            tracing::info!(name = %name, throws, "Wild creature fled after a throw");
            message = format!("{name} ran away!");
        }

        Ok(ThrowReport {
            ball,
            chance,
            caught: false,
            fled,
            destination: None,
            message,
        })
    }

    /// Leave the encounter
    pub fn run(&mut self) -> Result<String, GameError> {
        let enc = self.session.abandon_encounter().ok_or(GameError::NoEncounter)?;
        Ok(format!("Got away from {}.", enc.name()))
    }

    /// Fully restore the party (HP, status, PP) and start the heal cooldown
    pub fn heal_party(&mut self, now_ms: u64) -> Result<(), GameError> {
        self.session.heal_party(now_ms, &self.config)?;
        tracing::debug!(members = self.session.party.len(), "Party healed");
        Ok(())
    }

    /// Use a Revive on party slot `slot`
    pub fn revive(&mut self, slot: usize) -> Result<String, GameError> {
        self.use_item(Item::Revive, Some(slot))
    }

    pub fn use_item(&mut self, item: Item, target: Option<usize>) -> Result<String, GameError> {
        self.session.use_item(item, target, &self.config)
    }

    pub fn buy_ball(&mut self, ball: Ball) -> Result<(), GameError> {
        self.session.buy_ball(ball)
    }

    pub fn buy_item(&mut self, item: Item) -> Result<(), GameError> {
        self.session.buy_item(item)
    }

    pub fn send_to_party(&mut self, pc_index: usize) -> Result<usize, GameError> {
        self.session.send_to_party(pc_index)
    }

    pub fn set_active(&mut self, index: usize) -> Result<(), GameError> {
        self.session.set_active(index)
    }

    /// Throw everything away and start over
    pub fn reset(&mut self) {
        self.session = Session::new(&self.config);
        self.busy = false;
    }
}

/// The wild creature picks a random move with PP left; with none left it
/// uses the default move without spending anything.
fn wild_action<R: Rng + ?Sized>(
    wild: &mut Creature,
    target: &mut Creature,
    rng: &mut R,
) -> ActionOutcome {
    let usable: Vec<usize> = wild.usable_moves().collect();
    if usable.is_empty() {
        let struggle = Move::fallback("Struggle");
        return perform_move(wild, target, &struggle, true, rng);
    }
    let idx = usable[rng.gen_range(0..usable.len())];
    resolve_action(wild, target, idx, true, rng)
}
