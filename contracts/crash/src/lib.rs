#![no_std]

//! # Crash
//!
//! A round-based wagering game paid in the network's native asset. Players
//! stake during an open betting window; once the round goes live a payout
//! multiplier grows every ledger, and each player may cash out once at the
//! current multiplier. Whoever is still in when the live window closes loses
//! their stake.
//!
//! ## Round flow
//! 1. **Open**: `enter` escrows the stake. Nothing else moves.
//! 2. **Live**: entered after `betting_window_ledgers` by `perform_upkeep`.
//!    `cash_out` pays `stake × multiplier(elapsed)`. Once `live_window_ledgers`
//!    have passed, `cash_out` fails with `AlreadyLost` even if nobody has run
//!    the upkeep yet.
//! 3. **AwaitingResolution**: entered after `live_window_ledgers` by
//!    `perform_upkeep`, which requests randomness from the VRF coordinator.
//!    Every player that has not cashed out has lost at this point.
//! 4. `raw_fulfill_random_words` (coordinator only) derives the crash point,
//!    moves forfeited stakes into the bankroll and reopens a fresh round.
//!
//! `check_upkeep` / `perform_upkeep` are permissionless so any automation
//! network (or anyone else) can drive the clock. `perform_upkeep` always
//! re-checks due-ness itself.
//!
//! ## Funds
//! `held_funds = escrowed + bankroll` always equals the contract's balance of
//! the native token. `escrowed` is the sum of stakes still in play; the
//! bankroll holds operator funding and forfeited stakes and pays the profit
//! part of every cash-out. A cash-out whose profit exceeds the bankroll is
//! rejected, so escrowed stakes never back another player's payout.
//!
//! ## Liveness
//! There is no fulfillment timeout. If the coordinator never calls back, the
//! round stays in `AwaitingResolution` forever: no new entries, no cash-outs,
//! and the forfeited stakes stay locked in escrow. Operators must monitor the
//! VRF subscription balance and the `EvResolutionRequested` event.

use soroban_sdk::{
    contract, contractclient, contracterror, contractevent, contractimpl, contracttype, log,
    panic_with_error, token, Address, Bytes, BytesN, Env, Map, Vec,
};

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvEnteredGame {
    #[topic]
    pub round_id: u64,
    pub player: Address,
    pub stake: i128,
}

#[contractevent]
pub struct EvCashedOut {
    #[topic]
    pub round_id: u64,
    pub player: Address,
    pub payout: i128,
    pub multiplier_bps: u32,
}

/// Emitted when betting closes and the multiplier starts running.
#[contractevent]
pub struct EvRoundLive {
    #[topic]
    pub round_id: u64,
    pub players: u32,
}

#[contractevent]
pub struct EvResolutionRequested {
    #[topic]
    pub round_id: u64,
    pub request_id: u64,
}

/// Emitted once the crash point is known and the next round is open.
#[contractevent]
pub struct EvRoundResolved {
    #[topic]
    pub round_id: u64,
    pub crash_point_bps: u32,
    pub forfeited: i128,
    pub losers: u32,
}

#[contractevent]
pub struct EvBankrollFunded {
    pub from: Address,
    pub amount: i128,
}

#[contractevent]
pub struct EvBankrollWithdrawn {
    pub to: Address,
    pub amount: i128,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  External trait interfaces
// ═══════════════════════════════════════════════════════════════════════════════

/// Verifiable randomness coordinator.
///
/// Requests are billed to `subscription_id`; the coordinator later calls
/// `raw_fulfill_random_words` on `consumer` with `num_words` words.
#[contractclient(name = "VrfCoordinatorClient")]
pub trait VrfCoordinator {
    fn request_random_words(
        env: Env,
        consumer: Address,
        key_hash: BytesN<32>,
        subscription_id: u64,
        request_confirmations: u32,
        callback_gas_limit: u32,
        num_words: u32,
    ) -> u64;
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrashError {
    NotInitialized = 1,
    InvalidConfig = 2,
    InsufficientStake = 3,
    RoundNotOpen = 4,
    AlreadyEntered = 5,
    RoundFull = 6,
    NotPlaying = 7,
    AlreadyCashedOut = 8,
    RoundNotLive = 9,
    AlreadyLost = 10,
    UpkeepNotNeeded = 11,
    UnknownRequest = 12,
    Unauthorized = 13,
    MissingRandomWords = 14,
    InsufficientBankroll = 15,
    BankrollLocked = 16,
    InvalidAmount = 17,
    EscrowMismatch = 18,
    Overflow = 19,
    PlayerIndexOutOfRange = 20,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// 1.0x in basis points.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Upper bound for `CrashConfig::max_players`. Keeps the round entry and
/// the resolution loop inside host limits.
pub const MAX_PLAYERS_PER_ROUND: u32 = 200;

pub const DEFAULT_BETTING_WINDOW_LEDGERS: u32 = 10;
pub const DEFAULT_LIVE_WINDOW_LEDGERS: u32 = 4;

/// 0.01 XLM in stroops.
pub const DEFAULT_MINIMUM_STAKE: i128 = 100_000;

pub const DEFAULT_REQUEST_CONFIRMATIONS: u32 = 3;
pub const DEFAULT_CALLBACK_GAS_LIMIT: u32 = 500_000;
pub const DEFAULT_NUM_WORDS: u32 = 1;

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// TTL expressed in human-readable time units (30 days)
const TTL_SECONDS: u32 = 30 * 24 * 60 * 60;

/// TTL for round storage in ledgers: 30 * 24 * 60 * 60 / 5 = 518,400 ledgers
const ROUND_TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Round state & storage keys
// ═══════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RoundPhase {
    Open = 0,
    Live = 1,
    AwaitingResolution = 2,
}

/// Immutable game parameters, fixed at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrashConfig {
    /// Stellar Asset Contract of the native asset.
    pub token: Address,
    pub coordinator: Address,
    pub subscription_id: u64,
    /// Gas lane selector forwarded to the coordinator.
    pub key_hash: BytesN<32>,
    pub request_confirmations: u32,
    pub callback_gas_limit: u32,
    pub num_words: u32,
    pub minimum_stake: i128,
    pub betting_window_ledgers: u32,
    pub live_window_ledgers: u32,
    pub growth_bps_per_ledger: u32,
    pub max_multiplier_bps: u32,
    /// Entries accepted per round, at most `MAX_PLAYERS_PER_ROUND`.
    pub max_players: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub player: Address,
    pub stake: i128,
    pub cashed_out: bool,
    pub payout: i128,
    pub multiplier_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    pub round_id: u64,
    pub phase: RoundPhase,
    pub phase_started_ledger: u32,
    /// Insertion order; resolution walks this list.
    pub players: Vec<Address>,
    pub entries: Map<Address, Entry>,
    pub pending_request_id: Option<u64>,
    /// Stakes of entries that have not cashed out.
    pub escrowed: i128,
}

impl Round {
    fn fresh(env: &Env, round_id: u64, started_ledger: u32) -> Round {
        Round {
            round_id,
            phase: RoundPhase::Open,
            phase_started_ledger: started_ledger,
            players: Vec::new(env),
            entries: Map::new(env),
            pending_request_id: None,
            escrowed: 0,
        }
    }
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Config,
    Round,
    Bankroll,
    LastCrashPoint,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Payout engine
// ═══════════════════════════════════════════════════════════════════════════════

/// Multiplier after `elapsed_ledgers` of live time: linear growth from 1.0x,
/// capped at `max_multiplier_bps`.
pub fn multiplier_bps(elapsed_ledgers: u32, growth_bps_per_ledger: u32, max_multiplier_bps: u32) -> u32 {
    let grown = (BPS_DENOMINATOR as u64)
        .saturating_add((elapsed_ledgers as u64).saturating_mul(growth_bps_per_ledger as u64));
    if grown > max_multiplier_bps as u64 {
        max_multiplier_bps
    } else {
        grown as u32
    }
}

pub fn payout_for(stake: i128, multiplier_bps: u32) -> Result<i128, CrashError> {
    stake
        .checked_mul(multiplier_bps as i128)
        .ok_or(CrashError::Overflow)?
        .checked_div(BPS_DENOMINATOR as i128)
        .ok_or(CrashError::Overflow)
}

/// Maps a random word uniformly-ish onto `[1.0x, max_multiplier_bps]`.
pub fn crash_point_bps(word: u64, max_multiplier_bps: u32) -> u32 {
    let span = max_multiplier_bps.saturating_sub(BPS_DENOMINATOR) as u64 + 1;
    BPS_DENOMINATOR + (word % span) as u32
}

/// Whether the round's current phase has run its course at ledger `now`.
pub fn transition_due(round: &Round, config: &CrashConfig, now: u32) -> bool {
    let elapsed = now.saturating_sub(round.phase_started_ledger);
    match round.phase {
        RoundPhase::Open => elapsed >= config.betting_window_ledgers,
        RoundPhase::Live => elapsed >= config.live_window_ledgers,
        RoundPhase::AwaitingResolution => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct CrashContract;

#[contractimpl]
impl CrashContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, admin: Address, config: CrashConfig) {
        if let Err(err) = Self::validate_config(&config) {
            panic_with_error!(&env, err);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::Bankroll, &0i128);

        let round = Round::fresh(&env, 1, env.ledger().sequence());
        Self::write_round(&env, &round);
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Player actions
    // ───────────────────────────────────────────────────────────────────────────

    /// Stake `stake` stroops on the current round. Only while the round is open.
    pub fn enter(env: Env, player: Address, stake: i128) -> Result<(), CrashError> {
        player.require_auth();

        let config = Self::load_config(&env)?;
        let mut round = Self::read_round(&env)?;
        if round.phase != RoundPhase::Open {
            return Err(CrashError::RoundNotOpen);
        }
        if stake < config.minimum_stake {
            return Err(CrashError::InsufficientStake);
        }
        if round.entries.contains_key(player.clone()) {
            return Err(CrashError::AlreadyEntered);
        }
        if round.players.len() >= config.max_players {
            return Err(CrashError::RoundFull);
        }

        token::TokenClient::new(&env, &config.token).transfer(
            &player,
            &env.current_contract_address(),
            &stake,
        );

        round.escrowed = round
            .escrowed
            .checked_add(stake)
            .ok_or(CrashError::Overflow)?;
        round.players.push_back(player.clone());
        round.entries.set(
            player.clone(),
            Entry {
                player: player.clone(),
                stake,
                cashed_out: false,
                payout: 0,
                multiplier_bps: 0,
            },
        );

        EvEnteredGame {
            round_id: round.round_id,
            player,
            stake,
        }
        .publish(&env);

        Self::write_round(&env, &round);
        Ok(())
    }

    /// Lock in `stake × multiplier` while the round is live. Returns the payout.
    ///
    /// Once the live window has elapsed the player has lost, even if nobody
    /// has run the upkeep yet.
    pub fn cash_out(env: Env, player: Address) -> Result<i128, CrashError> {
        player.require_auth();

        let config = Self::load_config(&env)?;
        let mut round = Self::read_round(&env)?;
        let mut entry = round
            .entries
            .get(player.clone())
            .ok_or(CrashError::NotPlaying)?;
        if entry.cashed_out {
            return Err(CrashError::AlreadyCashedOut);
        }

        match round.phase {
            RoundPhase::Open => return Err(CrashError::RoundNotLive),
            RoundPhase::AwaitingResolution => return Err(CrashError::AlreadyLost),
            RoundPhase::Live => {}
        }

        let elapsed = Self::elapsed_in_phase(&env, &round);
        if elapsed >= config.live_window_ledgers {
            return Err(CrashError::AlreadyLost);
        }

        let multiplier = multiplier_bps(
            elapsed,
            config.growth_bps_per_ledger,
            config.max_multiplier_bps,
        );
        let payout = payout_for(entry.stake, multiplier)?;
        let profit = payout
            .checked_sub(entry.stake)
            .ok_or(CrashError::Overflow)?;

        let bankroll = Self::read_bankroll(&env);
        if profit > bankroll {
            return Err(CrashError::InsufficientBankroll);
        }

        entry.cashed_out = true;
        entry.payout = payout;
        entry.multiplier_bps = multiplier;
        round.escrowed = round
            .escrowed
            .checked_sub(entry.stake)
            .ok_or(CrashError::Overflow)?;
        round.entries.set(player.clone(), entry);
        Self::write_bankroll(&env, bankroll - profit);

        token::TokenClient::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &player,
            &payout,
        );

        EvCashedOut {
            round_id: round.round_id,
            player,
            payout,
            multiplier_bps: multiplier,
        }
        .publish(&env);

        Self::write_round(&env, &round);
        Ok(payout)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Upkeep
    // ───────────────────────────────────────────────────────────────────────────

    /// Whether `perform_upkeep` would succeed right now. The payload is
    /// returned untouched for the caller to forward.
    pub fn check_upkeep(env: Env, check_data: Bytes) -> Result<(bool, Bytes), CrashError> {
        let config = Self::load_config(&env)?;
        let round = Self::read_round(&env)?;
        let due = transition_due(&round, &config, env.ledger().sequence());
        Ok((due, check_data))
    }

    /// Advance the round one phase if it is due. Returns the new phase.
    pub fn perform_upkeep(env: Env, _perform_data: Bytes) -> Result<RoundPhase, CrashError> {
        let config = Self::load_config(&env)?;
        let mut round = Self::read_round(&env)?;
        let now = env.ledger().sequence();

        if !transition_due(&round, &config, now) {
            return Err(CrashError::UpkeepNotNeeded);
        }

        match round.phase {
            RoundPhase::Open => {
                round.phase = RoundPhase::Live;
                round.phase_started_ledger = now;
                log!(&env, "round live", round.round_id, round.players.len());
                EvRoundLive {
                    round_id: round.round_id,
                    players: round.players.len(),
                }
                .publish(&env);
            }
            RoundPhase::Live => {
                let coordinator = VrfCoordinatorClient::new(&env, &config.coordinator);
                let request_id = coordinator.request_random_words(
                    &env.current_contract_address(),
                    &config.key_hash,
                    &config.subscription_id,
                    &config.request_confirmations,
                    &config.callback_gas_limit,
                    &config.num_words,
                );
                round.pending_request_id = Some(request_id);
                round.phase = RoundPhase::AwaitingResolution;
                round.phase_started_ledger = now;
                log!(&env, "crash requested", round.round_id, request_id);
                EvResolutionRequested {
                    round_id: round.round_id,
                    request_id,
                }
                .publish(&env);
            }
            RoundPhase::AwaitingResolution => return Err(CrashError::UpkeepNotNeeded),
        }

        Self::write_round(&env, &round);
        Ok(round.phase)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Randomness callback
    // ───────────────────────────────────────────────────────────────────────────

    /// Coordinator callback. Resolves the round tied to `request_id` and opens
    /// the next one. Returns the crash point in basis points.
    pub fn raw_fulfill_random_words(
        env: Env,
        caller: Address,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<u32, CrashError> {
        caller.require_auth();

        let config = Self::load_config(&env)?;
        if caller != config.coordinator {
            return Err(CrashError::Unauthorized);
        }

        let round = Self::read_round(&env)?;
        if round.pending_request_id != Some(request_id) {
            return Err(CrashError::UnknownRequest);
        }
        let word = random_words.first().ok_or(CrashError::MissingRandomWords)?;
        let crash_point = crash_point_bps(word, config.max_multiplier_bps);

        let mut forfeited: i128 = 0;
        let mut losers: u32 = 0;
        for player in round.players.iter() {
            let entry = round
                .entries
                .get(player)
                .ok_or(CrashError::EscrowMismatch)?;
            if !entry.cashed_out {
                forfeited = forfeited
                    .checked_add(entry.stake)
                    .ok_or(CrashError::Overflow)?;
                losers += 1;
            }
        }
        if forfeited != round.escrowed {
            return Err(CrashError::EscrowMismatch);
        }

        let bankroll = Self::read_bankroll(&env)
            .checked_add(forfeited)
            .ok_or(CrashError::Overflow)?;
        Self::write_bankroll(&env, bankroll);
        env.storage()
            .instance()
            .set(&DataKey::LastCrashPoint, &crash_point);

        log!(&env, "round crashed", round.round_id, crash_point);
        EvRoundResolved {
            round_id: round.round_id,
            crash_point_bps: crash_point,
            forfeited,
            losers,
        }
        .publish(&env);

        let next_id = round
            .round_id
            .checked_add(1)
            .ok_or(CrashError::Overflow)?;
        let next = Round::fresh(&env, next_id, env.ledger().sequence());
        Self::write_round(&env, &next);
        Ok(crash_point)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Bankroll & Admin
    // ───────────────────────────────────────────────────────────────────────────

    /// Add house liquidity used to pay cash-out profits.
    pub fn fund_bankroll(env: Env, from: Address, amount: i128) -> Result<(), CrashError> {
        from.require_auth();
        if amount <= 0 {
            return Err(CrashError::InvalidAmount);
        }
        let config = Self::load_config(&env)?;

        token::TokenClient::new(&env, &config.token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );
        let bankroll = Self::read_bankroll(&env)
            .checked_add(amount)
            .ok_or(CrashError::Overflow)?;
        Self::write_bankroll(&env, bankroll);

        EvBankrollFunded { from, amount }.publish(&env);
        Ok(())
    }

    /// Withdraw house liquidity to the admin. Only between rounds: the round
    /// must be open with nobody entered.
    pub fn withdraw_bankroll(env: Env, amount: i128) -> Result<(), CrashError> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        if amount <= 0 {
            return Err(CrashError::InvalidAmount);
        }

        let config = Self::load_config(&env)?;
        let round = Self::read_round(&env)?;
        if round.phase != RoundPhase::Open || !round.players.is_empty() {
            return Err(CrashError::BankrollLocked);
        }
        let bankroll = Self::read_bankroll(&env);
        if amount > bankroll {
            return Err(CrashError::InsufficientBankroll);
        }

        Self::write_bankroll(&env, bankroll - amount);
        token::TokenClient::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &admin,
            &amount,
        );

        EvBankrollWithdrawn { to: admin, amount }.publish(&env);
        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, CrashError> {
        Self::load_admin(&env)
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), CrashError> {
        let admin = Self::load_admin(&env)?;
        admin.require_auth();
        env.storage()
            .instance()
            .set(&DataKey::Admin, &new_admin);
        Self::extend_instance(&env);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Read
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<CrashConfig, CrashError> {
        Self::load_config(&env)
    }

    pub fn get_round(env: Env) -> Result<Round, CrashError> {
        Self::read_round(&env)
    }

    pub fn get_phase(env: Env) -> Result<RoundPhase, CrashError> {
        Ok(Self::read_round(&env)?.phase)
    }

    pub fn get_minimum_stake(env: Env) -> Result<i128, CrashError> {
        Ok(Self::load_config(&env)?.minimum_stake)
    }

    pub fn get_entry(env: Env, player: Address) -> Result<Option<Entry>, CrashError> {
        Ok(Self::read_round(&env)?.entries.get(player))
    }

    /// Player at `index` in entry order for the current round.
    pub fn get_player(env: Env, index: u32) -> Result<Address, CrashError> {
        Self::read_round(&env)?
            .players
            .get(index)
            .ok_or(CrashError::PlayerIndexOutOfRange)
    }

    pub fn get_player_count(env: Env) -> Result<u32, CrashError> {
        Ok(Self::read_round(&env)?.players.len())
    }

    /// Ledgers since the current phase began.
    pub fn get_phase_elapsed(env: Env) -> Result<u32, CrashError> {
        let round = Self::read_round(&env)?;
        Ok(Self::elapsed_in_phase(&env, &round))
    }

    /// Multiplier a cash-out would get right now; 1.0x outside the live phase.
    pub fn get_current_multiplier(env: Env) -> Result<u32, CrashError> {
        let config = Self::load_config(&env)?;
        let round = Self::read_round(&env)?;
        if round.phase != RoundPhase::Live {
            return Ok(BPS_DENOMINATOR);
        }
        Ok(multiplier_bps(
            Self::elapsed_in_phase(&env, &round),
            config.growth_bps_per_ledger,
            config.max_multiplier_bps,
        ))
    }

    pub fn get_pending_request(env: Env) -> Result<Option<u64>, CrashError> {
        Ok(Self::read_round(&env)?.pending_request_id)
    }

    pub fn get_bankroll(env: Env) -> i128 {
        Self::read_bankroll(&env)
    }

    /// Escrowed stakes plus bankroll; matches the contract's token balance.
    pub fn get_held_funds(env: Env) -> Result<i128, CrashError> {
        let round = Self::read_round(&env)?;
        round
            .escrowed
            .checked_add(Self::read_bankroll(&env))
            .ok_or(CrashError::Overflow)
    }

    pub fn get_last_crash_point(env: Env) -> Option<u32> {
        env.storage().instance().get(&DataKey::LastCrashPoint)
    }

    pub fn get_current_ledger(env: Env) -> u32 {
        env.ledger().sequence()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Config & Storage
    // ═══════════════════════════════════════════════════════════════════════════

    fn validate_config(config: &CrashConfig) -> Result<(), CrashError> {
        if config.minimum_stake <= 0
            || config.betting_window_ledgers == 0
            || config.live_window_ledgers == 0
            || config.num_words == 0
            || config.max_multiplier_bps < BPS_DENOMINATOR
            || config.max_players == 0
            || config.max_players > MAX_PLAYERS_PER_ROUND
        {
            return Err(CrashError::InvalidConfig);
        }
        Ok(())
    }

    fn elapsed_in_phase(env: &Env, round: &Round) -> u32 {
        env.ledger()
            .sequence()
            .saturating_sub(round.phase_started_ledger)
    }

    fn read_round(env: &Env) -> Result<Round, CrashError> {
        env.storage()
            .persistent()
            .get(&DataKey::Round)
            .ok_or(CrashError::NotInitialized)
    }

    fn write_round(env: &Env, round: &Round) {
        env.storage().persistent().set(&DataKey::Round, round);
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Round, ROUND_TTL_LEDGERS, ROUND_TTL_LEDGERS);
        Self::extend_instance(env);
    }

    // Keep instance storage (admin, config, bankroll) alive
    fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(ROUND_TTL_LEDGERS, ROUND_TTL_LEDGERS);
    }

    fn read_bankroll(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::Bankroll)
            .unwrap_or(0)
    }

    fn write_bankroll(env: &Env, amount: i128) {
        env.storage().instance().set(&DataKey::Bankroll, &amount);
        Self::extend_instance(env);
    }

    fn load_admin(env: &Env) -> Result<Address, CrashError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(CrashError::NotInitialized)
    }

    fn load_config(env: &Env) -> Result<CrashConfig, CrashError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(CrashError::NotInitialized)
    }
}
