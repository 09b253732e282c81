//! Soulvote Competition Contract
//!
//! Runs time-boxed voting competitions over the soulbound token registry.
//! Admin creates competitions and registers participant tokens; any caller
//! holding an unused voter token id may cast exactly one vote, enforced by a
//! per-token voted flag. Winner resolution scans participants in
//! registration order and keeps the earliest-registered on ties.
//!
//! ## Competition Flow
//! 1. Admin calls `create_competition` with a strictly-future voting window
//! 2. Admin registers participant tokens while the registry confirms they exist
//! 3. Voters call `cast_vote` while the competition is active and in-window
//! 4. After `end_time`, anyone calls `get_winner`
//!
//! ## Known quirks (inherited behavior, see DESIGN.md)
//! - The voted flag is global per token, not per competition: one vote ever.
//! - `cast_vote` does not require authorization from the voter token's owner.
//! - `register_participant` does not reject duplicate registrations.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{
    contract, contractclient, contracterror, contractevent, contractimpl, contracttype, Address,
    Env, String, Vec,
};
use soulvote_shared::{validate_schedule, window_contains, ScheduleError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400; // ~30 days

// ---------------------------------------------------------------------------
// Registry interface
// ---------------------------------------------------------------------------

/// The slice of the soulbound token registry this contract consumes.
#[contractclient(name = "RegistryClient")]
pub trait SoulboundRegistry {
    fn exists(env: Env, token_id: u64) -> bool;
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Registry,
    NextCompetitionId,
    Competition(u64),
    /// (competition_id, participant_token_id) -> tally
    Votes(u64, u64),
    /// voter_token_id -> record, global across competitions
    Voter(u64),
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Competition {
    pub name: String,
    pub description: String,
    pub start_time: u64,
    pub end_time: u64,
    pub is_active: bool,
    /// Registration order; duplicates are kept as registered.
    pub participants: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRecord {
    pub has_voted: bool,
    pub last_vote_time: u64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized    = 1,
    NotInitialized        = 2,
    NotAuthorized         = 3,
    CompetitionNotFound   = 4,
    TokenNotFound         = 5,
    InvalidTimeRange      = 6,
    InvalidStartTime      = 7,
    CompetitionInactive   = 8,
    CompetitionNotStarted = 9,
    CompetitionEnded      = 10,
    CompetitionNotEnded   = 11,
    AlreadyVoted          = 12,
    NotAParticipant       = 13,
    NoParticipants        = 14,
    Overflow              = 15,
}

impl From<ScheduleError> for Error {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidTimeRange => Error::InvalidTimeRange,
            ScheduleError::InvalidStartTime => Error::InvalidStartTime,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct CompetitionCreated {
    #[topic]
    pub competition_id: u64,
    pub name: String,
    pub start_time: u64,
    pub end_time: u64,
}

#[contractevent]
pub struct ParticipantRegistered {
    #[topic]
    pub competition_id: u64,
    pub token_id: u64,
}

#[contractevent]
pub struct VoteCast {
    #[topic]
    pub competition_id: u64,
    #[topic]
    pub voter_token_id: u64,
    pub participant_token_id: u64,
}

#[contractevent]
pub struct CompetitionStatusChanged {
    #[topic]
    pub competition_id: u64,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct CompetitionEngine;

#[contractimpl]
impl CompetitionEngine {
    /// Initialize with the admin and the soulbound token registry address.
    /// Can only be called once.
    pub fn init(env: Env, admin: Address, registry: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage()
            .instance()
            .set(&DataKey::NextCompetitionId, &0u64);
        Ok(())
    }

    /// Create a competition with a strictly-future voting window. Admin only.
    ///
    /// Ids are assigned monotonically starting at 1; id 0 is the reserved
    /// "no such competition" sentinel. A rejected creation leaves the
    /// counter untouched.
    pub fn create_competition(
        env: Env,
        admin: Address,
        name: String,
        description: String,
        start_time: u64,
        end_time: u64,
    ) -> Result<u64, Error> {
        require_admin(&env, &admin)?;
        validate_schedule(env.ledger().timestamp(), start_time, end_time)?;

        let next: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextCompetitionId)
            .ok_or(Error::NotInitialized)?;
        let competition_id = next.checked_add(1).ok_or(Error::Overflow)?;
        env.storage()
            .instance()
            .set(&DataKey::NextCompetitionId, &competition_id);

        let competition = Competition {
            name: name.clone(),
            description,
            start_time,
            end_time,
            is_active: true,
            participants: Vec::new(&env),
        };
        write_competition(&env, competition_id, &competition);

        CompetitionCreated {
            competition_id,
            name,
            start_time,
            end_time,
        }
        .publish(&env);

        Ok(competition_id)
    }

    /// Register a token as a participant in a competition. Admin only.
    ///
    /// Registration order is preserved; repeated registration of the same
    /// token appends a duplicate entry (the vote tally stays keyed by token,
    /// so duplicates still share one counter).
    pub fn register_participant(
        env: Env,
        admin: Address,
        competition_id: u64,
        token_id: u64,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        let mut competition = read_competition(&env, competition_id)?;
        require_token_exists(&env, token_id)?;

        competition.participants.push_back(token_id);
        write_competition(&env, competition_id, &competition);

        ParticipantRegistered {
            competition_id,
            token_id,
        }
        .publish(&env);

        Ok(())
    }

    /// Cast a vote for `participant_token_id` using `voter_token_id`.
    ///
    /// The competition must be active and inside its window, both tokens
    /// must exist in the registry, the voter token must never have voted
    /// before (in any competition), and the target must be a registered
    /// participant. No caller authorization is required beyond presenting a
    /// valid, unused voter token id.
    pub fn cast_vote(
        env: Env,
        competition_id: u64,
        voter_token_id: u64,
        participant_token_id: u64,
    ) -> Result<(), Error> {
        let competition = read_competition(&env, competition_id)?;

        let now = env.ledger().timestamp();
        if !competition.is_active {
            return Err(Error::CompetitionInactive);
        }
        if now < competition.start_time {
            return Err(Error::CompetitionNotStarted);
        }
        if now > competition.end_time {
            return Err(Error::CompetitionEnded);
        }

        require_token_exists(&env, voter_token_id)?;
        require_token_exists(&env, participant_token_id)?;

        let voter_key = DataKey::Voter(voter_token_id);
        let already: Option<VoterRecord> = env.storage().persistent().get(&voter_key);
        if already.map_or(false, |r| r.has_voted) {
            return Err(Error::AlreadyVoted);
        }

        if !competition.participants.contains(participant_token_id) {
            return Err(Error::NotAParticipant);
        }

        let votes_key = DataKey::Votes(competition_id, participant_token_id);
        let tally: u64 = env.storage().persistent().get(&votes_key).unwrap_or(0);
        let tally = tally.checked_add(1).ok_or(Error::Overflow)?;
        env.storage().persistent().set(&votes_key, &tally);
        env.storage()
            .persistent()
            .extend_ttl(&votes_key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);

        let record = VoterRecord {
            has_voted: true,
            last_vote_time: now,
        };
        env.storage().persistent().set(&voter_key, &record);
        env.storage()
            .persistent()
            .extend_ttl(&voter_key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);

        VoteCast {
            competition_id,
            voter_token_id,
            participant_token_id,
        }
        .publish(&env);

        Ok(())
    }

    /// Tally for a token in a competition. Returns 0 for any token that was
    /// never voted for, whether or not it is a registered participant.
    pub fn get_votes(env: Env, competition_id: u64, token_id: u64) -> Result<u64, Error> {
        read_competition(&env, competition_id)?;
        Ok(vote_count(&env, competition_id, token_id))
    }

    /// Participant tokens in registration order, duplicates included.
    pub fn get_participants(env: Env, competition_id: u64) -> Result<Vec<u64>, Error> {
        Ok(read_competition(&env, competition_id)?.participants)
    }

    /// Resolve the winner once the window has fully elapsed.
    ///
    /// Only callable strictly after `end_time`, regardless of `is_active`.
    /// Participants are scanned in registration order and a later entry only
    /// displaces the front-runner with a strictly greater tally, so the
    /// earliest-registered participant wins ties.
    pub fn get_winner(env: Env, competition_id: u64) -> Result<u64, Error> {
        let competition = read_competition(&env, competition_id)?;

        if env.ledger().timestamp() <= competition.end_time {
            return Err(Error::CompetitionNotEnded);
        }
        if competition.participants.is_empty() {
            return Err(Error::NoParticipants);
        }

        let mut winner = competition.participants.get_unchecked(0);
        let mut best = vote_count(&env, competition_id, winner);
        for token_id in competition.participants.iter().skip(1) {
            let tally = vote_count(&env, competition_id, token_id);
            if tally > best {
                winner = token_id;
                best = tally;
            }
        }
        Ok(winner)
    }

    /// Flip a competition's active flag. Admin only, allowed at any time
    /// relative to the voting window.
    pub fn set_competition_active(
        env: Env,
        admin: Address,
        competition_id: u64,
        is_active: bool,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        let mut competition = read_competition(&env, competition_id)?;
        competition.is_active = is_active;
        write_competition(&env, competition_id, &competition);

        CompetitionStatusChanged {
            competition_id,
            is_active,
        }
        .publish(&env);

        Ok(())
    }

    /// Full competition record for off-chain display.
    pub fn get_competition(env: Env, competition_id: u64) -> Result<Competition, Error> {
        read_competition(&env, competition_id)
    }

    /// Whether a voter token has spent its (single, global) vote.
    pub fn has_voted(env: Env, token_id: u64) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Voter(token_id))
            .map_or(false, |r: VoterRecord| r.has_voted)
    }

    /// True while the competition accepts votes: active flag set and the
    /// current time inside `[start_time, end_time]`.
    pub fn is_live(env: Env, competition_id: u64) -> Result<bool, Error> {
        let competition = read_competition(&env, competition_id)?;
        Ok(competition.is_active
            && window_contains(
                env.ledger().timestamp(),
                competition.start_time,
                competition.end_time,
            ))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    caller.require_auth();
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn require_token_exists(env: &Env, token_id: u64) -> Result<(), Error> {
    let registry: Address = env
        .storage()
        .instance()
        .get(&DataKey::Registry)
        .ok_or(Error::NotInitialized)?;
    if !RegistryClient::new(env, &registry).exists(&token_id) {
        return Err(Error::TokenNotFound);
    }
    Ok(())
}

fn read_competition(env: &Env, competition_id: u64) -> Result<Competition, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Competition(competition_id))
        .ok_or(Error::CompetitionNotFound)
}

fn write_competition(env: &Env, competition_id: u64, competition: &Competition) {
    let key = DataKey::Competition(competition_id);
    env.storage().persistent().set(&key, competition);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn vote_count(env: &Env, competition_id: u64, token_id: u64) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Votes(competition_id, token_id))
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
