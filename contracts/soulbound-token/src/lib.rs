//! Soulvote Soulbound Token Contract
//!
//! Registry of non-transferable identity tokens. Each token id is assigned
//! monotonically at mint and bound permanently to the address it was issued
//! to. The only ownership transition this contract ever performs is
//! no-owner -> owner on the mint path; `transfer` and `burn` are exposed so
//! callers get an explicit rejection instead of a missing-function trap, but
//! they fail unconditionally.
//!
//! The competition engine consumes this registry through `exists`.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{contract, contracterror, contractevent, contractimpl, contracttype, Address, Env};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400; // ~30 days

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    NextTokenId,
    Owner(u64),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    NotAuthorized      = 3,
    TokenNotFound      = 4,
    SoulboundViolation = 5,
    Overflow           = 6,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct Minted {
    #[topic]
    pub token_id: u64,
    pub owner: Address,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct SoulboundToken;

#[contractimpl]
impl SoulboundToken {
    /// Initialize with the admin allowed to mint. Can only be called once.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextTokenId, &0u64);
        Ok(())
    }

    /// Issue a new token bound to `to`. Admin only.
    ///
    /// Ids are assigned monotonically starting at 1; id 0 is never issued.
    pub fn mint(env: Env, admin: Address, to: Address) -> Result<u64, Error> {
        require_admin(&env, &admin)?;

        let next: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .ok_or(Error::NotInitialized)?;
        let token_id = next.checked_add(1).ok_or(Error::Overflow)?;
        env.storage().instance().set(&DataKey::NextTokenId, &token_id);

        let key = DataKey::Owner(token_id);
        env.storage().persistent().set(&key, &to);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);

        Minted {
            token_id,
            owner: to,
        }
        .publish(&env);

        Ok(token_id)
    }

    /// Whether `token_id` has been issued. Tokens are never destroyed, so
    /// once true this can never become false again.
    pub fn exists(env: Env, token_id: u64) -> bool {
        env.storage().persistent().has(&DataKey::Owner(token_id))
    }

    /// The address `token_id` was issued to.
    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Owner(token_id))
            .ok_or(Error::TokenNotFound)
    }

    /// Always rejected: tokens are bound to their original owner for life.
    /// Kept as an entry point so wallets and indexers get a domain error
    /// rather than a missing-function failure.
    pub fn transfer(env: Env, from: Address, _to: Address, _token_id: u64) -> Result<(), Error> {
        require_initialized(&env)?;
        from.require_auth();
        Err(Error::SoulboundViolation)
    }

    /// Always rejected: revocation would be an ownership mutation.
    pub fn burn(env: Env, owner: Address, _token_id: u64) -> Result<(), Error> {
        require_initialized(&env)?;
        owner.require_auth();
        Err(Error::SoulboundViolation)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn require_initialized(env: &Env) -> Result<(), Error> {
    if !env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test;
