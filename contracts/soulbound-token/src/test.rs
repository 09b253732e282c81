#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

// -------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------

fn setup(env: &Env) -> (SoulboundTokenClient<'_>, Address) {
    let admin = Address::generate(env);
    let contract_id = env.register(SoulboundToken, ());
    let client = SoulboundTokenClient::new(env, &contract_id);
    env.mock_all_auths();
    client.init(&admin);
    (client, admin)
}

// -------------------------------------------------------------------
// 1. Initialization
// -------------------------------------------------------------------

#[test]
fn test_init_rejects_reinit() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    let result = client.try_init(&admin);
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

// -------------------------------------------------------------------
// 2. Mint
// -------------------------------------------------------------------

#[test]
fn test_mint_assigns_monotonic_ids_from_one() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    let holder1 = Address::generate(&env);
    let holder2 = Address::generate(&env);

    assert_eq!(client.mint(&admin, &holder1), 1);
    assert_eq!(client.mint(&admin, &holder2), 2);
    assert_eq!(client.mint(&admin, &holder1), 3);
}

#[test]
fn test_mint_binds_owner() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    let holder = Address::generate(&env);
    let token_id = client.mint(&admin, &holder);

    assert_eq!(client.owner_of(&token_id), holder);
}

#[test]
fn test_mint_rejects_non_admin() {
    let env = Env::default();
    let (client, _) = setup(&env);
    env.mock_all_auths();

    let intruder = Address::generate(&env);
    let holder = Address::generate(&env);
    let result = client.try_mint(&intruder, &holder);
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));
}

// -------------------------------------------------------------------
// 3. Existence
// -------------------------------------------------------------------

#[test]
fn test_exists_roundtrip() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    assert!(!client.exists(&1u64));

    let holder = Address::generate(&env);
    let token_id = client.mint(&admin, &holder);
    assert!(client.exists(&token_id));
}

#[test]
fn test_id_zero_is_never_issued() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    let holder = Address::generate(&env);
    client.mint(&admin, &holder);
    assert!(!client.exists(&0u64));
}

#[test]
fn test_owner_of_unknown_token_fails() {
    let env = Env::default();
    let (client, _) = setup(&env);

    let result = client.try_owner_of(&42u64);
    assert_eq!(result, Err(Ok(Error::TokenNotFound)));
}

// -------------------------------------------------------------------
// 4. Soulbound invariant
// -------------------------------------------------------------------

#[test]
fn test_transfer_always_rejected() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    let holder = Address::generate(&env);
    let other = Address::generate(&env);
    let token_id = client.mint(&admin, &holder);

    // Even the bound owner with full authorization cannot move the token.
    let result = client.try_transfer(&holder, &other, &token_id);
    assert_eq!(result, Err(Ok(Error::SoulboundViolation)));

    assert_eq!(client.owner_of(&token_id), holder);
}

#[test]
fn test_burn_always_rejected() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    env.mock_all_auths();

    let holder = Address::generate(&env);
    let token_id = client.mint(&admin, &holder);

    let result = client.try_burn(&holder, &token_id);
    assert_eq!(result, Err(Ok(Error::SoulboundViolation)));

    // Token still exists after the rejected revocation.
    assert!(client.exists(&token_id));
}

#[test]
fn test_transfer_of_unknown_token_still_rejected() {
    let env = Env::default();
    let (client, _) = setup(&env);
    env.mock_all_auths();

    let a = Address::generate(&env);
    let b = Address::generate(&env);
    let result = client.try_transfer(&a, &b, &999u64);
    assert_eq!(result, Err(Ok(Error::SoulboundViolation)));
}
