#![cfg(test)]

use crate::{MockVrfCoordinator, MockVrfCoordinatorClient, MockVrfError, BASE_FEE};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{vec, Address, BytesN, Env};

// ════════════════════════════════════════════════════════════════════════════
//  Mock consumers
// ════════════════════════════════════════════════════════════════════════════

mod recording {
    use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

    #[contracttype]
    #[derive(Clone)]
    enum ConsumerKey {
        Words,
        RequestId,
    }

    #[contract]
    pub struct RecordingConsumer;

    #[contractimpl]
    impl RecordingConsumer {
        pub fn raw_fulfill_random_words(
            env: Env,
            _coordinator: Address,
            request_id: u64,
            random_words: Vec<u64>,
        ) -> u32 {
            env.storage().instance().set(&ConsumerKey::RequestId, &request_id);
            env.storage().instance().set(&ConsumerKey::Words, &random_words);
            random_words.len()
        }

        pub fn last_words(env: Env) -> Vec<u64> {
            env.storage()
                .instance()
                .get(&ConsumerKey::Words)
                .unwrap_or(Vec::new(&env))
        }

        pub fn last_request(env: Env) -> Option<u64> {
            env.storage().instance().get(&ConsumerKey::RequestId)
        }
    }
}

mod rejecting {
    use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, Vec};

    #[contracterror]
    #[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
    #[repr(u32)]
    pub enum RejectError {
        Rejected = 1,
    }

    #[contract]
    pub struct RejectingConsumer;

    #[contractimpl]
    impl RejectingConsumer {
        pub fn raw_fulfill_random_words(
            _env: Env,
            _coordinator: Address,
            _request_id: u64,
            _random_words: Vec<u64>,
        ) -> Result<u32, RejectError> {
            Err(RejectError::Rejected)
        }
    }
}

use recording::{RecordingConsumer, RecordingConsumerClient};
use rejecting::RejectingConsumer;

// ════════════════════════════════════════════════════════════════════════════
//  Test Helpers
// ════════════════════════════════════════════════════════════════════════════

const FUND_AMOUNT: i128 = 5 * BASE_FEE;

fn setup_test() -> (Env, MockVrfCoordinatorClient<'static>, Address, u64) {
    let env = Env::default();
    env.mock_all_auths();

    env.ledger().set(soroban_sdk::testutils::LedgerInfo {
        timestamp: 1_700_000_000,
        protocol_version: 25,
        sequence_number: 100,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: u32::MAX / 2,
        min_persistent_entry_ttl: u32::MAX / 2,
        max_entry_ttl: u32::MAX / 2,
    });

    let contract_id = env.register(MockVrfCoordinator, ());
    let client = MockVrfCoordinatorClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let sub_id = client.create_subscription(&owner);
    client.fund_subscription(&sub_id, &FUND_AMOUNT);

    (env, client, owner, sub_id)
}

fn key_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0x47u8; 32])
}

fn request(env: &Env, client: &MockVrfCoordinatorClient, consumer: &Address, sub_id: u64, num_words: u32) -> u64 {
    client.request_random_words(consumer, &key_hash(env), &sub_id, &3, &500_000, &num_words)
}

fn assert_vrf_error<T, E>(
    result: &Result<Result<T, E>, Result<MockVrfError, soroban_sdk::InvokeError>>,
    expected: MockVrfError,
) {
    match result {
        Err(Ok(actual)) => assert_eq!(*actual, expected),
        Err(Err(invoke_err)) => panic!("Expected {:?}, got invoke error: {:?}", expected, invoke_err),
        Ok(_) => panic!("Expected error {:?}, but operation succeeded", expected),
    }
}

// ════════════════════════════════════════════════════════════════════════════
//  Tests: Subscriptions
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn create_and_fund_subscription() {
    let (env, client, owner, sub_id) = setup_test();
    assert_eq!(sub_id, 1);

    let sub = client.get_subscription(&sub_id).unwrap();
    assert_eq!(sub.owner, owner);
    assert_eq!(sub.balance, FUND_AMOUNT);
    assert!(sub.consumers.is_empty());

    let second = client.create_subscription(&Address::generate(&env));
    assert_eq!(second, 2);
}

#[test]
fn fund_unknown_subscription_rejected() {
    let (_env, client, _owner, _sub_id) = setup_test();
    let result = client.try_fund_subscription(&99, &BASE_FEE);
    assert_vrf_error(&result, MockVrfError::InvalidSubscription);
}

#[test]
fn fund_with_zero_rejected() {
    let (_env, client, _owner, sub_id) = setup_test();
    let result = client.try_fund_subscription(&sub_id, &0);
    assert_vrf_error(&result, MockVrfError::InvalidAmount);
}

#[test]
fn add_consumer_is_idempotent() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);
    client.add_consumer(&sub_id, &consumer);
    assert_eq!(client.get_subscription(&sub_id).unwrap().consumers.len(), 1);
}

#[test]
fn add_consumer_is_authorized_by_subscription_owner() {
    let (env, client, owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);

    let auths = env.auths();
    assert_eq!(auths.len(), 1);
    assert_eq!(auths[0].0, owner);
}

// ════════════════════════════════════════════════════════════════════════════
//  Tests: Requests
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn request_ids_start_at_one_and_increment() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);

    assert_eq!(request(&env, &client, &consumer, sub_id, 1), 1);
    assert_eq!(request(&env, &client, &consumer, sub_id, 2), 2);

    let stored = client.get_request(&2).unwrap();
    assert_eq!(stored.consumer, consumer);
    assert_eq!(stored.num_words, 2);
    assert_eq!(stored.requested_ledger, 100);
    assert_eq!(client.get_subscription(&sub_id).unwrap().request_count, 2);
}

#[test]
fn request_from_unregistered_consumer_rejected() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    let result = client.try_request_random_words(&consumer, &key_hash(&env), &sub_id, &3, &500_000, &1);
    assert_vrf_error(&result, MockVrfError::InvalidConsumer);
}

#[test]
fn request_on_unknown_subscription_rejected() {
    let (env, client, _owner, _sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    let result = client.try_request_random_words(&consumer, &key_hash(&env), &42, &3, &500_000, &1);
    assert_vrf_error(&result, MockVrfError::InvalidSubscription);
}

#[test]
fn request_with_zero_words_rejected() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);
    let result = client.try_request_random_words(&consumer, &key_hash(&env), &sub_id, &3, &500_000, &0);
    assert_vrf_error(&result, MockVrfError::InvalidNumWords);
}

// ════════════════════════════════════════════════════════════════════════════
//  Tests: Fulfillment
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn fulfill_nonexistent_request_rejected() {
    let (env, client, _owner, _sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    let result = client.try_fulfill_random_words(&0, &consumer);
    assert_vrf_error(&result, MockVrfError::NonexistentRequest);
}

#[test]
fn fulfill_delivers_requested_word_count_and_charges_fee() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer_id = env.register(RecordingConsumer, ());
    let consumer = RecordingConsumerClient::new(&env, &consumer_id);
    client.add_consumer(&sub_id, &consumer_id);

    let request_id = request(&env, &client, &consumer_id, sub_id, 3);
    assert!(client.fulfill_random_words(&request_id, &consumer_id));

    assert_eq!(consumer.last_request(), Some(request_id));
    assert_eq!(consumer.last_words().len(), 3);
    assert_eq!(
        client.get_subscription(&sub_id).unwrap().balance,
        FUND_AMOUNT - BASE_FEE
    );
    assert!(client.get_request(&request_id).is_none());
}

#[test]
fn request_is_answered_at_most_once() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);

    let request_id = request(&env, &client, &consumer, sub_id, 1);
    client.fulfill_random_words(&request_id, &consumer);

    let result = client.try_fulfill_random_words(&request_id, &consumer);
    assert_vrf_error(&result, MockVrfError::NonexistentRequest);
}

#[test]
fn fulfill_with_words_passes_words_through() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer_id = env.register(RecordingConsumer, ());
    let consumer = RecordingConsumerClient::new(&env, &consumer_id);
    client.add_consumer(&sub_id, &consumer_id);

    let request_id = request(&env, &client, &consumer_id, sub_id, 2);
    let words = vec![&env, 7u64, 11u64];
    assert!(client.fulfill_with_words(&request_id, &consumer_id, &words));
    assert_eq!(consumer.last_words(), words);
}

#[test]
fn fulfill_with_wrong_word_count_rejected() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);

    let request_id = request(&env, &client, &consumer, sub_id, 2);
    let result = client.try_fulfill_with_words(&request_id, &consumer, &vec![&env, 1u64]);
    assert_vrf_error(&result, MockVrfError::InvalidRandomWords);
    assert!(client.get_request(&request_id).is_some());
}

#[test]
fn fulfill_for_other_consumer_rejected() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RecordingConsumer, ());
    let other = env.register(RecordingConsumer, ());
    client.add_consumer(&sub_id, &consumer);

    let request_id = request(&env, &client, &consumer, sub_id, 1);
    let result = client.try_fulfill_random_words(&request_id, &other);
    assert_vrf_error(&result, MockVrfError::InvalidConsumer);
}

#[test]
fn fulfill_without_balance_rejected() {
    let (env, client, owner, _sub_id) = setup_test();
    let empty_sub = client.create_subscription(&owner);
    let consumer = env.register(RecordingConsumer, ());
    client.add_consumer(&empty_sub, &consumer);

    let request_id = request(&env, &client, &consumer, empty_sub, 1);
    let result = client.try_fulfill_random_words(&request_id, &consumer);
    assert_vrf_error(&result, MockVrfError::InsufficientBalance);

    client.fund_subscription(&empty_sub, &BASE_FEE);
    assert!(client.fulfill_random_words(&request_id, &consumer));
}

#[test]
fn rejected_callback_still_consumes_request() {
    let (env, client, _owner, sub_id) = setup_test();
    let consumer = env.register(RejectingConsumer, ());
    client.add_consumer(&sub_id, &consumer);

    let request_id = request(&env, &client, &consumer, sub_id, 1);
    assert!(!client.fulfill_random_words(&request_id, &consumer));
    assert!(client.get_request(&request_id).is_none());
    assert_eq!(
        client.get_subscription(&sub_id).unwrap().balance,
        FUND_AMOUNT - BASE_FEE
    );
}
