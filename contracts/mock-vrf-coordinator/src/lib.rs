#![no_std]

//! # Mock VRF Coordinator
//!
//! Local stand-in for a verifiable randomness coordinator, used by tests and
//! local networks. Consumers are grouped under funded subscriptions; each
//! request is answered by whoever calls `fulfill_random_words`, which charges
//! a flat fee and calls the consumer back with words drawn from the ledger
//! PRNG.
//!
//! The words are NOT verifiable randomness. Never deploy this next to real
//! value.

use soroban_sdk::{
    contract, contractclient, contracterror, contractevent, contractimpl, contracttype, Address,
    BytesN, Env, Vec,
};

// ═══════════════════════════════════════════════════════════════════════════════
//  Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvSubscriptionCreated {
    #[topic]
    pub subscription_id: u64,
    pub owner: Address,
}

#[contractevent]
pub struct EvSubscriptionFunded {
    #[topic]
    pub subscription_id: u64,
    pub old_balance: i128,
    pub new_balance: i128,
}

#[contractevent]
pub struct EvConsumerAdded {
    #[topic]
    pub subscription_id: u64,
    pub consumer: Address,
}

#[contractevent]
pub struct EvRandomWordsRequested {
    #[topic]
    pub request_id: u64,
    pub subscription_id: u64,
    pub consumer: Address,
    pub key_hash: BytesN<32>,
    pub num_words: u32,
}

#[contractevent]
pub struct EvRandomWordsFulfilled {
    #[topic]
    pub request_id: u64,
    pub payment: i128,
    pub success: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Consumer interface
// ═══════════════════════════════════════════════════════════════════════════════

#[contractclient(name = "VrfConsumerClient")]
pub trait VrfConsumer {
    fn raw_fulfill_random_words(
        env: Env,
        coordinator: Address,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> u32;
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors, types, constants
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockVrfError {
    NonexistentRequest = 1,
    InvalidSubscription = 2,
    InvalidConsumer = 3,
    InsufficientBalance = 4,
    InvalidNumWords = 5,
    InvalidRandomWords = 6,
    InvalidAmount = 7,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub owner: Address,
    pub balance: i128,
    pub consumers: Vec<Address>,
    pub request_count: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RandomWordsRequest {
    pub subscription_id: u64,
    pub consumer: Address,
    pub num_words: u32,
    pub callback_gas_limit: u32,
    pub requested_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
enum MockKey {
    NextSubscriptionId,
    NextRequestId,
    Subscription(u64),
    Request(u64),
}

/// Flat fee charged to the subscription per fulfillment.
pub const BASE_FEE: i128 = 100_000;

pub const MAX_NUM_WORDS: u32 = 500;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct MockVrfCoordinator;

#[contractimpl]
impl MockVrfCoordinator {
    // ─── Subscriptions ─────────────────────────────────────────────────────

    pub fn create_subscription(env: Env, owner: Address) -> u64 {
        owner.require_auth();

        let sub_id: u64 = env
            .storage()
            .instance()
            .get(&MockKey::NextSubscriptionId)
            .unwrap_or(1);
        env.storage()
            .instance()
            .set(&MockKey::NextSubscriptionId, &(sub_id + 1));

        let sub = Subscription {
            owner: owner.clone(),
            balance: 0,
            consumers: Vec::new(&env),
            request_count: 0,
        };
        env.storage()
            .instance()
            .set(&MockKey::Subscription(sub_id), &sub);

        EvSubscriptionCreated {
            subscription_id: sub_id,
            owner,
        }
        .publish(&env);
        sub_id
    }

    /// Credit a subscription. The mock keeps a plain counter; no tokens move.
    pub fn fund_subscription(env: Env, subscription_id: u64, amount: i128) -> Result<(), MockVrfError> {
        if amount <= 0 {
            return Err(MockVrfError::InvalidAmount);
        }
        let mut sub = Self::read_subscription(&env, subscription_id)?;
        let old_balance = sub.balance;
        sub.balance = old_balance.saturating_add(amount);
        Self::write_subscription(&env, subscription_id, &sub);

        EvSubscriptionFunded {
            subscription_id,
            old_balance,
            new_balance: sub.balance,
        }
        .publish(&env);
        Ok(())
    }

    pub fn add_consumer(env: Env, subscription_id: u64, consumer: Address) -> Result<(), MockVrfError> {
        let mut sub = Self::read_subscription(&env, subscription_id)?;
        sub.owner.require_auth();

        if !sub.consumers.contains(&consumer) {
            sub.consumers.push_back(consumer.clone());
            Self::write_subscription(&env, subscription_id, &sub);
            EvConsumerAdded {
                subscription_id,
                consumer,
            }
            .publish(&env);
        }
        Ok(())
    }

    // ─── Requests ──────────────────────────────────────────────────────────

    pub fn request_random_words(
        env: Env,
        consumer: Address,
        key_hash: BytesN<32>,
        subscription_id: u64,
        _request_confirmations: u32,
        callback_gas_limit: u32,
        num_words: u32,
    ) -> Result<u64, MockVrfError> {
        consumer.require_auth();

        let mut sub = Self::read_subscription(&env, subscription_id)?;
        if !sub.consumers.contains(&consumer) {
            return Err(MockVrfError::InvalidConsumer);
        }
        if num_words == 0 || num_words > MAX_NUM_WORDS {
            return Err(MockVrfError::InvalidNumWords);
        }

        let request_id: u64 = env
            .storage()
            .instance()
            .get(&MockKey::NextRequestId)
            .unwrap_or(1);
        env.storage()
            .instance()
            .set(&MockKey::NextRequestId, &(request_id + 1));

        let request = RandomWordsRequest {
            subscription_id,
            consumer: consumer.clone(),
            num_words,
            callback_gas_limit,
            requested_ledger: env.ledger().sequence(),
        };
        env.storage()
            .instance()
            .set(&MockKey::Request(request_id), &request);

        sub.request_count += 1;
        Self::write_subscription(&env, subscription_id, &sub);

        EvRandomWordsRequested {
            request_id,
            subscription_id,
            consumer,
            key_hash,
            num_words,
        }
        .publish(&env);
        Ok(request_id)
    }

    /// Answer `request_id` with PRNG words. Returns whether the consumer
    /// accepted the callback; the request is consumed either way.
    pub fn fulfill_random_words(
        env: Env,
        request_id: u64,
        consumer: Address,
    ) -> Result<bool, MockVrfError> {
        let request = Self::read_request(&env, request_id)?;
        let mut words = Vec::new(&env);
        for _ in 0..request.num_words {
            words.push_back(env.prng().gen::<u64>());
        }
        Self::fulfill(&env, request_id, request, consumer, words)
    }

    /// Answer `request_id` with caller-chosen words.
    pub fn fulfill_with_words(
        env: Env,
        request_id: u64,
        consumer: Address,
        words: Vec<u64>,
    ) -> Result<bool, MockVrfError> {
        let request = Self::read_request(&env, request_id)?;
        Self::fulfill(&env, request_id, request, consumer, words)
    }

    // ─── Read ──────────────────────────────────────────────────────────────

    pub fn get_subscription(env: Env, subscription_id: u64) -> Option<Subscription> {
        env.storage()
            .instance()
            .get(&MockKey::Subscription(subscription_id))
    }

    pub fn get_request(env: Env, request_id: u64) -> Option<RandomWordsRequest> {
        env.storage().instance().get(&MockKey::Request(request_id))
    }

    // ─── Internal helpers ──────────────────────────────────────────────────

    fn fulfill(
        env: &Env,
        request_id: u64,
        request: RandomWordsRequest,
        consumer: Address,
        words: Vec<u64>,
    ) -> Result<bool, MockVrfError> {
        if request.consumer != consumer {
            return Err(MockVrfError::InvalidConsumer);
        }
        if words.len() != request.num_words {
            return Err(MockVrfError::InvalidRandomWords);
        }

        let mut sub = Self::read_subscription(env, request.subscription_id)?;
        if sub.balance < BASE_FEE {
            return Err(MockVrfError::InsufficientBalance);
        }
        sub.balance -= BASE_FEE;
        Self::write_subscription(env, request.subscription_id, &sub);

        // Consumed before the callback so a request is answered at most once.
        env.storage()
            .instance()
            .remove(&MockKey::Request(request_id));

        let client = VrfConsumerClient::new(env, &consumer);
        let success = matches!(
            client.try_raw_fulfill_random_words(
                &env.current_contract_address(),
                &request_id,
                &words,
            ),
            Ok(Ok(_))
        );

        EvRandomWordsFulfilled {
            request_id,
            payment: BASE_FEE,
            success,
        }
        .publish(env);
        Ok(success)
    }

    fn read_subscription(env: &Env, subscription_id: u64) -> Result<Subscription, MockVrfError> {
        env.storage()
            .instance()
            .get(&MockKey::Subscription(subscription_id))
            .ok_or(MockVrfError::InvalidSubscription)
    }

    fn write_subscription(env: &Env, subscription_id: u64, sub: &Subscription) {
        env.storage()
            .instance()
            .set(&MockKey::Subscription(subscription_id), sub);
    }

    fn read_request(env: &Env, request_id: u64) -> Result<RandomWordsRequest, MockVrfError> {
        env.storage()
            .instance()
            .get(&MockKey::Request(request_id))
            .ok_or(MockVrfError::NonexistentRequest)
    }
}

#[cfg(test)]
mod test;
