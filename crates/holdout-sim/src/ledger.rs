//! Gold ledger.
//!
//! A single balance, persisted on every mutation so a crash never
//! loses more than the in-flight change. Observers learn about changes
//! through `CurrencyChanged` on the bus and re-read the balance; the
//! event carries no amount.

use holdout_core::constants::CURRENCY_KEY;
use holdout_core::events::GameEvent;

use crate::bus::EventBus;
use crate::persistence::PrefStore;

#[derive(Debug, Clone)]
pub struct EconomyLedger {
    balance: u32,
}

impl EconomyLedger {
    /// Restore the persisted balance; a fresh store starts at zero.
    pub fn load(store: &PrefStore) -> Self {
        let balance = store.get(CURRENCY_KEY, 0).max(0) as u32;
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.balance >= amount
    }

    /// Credit the balance. A zero credit is a no-op: no write, no event.
    pub fn add(&mut self, amount: u32, store: &mut PrefStore, bus: &mut EventBus) {
        if amount == 0 {
            return;
        }
        self.balance = self.balance.saturating_add(amount);
        self.persist(store);
        bus.publish(&GameEvent::CurrencyChanged);
    }

    /// Debit the balance if it covers `amount`. Returns whether the
    /// debit happened; an unaffordable debit changes nothing.
    pub fn spend(&mut self, amount: u32, store: &mut PrefStore, bus: &mut EventBus) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.balance -= amount;
        self.persist(store);
        bus.publish(&GameEvent::CurrencyChanged);
        true
    }

    /// Halve the balance (rounded down) as the defeat penalty.
    /// Persisted immediately; the session-end event itself is the
    /// engine's to publish.
    pub fn apply_defeat_penalty(&mut self, store: &mut PrefStore) {
        self.balance /= 2;
        self.persist(store);
    }

    /// Zero the balance for a fresh session. No event: a new game is a
    /// wholesale reset and observers resynchronize from a snapshot.
    pub fn reset(&mut self, store: &mut PrefStore) {
        self.balance = 0;
        self.persist(store);
    }

    fn persist(&self, store: &mut PrefStore) {
        store.set(CURRENCY_KEY, i64::from(self.balance));
        if let Err(e) = store.flush() {
            eprintln!("ledger: {e}");
        }
    }
}
