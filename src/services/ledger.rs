//! The ledger: application state and balance reconciliation
//!
//! `Ledger` owns the profile and the transaction store and is the only way to
//! mutate them. Every mutation keeps the running balance equal to the opening
//! balance plus the signed effect of every stored transaction, and notifies
//! subscribed observers.

use tracing::debug;

use crate::models::{
    BudgetBreakdown, BudgetSplit, IdGenerator, Money, NewTransaction, Profile, ProfileUpdate,
    Transaction, TransactionId, TransactionUpdate, UuidGenerator,
};

use super::allocation::{allocate, PercentSplit};
use super::clock::{Clock, SystemClock};
use super::cycle::{current_cycle, last_salary_amount, SalaryClassifier};
use super::spending::spent_by_category;
use super::store::TransactionStore;

/// Something that happened to the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    TransactionRecorded(Transaction),
    TransactionEdited {
        before: Transaction,
        after: Transaction,
        balance_delta: Money,
    },
    TransactionDeleted(Transaction),
    BudgetAllocated {
        amount: Money,
        split: BudgetSplit,
        distribution: BudgetBreakdown,
    },
    BalanceSet {
        before: Money,
        after: Money,
    },
    ProfileUpdated {
        before: Box<Profile>,
    },
    Reset {
        transactions_removed: usize,
    },
}

/// Receives a notification after every ledger mutation
pub trait LedgerObserver {
    fn notify(&mut self, event: &LedgerEvent, profile: &Profile);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent, &Profile),
{
    fn notify(&mut self, event: &LedgerEvent, profile: &Profile) {
        self(event, profile)
    }
}

/// Result of recomputing the balance from scratch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceCheck {
    /// Opening balance plus all transaction effects
    pub expected: Money,
    /// Balance stored on the profile
    pub actual: Money,
}

impl BalanceCheck {
    pub fn is_consistent(&self) -> bool {
        self.expected == self.actual
    }

    /// Stored minus expected
    pub fn discrepancy(&self) -> Money {
        self.actual - self.expected
    }
}

/// Owner of the profile and transaction store
pub struct Ledger {
    profile: Profile,
    store: TransactionStore,
    classifier: SalaryClassifier,
    default_split: BudgetSplit,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Profile::default(), Vec::new())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("profile", &self.profile)
            .field("transactions", &self.store.len())
            .field("classifier", &self.classifier)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Ledger {
    /// Build a ledger over loaded state
    ///
    /// Profiles without a stored opening balance get one derived from their
    /// current balance and the given transactions.
    pub fn new(mut profile: Profile, transactions: Vec<Transaction>) -> Self {
        let store = TransactionStore::from_vec(transactions);

        if profile.opening_balance.is_none() {
            let effects: Money = store.iter().map(Transaction::signed_effect).sum();
            profile.opening_balance = Some(profile.current_balance - effects);
        }

        Self {
            profile,
            store,
            classifier: SalaryClassifier::default(),
            default_split: BudgetSplit::default(),
            ids: Box::new(UuidGenerator),
            clock: Box::new(SystemClock),
            observers: Vec::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_classifier(mut self, classifier: SalaryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Split used when a salary is recorded or no split is given
    pub fn with_default_split(mut self, split: BudgetSplit) -> Self {
        self.default_split = split;
        self
    }

    pub fn subscribe(&mut self, observer: impl LedgerObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Transactions in store order, most recently recorded first
    pub fn transactions(&self) -> &[Transaction] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn classifier(&self) -> &SalaryClassifier {
        &self.classifier
    }

    pub fn get_transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.store.get(id)
    }

    /// Look up by full id, display id or unique short prefix
    pub fn find_transaction(&self, identifier: &str) -> Option<&Transaction> {
        self.store.find(identifier)
    }

    pub fn opening_balance(&self) -> Money {
        self.profile.opening_balance.unwrap_or_default()
    }

    /// Record a new transaction
    ///
    /// Assigns a fresh id, prepends it to the store and applies its effect to
    /// the balance. A salary triggers a reallocation with the default split.
    pub fn record_transaction(&mut self, new: NewTransaction) -> Transaction {
        let id = TransactionId::from_uuid(self.ids.next_uuid());
        let txn = new.into_transaction(id, self.clock.now());

        self.profile.current_balance += txn.signed_effect();
        self.store.prepend(txn.clone());
        debug!(
            id = %txn.id,
            effect = %txn.signed_effect(),
            balance = %self.profile.current_balance,
            "recorded transaction"
        );
        self.emit(LedgerEvent::TransactionRecorded(txn.clone()));

        if self.classifier.is_salary(&txn) {
            self.allocate_budget(txn.amount, None);
        }

        txn
    }

    /// Apply a partial update to a stored transaction
    ///
    /// The balance moves by the difference between the new and the old signed
    /// effect, where the new effect uses the updated kind and amount when
    /// given and the stored ones otherwise. Returns `false` for unknown ids,
    /// which leave everything unchanged.
    pub fn edit_transaction(&mut self, id: TransactionId, update: TransactionUpdate) -> bool {
        let Some(current) = self.store.get(id) else {
            debug!(%id, "edit of unknown transaction ignored");
            return false;
        };

        let old_effect = current.signed_effect();
        let new_kind = update.kind.unwrap_or(current.kind);
        let new_amount = update.amount.map(|a| a.abs()).unwrap_or(current.amount);
        let balance_delta = new_kind.effect(new_amount) - old_effect;

        let Some(before) = self.store.update(id, update) else {
            return false;
        };
        self.profile.current_balance += balance_delta;

        let after = self.store.get(id).cloned().unwrap_or_else(|| before.clone());
        debug!(%id, delta = %balance_delta, balance = %self.profile.current_balance, "edited transaction");
        self.emit(LedgerEvent::TransactionEdited {
            before,
            after,
            balance_delta,
        });
        true
    }

    /// Remove a transaction and reverse its effect; unknown ids are a no-op
    pub fn delete_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let Some(removed) = self.store.remove(id) else {
            debug!(%id, "delete of unknown transaction ignored");
            return None;
        };

        self.profile.current_balance -= removed.signed_effect();
        debug!(%id, balance = %self.profile.current_balance, "deleted transaction");
        self.emit(LedgerEvent::TransactionDeleted(removed.clone()));
        Some(removed)
    }

    /// Transactions since the most recent salary, newest first
    pub fn current_cycle(&self) -> Vec<Transaction> {
        current_cycle(self.store.as_slice(), &self.classifier)
    }

    /// Spend per bucket in the current cycle
    pub fn compute_cycle_spend(&self) -> BudgetBreakdown {
        spent_by_category(&self.current_cycle())
    }

    /// Recompute the budget distribution from `amount`
    ///
    /// Uses the ledger's default split when none is given. Stamps the profile's last
    /// salary date with the current time.
    pub fn allocate_budget(&mut self, amount: Money, split: Option<BudgetSplit>) -> BudgetBreakdown {
        let split = split.unwrap_or(self.default_split);
        let distribution = allocate(amount, &split);

        self.profile.budget_distribution = distribution;
        self.profile.budget_split = split;
        self.profile.last_salary_date = Some(self.clock.now());

        debug!(amount = %amount, split = %split, "allocated budget");
        self.emit(LedgerEvent::BudgetAllocated {
            amount,
            split,
            distribution,
        });
        distribution
    }

    /// Reallocate the last salary with a split entered in percent
    ///
    /// Applies only when the split totals 100% within `tolerance` and a
    /// positive salary exists. Returns the new distribution when applied.
    pub fn apply_custom_split(
        &mut self,
        percentages: PercentSplit,
        tolerance: f64,
    ) -> Option<BudgetBreakdown> {
        if !percentages.is_complete(tolerance) {
            debug!(total = percentages.total(), "custom split does not total 100%");
            return None;
        }

        let salary = last_salary_amount(self.store.as_slice(), &self.classifier)
            .filter(Money::is_positive)?;

        Some(self.allocate_budget(salary, Some(percentages.to_split())))
    }

    /// Update presentation-side profile fields
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let before = Box::new(self.profile.clone());
        self.profile.apply(update);
        self.emit(LedgerEvent::ProfileUpdated { before });
    }

    /// Set the balance by hand
    ///
    /// The opening balance moves with it so the balance stays the sum of
    /// opening balance and transaction effects.
    pub fn set_current_balance(&mut self, balance: Money) {
        let before = self.profile.current_balance;
        let delta = balance - before;

        self.profile.current_balance = balance;
        self.profile.opening_balance = Some(self.opening_balance() + delta);
        self.emit(LedgerEvent::BalanceSet {
            before,
            after: balance,
        });
    }

    /// Opening balance plus the signed effect of every stored transaction
    pub fn expected_balance(&self) -> Money {
        self.opening_balance() + self.store.iter().map(Transaction::signed_effect).sum::<Money>()
    }

    pub fn verify_balance(&self) -> BalanceCheck {
        BalanceCheck {
            expected: self.expected_balance(),
            actual: self.profile.current_balance,
        }
    }

    /// Reset the stored balance to the recomputed one; returns the correction
    pub fn rebuild_balance(&mut self) -> Money {
        let check = self.verify_balance();
        if check.is_consistent() {
            return Money::zero();
        }

        let before = self.profile.current_balance;
        self.profile.current_balance = check.expected;
        self.emit(LedgerEvent::BalanceSet {
            before,
            after: check.expected,
        });
        check.expected - before
    }

    /// Drop all transactions and return to a fresh profile
    pub fn reset(&mut self) {
        let transactions_removed = self.store.len();
        self.profile = Profile::default();
        self.store.clear();
        self.emit(LedgerEvent::Reset {
            transactions_removed,
        });
    }

    fn emit(&mut self, event: LedgerEvent) {
        for observer in &mut self.observers {
            observer.notify(&event, &self.profile);
        }
    }
}
