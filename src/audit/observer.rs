//! Writes ledger events to the audit log

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use tracing::{debug, warn};

use crate::models::Profile;
use crate::services::{LedgerEvent, LedgerObserver};

use super::diff::generate_diff;
use super::entry::{AuditEntry, EntityType};
use super::logger::AuditLogger;

const PROFILE_ENTITY_ID: &str = "profile";
const BUDGET_ENTITY_ID: &str = "budget";

type Queue = Rc<RefCell<Vec<AuditEntry>>>;

enum Sink {
    Immediate(AuditLogger),
    Buffered(Queue),
}

/// Ledger observer that records one audit entry per event
///
/// Audit failures never abort a ledger operation; they are logged as
/// warnings.
pub struct AuditObserver {
    sink: Sink,
}

/// Audit entries held back until the ledger they describe is saved
///
/// Entries still pending when this is dropped are discarded.
pub struct PendingAudit {
    logger: AuditLogger,
    queue: Queue,
}

impl PendingAudit {
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Append all pending entries to the log; returns how many were written
    pub fn commit(&self) -> usize {
        let entries: Vec<AuditEntry> = self.queue.borrow_mut().drain(..).collect();
        let mut written = 0;
        for entry in &entries {
            match self.logger.log(entry) {
                Ok(()) => written += 1,
                Err(e) => {
                    warn!(error = %e, path = %self.logger.path().display(), "failed to write audit entry")
                }
            }
        }
        written
    }

    /// Drop pending entries without writing them
    pub fn discard(&self) {
        self.queue.borrow_mut().clear();
    }
}

impl Drop for PendingAudit {
    fn drop(&mut self) {
        let unsaved = self.queue.borrow().len();
        if unsaved > 0 {
            debug!(entries = unsaved, "discarding audit entries for unsaved changes");
        }
    }
}

impl AuditObserver {
    /// Write each entry as soon as the event happens
    pub fn new(logger: AuditLogger) -> Self {
        Self {
            sink: Sink::Immediate(logger),
        }
    }

    /// Queue entries until [`PendingAudit::commit`] is called
    pub fn buffered(logger: AuditLogger) -> (Self, PendingAudit) {
        let queue = Queue::default();
        let observer = Self {
            sink: Sink::Buffered(Rc::clone(&queue)),
        };
        (observer, PendingAudit { logger, queue })
    }

    fn entry_for(event: &LedgerEvent, profile: &Profile) -> AuditEntry {
        match event {
            LedgerEvent::TransactionRecorded(txn) => AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.description.clone()),
                txn,
            ),
            LedgerEvent::TransactionEdited {
                before,
                after,
                balance_delta,
            } => {
                let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
                    (Ok(old), Ok(new)) => generate_diff(&old, &new),
                    _ => None,
                };
                let summary = match (diff, balance_delta.is_zero()) {
                    (Some(diff), false) => Some(format!("{}, balance {:+}", diff, balance_delta.cents())),
                    (diff, _) => diff,
                };
                AuditEntry::update(
                    EntityType::Transaction,
                    after.id.to_string(),
                    Some(after.description.clone()),
                    before,
                    after,
                    summary,
                )
            }
            LedgerEvent::TransactionDeleted(txn) => AuditEntry::delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.description.clone()),
                txn,
            ),
            LedgerEvent::BudgetAllocated {
                amount,
                split,
                distribution,
            } => AuditEntry::create(
                EntityType::Budget,
                BUDGET_ENTITY_ID,
                None,
                &json!({
                    "amount": amount,
                    "split": split,
                    "distribution": distribution,
                }),
            ),
            LedgerEvent::BalanceSet { before, after } => AuditEntry::update(
                EntityType::Profile,
                PROFILE_ENTITY_ID,
                None,
                &json!({ "currentBalance": before }),
                &json!({ "currentBalance": after }),
                Some(format!("currentBalance: {} -> {}", before.cents(), after.cents())),
            ),
            LedgerEvent::ProfileUpdated { before } => {
                let diff = match (serde_json::to_value(before), serde_json::to_value(profile)) {
                    (Ok(old), Ok(new)) => generate_diff(&old, &new),
                    _ => None,
                };
                AuditEntry::update(
                    EntityType::Profile,
                    PROFILE_ENTITY_ID,
                    None,
                    &**before,
                    profile,
                    diff,
                )
            }
            LedgerEvent::Reset {
                transactions_removed,
            } => AuditEntry::delete(
                EntityType::Profile,
                PROFILE_ENTITY_ID,
                None,
                &json!({ "transactionsRemoved": transactions_removed }),
            ),
        }
    }
}

impl LedgerObserver for AuditObserver {
    fn notify(&mut self, event: &LedgerEvent, profile: &Profile) {
        let entry = Self::entry_for(event, profile);
        match &self.sink {
            Sink::Immediate(logger) => {
                if let Err(e) = logger.log(&entry) {
                    warn!(error = %e, path = %logger.path().display(), "failed to write audit entry");
                }
            }
            Sink::Buffered(queue) => queue.borrow_mut().push(entry),
        }
    }
}
