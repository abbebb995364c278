//! Budget proposal repository.
//!
//! `decide` is the write path for reviews: it locks the proposal row,
//! re-checks that it is still pending, and for approvals debits the
//! operating account, all inside one transaction. Losers of a concurrent
//! race observe `ReviewError::AlreadyDecided` after the lock is released.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use bursary_core::proposal::{BudgetLineItem, BudgetProposal, DateRange, ProposalStatus};
use bursary_core::review::{DecisionAction, ReviewEngine, ReviewError, ReviewOutcome};
use bursary_shared::types::to_minor_units;

use crate::entities::{budget_items, budget_proposals};
use crate::repositories::ledger::{self, LedgerError};

/// Error types for proposal operations.
#[derive(Debug, thiserror::Error)]
pub enum ProposalRepoError {
    /// Proposal not found.
    #[error("Budget proposal not found: {0}")]
    NotFound(Uuid),

    /// The stored status column holds an unknown value.
    #[error("Proposal {id} has an unrecognized status '{value}'")]
    InvalidStatus {
        /// Proposal ID.
        id: Uuid,
        /// Raw column value.
        value: String,
    },

    /// The decision was rejected by the review rules.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Ledger error while debiting the operating account.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for submitting a proposal. Item totals are expected to be computed
/// by `SubmitBudgetInput::validate`, never taken from the client.
#[derive(Debug, Clone)]
pub struct CreateProposalInput {
    /// User submitting the budget.
    pub submitter_id: Uuid,
    /// Budget category, e.g. "Laboratory Supplies".
    pub category: String,
    /// Validated line items with computed totals.
    pub items: Vec<BudgetLineItem>,
}

/// The result of a decision: the proposal in its terminal state, and for
/// approvals the operating account balance after the debit.
#[derive(Debug, Clone)]
pub struct DecisionRecord {
    /// The decided proposal.
    pub proposal: BudgetProposal,
    /// Balance after the debit, `None` for declines.
    pub new_balance: Option<Decimal>,
}

/// Repository for budget proposal CRUD and review decisions.
#[derive(Debug, Clone)]
pub struct ProposalRepository {
    db: DatabaseConnection,
}

impl ProposalRepository {
    /// Creates a new proposal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending proposal with its line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        input: CreateProposalInput,
    ) -> Result<BudgetProposal, ProposalRepoError> {
        let txn = self.db.begin().await?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let proposal = budget_proposals::ActiveModel {
            id: Set(Uuid::new_v4()),
            submitter_id: Set(input.submitter_id),
            category: Set(input.category),
            status: Set(ProposalStatus::Pending.as_str().to_string()),
            decision_reason: Set(None),
            decided_by: Set(None),
            decided_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for (position, item) in input.items.into_iter().enumerate() {
            let row = budget_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                proposal_id: Set(proposal.id),
                position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
                reason: Set(item.reason),
                unit: Set(item.unit),
                cost_per_unit: Set(item.cost_per_unit),
                quantity: Set(i32::try_from(item.quantity).unwrap_or(i32::MAX)),
                total: Set(item.total),
            }
            .insert(&txn)
            .await?;
            items.push(row);
        }

        txn.commit().await?;

        debug!(proposal_id = %proposal.id, items = items.len(), "Proposal stored");
        to_domain(proposal, items)
    }

    /// Finds a proposal with its items.
    ///
    /// # Errors
    ///
    /// Returns `ProposalRepoError::NotFound` if no row matches.
    pub async fn find_by_id(&self, id: Uuid) -> Result<BudgetProposal, ProposalRepoError> {
        let proposal = budget_proposals::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProposalRepoError::NotFound(id))?;

        let items = budget_items::Entity::find()
            .filter(budget_items::Column::ProposalId.eq(id))
            .order_by_asc(budget_items::Column::Position)
            .all(&self.db)
            .await?;

        to_domain(proposal, items)
    }

    /// Lists pending proposals, oldest first, for the review queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending(&self) -> Result<Vec<BudgetProposal>, ProposalRepoError> {
        let proposals = budget_proposals::Entity::find()
            .filter(budget_proposals::Column::Status.eq(ProposalStatus::Pending.as_str()))
            .order_by_asc(budget_proposals::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.attach_items(proposals).await
    }

    /// Lists proposals submitted within the inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_in_range(
        &self,
        range: &DateRange,
    ) -> Result<Vec<BudgetProposal>, ProposalRepoError> {
        let proposals = budget_proposals::Entity::find()
            .filter(budget_proposals::Column::CreatedAt.gte(range.starts_at()))
            .filter(budget_proposals::Column::CreatedAt.lt(range.ends_before()))
            .order_by_asc(budget_proposals::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.attach_items(proposals).await
    }

    /// Applies an approve/decline decision atomically.
    ///
    /// Locks the proposal row (`SELECT ... FOR UPDATE`), re-checks that it
    /// is still pending, and for approvals debits the operating account by
    /// the recomputed total before writing the terminal status. Either
    /// everything commits or nothing does.
    ///
    /// # Errors
    ///
    /// - `ProposalRepoError::NotFound` if the proposal does not exist.
    /// - `ReviewError::AlreadyDecided` if it already reached a terminal
    ///   status, including via a concurrent decision.
    /// - `ReviewError::ReasonRequired` for a decline without a reason.
    pub async fn decide(
        &self,
        id: Uuid,
        action: DecisionAction,
        reason: Option<String>,
        decided_by: Uuid,
    ) -> Result<DecisionRecord, ProposalRepoError> {
        let txn = self.db.begin().await?;

        let proposal = budget_proposals::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ProposalRepoError::NotFound(id))?;

        let status = stored_status(&proposal)?;
        let outcome = ReviewEngine::decide(status, action, reason, decided_by)?;

        let items = budget_items::Entity::find()
            .filter(budget_items::Column::ProposalId.eq(id))
            .order_by_asc(budget_items::Column::Position)
            .all(&txn)
            .await?;

        let new_balance = match &outcome {
            ReviewOutcome::Approve { .. } => {
                let total = to_minor_units(items.iter().map(|i| i.total).sum::<Decimal>());
                Some(ledger::apply_delta(&txn, -total).await?)
            }
            ReviewOutcome::Decline { .. } => None,
        };

        let decided_at = match &outcome {
            ReviewOutcome::Approve { decided_at, .. } | ReviewOutcome::Decline { decided_at, .. } => {
                *decided_at
            }
        };

        let mut active: budget_proposals::ActiveModel = proposal.into();
        active.status = Set(outcome.new_status().as_str().to_string());
        active.decision_reason = Set(outcome.reason().map(ToString::to_string));
        active.decided_by = Set(Some(decided_by));
        active.decided_at = Set(Some(decided_at.into()));
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        debug!(
            proposal_id = %id,
            status = %outcome.new_status(),
            "Decision committed"
        );
        Ok(DecisionRecord {
            proposal: to_domain(updated, items)?,
            new_balance,
        })
    }

    async fn attach_items(
        &self,
        proposals: Vec<budget_proposals::Model>,
    ) -> Result<Vec<BudgetProposal>, ProposalRepoError> {
        if proposals.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = proposals.iter().map(|p| p.id).collect();
        let items = budget_items::Entity::find()
            .filter(budget_items::Column::ProposalId.is_in(ids))
            .order_by_asc(budget_items::Column::Position)
            .all(&self.db)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<budget_items::Model>> = HashMap::new();
        for item in items {
            grouped.entry(item.proposal_id).or_default().push(item);
        }

        proposals
            .into_iter()
            .map(|proposal| {
                let items = grouped.remove(&proposal.id).unwrap_or_default();
                to_domain(proposal, items)
            })
            .collect()
    }
}

fn stored_status(model: &budget_proposals::Model) -> Result<ProposalStatus, ProposalRepoError> {
    ProposalStatus::parse(&model.status).ok_or_else(|| ProposalRepoError::InvalidStatus {
        id: model.id,
        value: model.status.clone(),
    })
}

/// Maps a proposal row and its item rows to the domain type.
fn to_domain(
    proposal: budget_proposals::Model,
    items: Vec<budget_items::Model>,
) -> Result<BudgetProposal, ProposalRepoError> {
    let status = stored_status(&proposal)?;
    Ok(BudgetProposal {
        id: proposal.id,
        submitter_id: proposal.submitter_id,
        category: proposal.category,
        items: items
            .into_iter()
            .map(|item| BudgetLineItem {
                reason: item.reason,
                unit: item.unit,
                cost_per_unit: item.cost_per_unit,
                // the schema guarantees quantity >= 1
                quantity: u32::try_from(item.quantity).unwrap_or(1),
                total: item.total,
            })
            .collect(),
        status,
        decision_reason: proposal.decision_reason,
        decided_by: proposal.decided_by,
        created_at: proposal.created_at.with_timezone(&Utc),
        decided_at: proposal.decided_at.map(|t| t.with_timezone(&Utc)),
    })
}
