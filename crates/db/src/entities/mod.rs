//! `SeaORM` entity definitions.

pub mod budget_items;
pub mod budget_proposals;
pub mod ledger_accounts;
pub mod payments;
pub mod students;
pub mod users;
