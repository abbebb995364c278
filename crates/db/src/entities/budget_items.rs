//! `SeaORM` Entity for the budget_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub proposal_id: Uuid,
    /// Zero-based position preserving submission order.
    pub position: i32,
    pub reason: String,
    pub unit: String,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub cost_per_unit: Decimal,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub total: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_proposals::Entity",
        from = "Column::ProposalId",
        to = "super::budget_proposals::Column::Id"
    )]
    BudgetProposals,
}

impl Related<super::budget_proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetProposals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
