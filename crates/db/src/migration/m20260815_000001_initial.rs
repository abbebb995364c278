//! Initial database migration.
//!
//! Creates the users, students, budget proposal, ledger, and payment tables
//! and seeds the single school operating account.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(STUDENTS_SQL).await?;
        db.execute_unprepared(BUDGET_PROPOSALS_SQL).await?;
        db.execute_unprepared(BUDGET_ITEMS_SQL).await?;
        db.execute_unprepared(LEDGER_ACCOUNTS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        db.execute_unprepared(SEED_LEDGER_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    username VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    role VARCHAR(20) NOT NULL
        CHECK (role IN ('accountant', 'manager', 'director')),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const STUDENTS_SQL: &str = r"
CREATE TABLE students (
    id UUID PRIMARY KEY,
    admission_number VARCHAR(50) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    course VARCHAR(255) NOT NULL,
    year INTEGER NOT NULL CHECK (year >= 1),
    semester INTEGER NOT NULL CHECK (semester >= 1),
    fees_due DECIMAL(19, 2) NOT NULL DEFAULT 0,
    fees_paid DECIMAL(19, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_fees_due_non_negative CHECK (fees_due >= 0),
    CONSTRAINT chk_fees_paid_non_negative CHECK (fees_paid >= 0)
);
";

const BUDGET_PROPOSALS_SQL: &str = r"
CREATE TABLE budget_proposals (
    id UUID PRIMARY KEY,
    submitter_id UUID NOT NULL REFERENCES users(id),
    category VARCHAR(255) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'approved', 'declined')),
    decision_reason TEXT,
    decided_by UUID REFERENCES users(id),
    decided_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- a terminal row always records who decided it and when
    CONSTRAINT chk_decided_fields CHECK (
        (status = 'pending' AND decided_by IS NULL AND decided_at IS NULL)
        OR (status <> 'pending' AND decided_by IS NOT NULL AND decided_at IS NOT NULL)
    ),
    -- a declined row always carries a reason
    CONSTRAINT chk_declined_reason CHECK (
        status <> 'declined' OR decision_reason IS NOT NULL
    )
);

CREATE INDEX idx_budget_proposals_status ON budget_proposals(status);
CREATE INDEX idx_budget_proposals_created_at ON budget_proposals(created_at);
";

const BUDGET_ITEMS_SQL: &str = r"
CREATE TABLE budget_items (
    id UUID PRIMARY KEY,
    proposal_id UUID NOT NULL REFERENCES budget_proposals(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    reason VARCHAR(500) NOT NULL,
    unit VARCHAR(50) NOT NULL,
    cost_per_unit DECIMAL(19, 2) NOT NULL CHECK (cost_per_unit >= 0),
    quantity INTEGER NOT NULL CHECK (quantity >= 1),
    total DECIMAL(19, 2) NOT NULL,

    CONSTRAINT uq_budget_items_position UNIQUE (proposal_id, position)
);

CREATE INDEX idx_budget_items_proposal ON budget_items(proposal_id);
";

const LEDGER_ACCOUNTS_SQL: &str = r"
CREATE TABLE ledger_accounts (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    balance DECIMAL(19, 2) NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    student_id UUID NOT NULL REFERENCES students(id),
    recorded_by UUID NOT NULL REFERENCES users(id),
    amount DECIMAL(19, 2) NOT NULL CHECK (amount > 0),
    method VARCHAR(50) NOT NULL,
    reference VARCHAR(100),
    purpose VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_payments_student ON payments(student_id);
CREATE INDEX idx_payments_created_at ON payments(created_at);
";

const SEED_LEDGER_SQL: &str = r"
INSERT INTO ledger_accounts (id, name, balance)
VALUES (gen_random_uuid(), 'School Operating Account', 0);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS ledger_accounts CASCADE;
DROP TABLE IF EXISTS budget_items CASCADE;
DROP TABLE IF EXISTS budget_proposals CASCADE;
DROP TABLE IF EXISTS students CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
