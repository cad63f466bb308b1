//! Initial database migration.
//!
//! Creates all tables, constraints, and indexes. Enum-valued columns are
//! stored as VARCHAR with CHECK constraints so the allowed values live in
//! one place per table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: REFERENCE DATA
        // ============================================================
        db.execute_unprepared(AFFILIATES_SQL).await?;

        // ============================================================
        // PART 2: IDENTITY & USERS
        // ============================================================
        db.execute_unprepared(AUTH_CREDENTIALS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: ACCOUNT REQUEST INTAKE
        // ============================================================
        db.execute_unprepared(ACCOUNT_REQUESTS_SQL).await?;

        // ============================================================
        // PART 4: CASH CALLS
        // ============================================================
        db.execute_unprepared(CASH_CALLS_SQL).await?;

        // ============================================================
        // PART 5: AUDIT TRAIL
        // ============================================================
        db.execute_unprepared(ACTIVITY_LOGS_SQL).await?;

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

const AFFILIATES_SQL: &str = r"
CREATE TABLE affiliates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    legal_name VARCHAR(255) NOT NULL,
    company_code VARCHAR(20) NOT NULL UNIQUE,
    status VARCHAR(20) NOT NULL DEFAULT 'active',
    risk_level VARCHAR(20) NOT NULL DEFAULT 'medium',
    financial_rating VARCHAR(20),
    city VARCHAR(100),
    country VARCHAR(100),
    website VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_affiliate_status CHECK (status IN ('active', 'inactive', 'suspended')),
    CONSTRAINT chk_affiliate_risk CHECK (risk_level IN ('low', 'medium', 'high', 'critical'))
);

CREATE INDEX idx_affiliates_name ON affiliates(name);
";

const AUTH_CREDENTIALS_SQL: &str = r"
CREATE TABLE auth_credentials (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    role VARCHAR(20) NOT NULL,
    department VARCHAR(100),
    position VARCHAR(100),
    phone VARCHAR(50),
    affiliate_company_id UUID REFERENCES affiliates(id),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_user_role CHECK (
        role IN ('admin', 'finance', 'approver', 'cfo', 'affiliate', 'viewer')
    )
);

CREATE INDEX idx_users_role ON users(role) WHERE is_active = true;
CREATE INDEX idx_users_affiliate ON users(affiliate_company_id) WHERE affiliate_company_id IS NOT NULL;
";

const ACCOUNT_REQUESTS_SQL: &str = r"
CREATE TABLE account_requests (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL,
    full_name VARCHAR(255) NOT NULL,
    position VARCHAR(100) NOT NULL,
    department VARCHAR(100) NOT NULL,
    phone VARCHAR(50) NOT NULL,
    affiliate_company_id UUID REFERENCES affiliates(id),
    reason_for_access TEXT NOT NULL,
    manager_name VARCHAR(255) NOT NULL,
    manager_email VARCHAR(255) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    review_notes TEXT,
    reviewed_at TIMESTAMPTZ,
    assigned_role VARCHAR(20),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_request_status CHECK (
        status IN ('pending', 'in_review', 'approved', 'rejected')
    ),
    CONSTRAINT chk_assigned_role CHECK (
        assigned_role IS NULL
        OR assigned_role IN ('admin', 'finance', 'approver', 'cfo', 'affiliate', 'viewer')
    )
);

-- One open request per email at a time
CREATE UNIQUE INDEX idx_account_requests_pending_email
    ON account_requests(email) WHERE status = 'pending';
CREATE INDEX idx_account_requests_created ON account_requests(created_at DESC);
";

const CASH_CALLS_SQL: &str = r"
CREATE TABLE cash_calls (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    call_number VARCHAR(50) NOT NULL UNIQUE,
    affiliate_id UUID NOT NULL REFERENCES affiliates(id),
    amount_requested NUMERIC(19, 4) NOT NULL,
    currency CHAR(3) NOT NULL,
    exchange_rate NUMERIC(19, 10) NOT NULL DEFAULT 1,
    status VARCHAR(20) NOT NULL DEFAULT 'draft',
    priority VARCHAR(10) NOT NULL DEFAULT 'medium',
    compliance_status VARCHAR(20) NOT NULL DEFAULT 'pending',
    description TEXT,
    justification TEXT,
    attachments JSONB NOT NULL DEFAULT '[]',
    created_by UUID NOT NULL REFERENCES users(id),
    assignee_user_id UUID REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    approved_at TIMESTAMPTZ,
    CONSTRAINT chk_cash_call_status CHECK (
        status IN ('draft', 'under_review', 'approved', 'rejected', 'paid')
    ),
    CONSTRAINT chk_cash_call_priority CHECK (priority IN ('low', 'medium', 'high')),
    CONSTRAINT chk_compliance_status CHECK (
        compliance_status IN ('pending', 'compliant', 'non_compliant')
    ),
    CONSTRAINT chk_amount_positive CHECK (amount_requested > 0),
    CONSTRAINT chk_exchange_rate_positive CHECK (exchange_rate > 0),
    CONSTRAINT chk_currency_format CHECK (currency ~ '^[A-Z]{3}$')
);

CREATE INDEX idx_cash_calls_created_by ON cash_calls(created_by, created_at DESC);
CREATE INDEX idx_cash_calls_affiliate ON cash_calls(affiliate_id, created_at DESC);
CREATE INDEX idx_cash_calls_status ON cash_calls(status);
";

const ACTIVITY_LOGS_SQL: &str = r"
CREATE TABLE activity_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id) ON DELETE SET NULL,
    action VARCHAR(100) NOT NULL,
    resource_type VARCHAR(50) NOT NULL,
    resource_id UUID NOT NULL,
    details JSONB NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_activity_logs_resource ON activity_logs(resource_type, resource_id, created_at DESC);
CREATE INDEX idx_activity_logs_created ON activity_logs(created_at DESC);
";

const DROP_ALL_SQL: &str = r"
-- Reverse order of creation due to foreign key constraints
DROP TABLE IF EXISTS activity_logs CASCADE;
DROP TABLE IF EXISTS cash_calls CASCADE;
DROP TABLE IF EXISTS account_requests CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TABLE IF EXISTS auth_credentials CASCADE;
DROP TABLE IF EXISTS affiliates CASCADE;
";
