//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::profile::{Profile, ProfileChanges};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::{account_id::AccountId, onboarding_step::OnboardingStep};
use crate::error::AccountResult;

/// PostgreSQL-backed profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for PgProfileRepository {
    async fn find_by_account_id(&self, account_id: &AccountId) -> AccountResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                account_id,
                onboarding_step,
                updated_at
            FROM profiles
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update(&self, account_id: &AccountId, changes: &ProfileChanges) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE profiles
            SET
                onboarding_step = COALESCE($2, onboarding_step),
                updated_at = $3
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(changes.onboarding_step.map(|s| s.code()))
        .bind(changes.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            tracing::debug!(account_id = %account_id, "No profile row to update");
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    account_id: Uuid,
    onboarding_step: Option<String>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        // Unknown codes are treated like a missing step
        let onboarding_step = self.onboarding_step.as_deref().and_then(|code| {
            let step = OnboardingStep::from_code(code);
            if step.is_none() {
                tracing::warn!(
                    account_id = %self.account_id,
                    onboarding_step = code,
                    "Unrecognized onboarding step"
                );
            }
            step
        });

        Profile {
            account_id: AccountId::from_uuid(self.account_id),
            onboarding_step,
            updated_at: self.updated_at,
        }
    }
}
