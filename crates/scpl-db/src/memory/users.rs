use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use scpl_models::{NewUser, RefreshSession, User};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{CompareAndSwapOutcome, UserStore};

type UserMap = Arc<RwLock<HashMap<Uuid, User>>>;

#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore(UserMap);

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.0.read().values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.0.read().get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut guard = self.0.write();
        if guard.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            roles: user.roles,
            refresh_session: None,
            created_at: now,
            updated_at: now,
        };
        guard.insert(record.id, record.clone());

        Ok(record)
    }

    async fn set_refresh_session(
        &self,
        id: Uuid,
        session: Option<RefreshSession>,
    ) -> Result<bool, StoreError> {
        let mut guard = self.0.write();
        match guard.get_mut(&id) {
            Some(user) => {
                user.refresh_session = session;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn compare_and_swap_refresh(
        &self,
        id: Uuid,
        expected_hash: &str,
        replacement: Option<RefreshSession>,
    ) -> Result<CompareAndSwapOutcome, StoreError> {
        let mut guard = self.0.write();
        let Some(user) = guard.get_mut(&id) else {
            return Ok(CompareAndSwapOutcome::Missing);
        };

        let matches = user
            .refresh_session
            .as_ref()
            .is_some_and(|s| s.token_hash == expected_hash);
        if !matches {
            return Ok(CompareAndSwapOutcome::RefreshMismatch);
        }

        user.refresh_session = replacement;
        user.updated_at = Utc::now();

        Ok(CompareAndSwapOutcome::Updated)
    }
}
