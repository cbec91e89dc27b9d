//! Member repository trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{IdSequence, MemberId};
use tokio::sync::RwLock;

use super::Member;
use crate::error::StoreError;

/// Persistence seam for members.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn next_id(&self) -> Result<MemberId, StoreError>;

    async fn save(&self, member: Member) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError>;

    /// All members in registration order.
    async fn find_all(&self) -> Result<Vec<Member>, StoreError>;
}

/// In-memory member store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<BTreeMap<MemberId, Member>>>,
    ids: Arc<IdSequence>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn next_id(&self) -> Result<MemberId, StoreError> {
        Ok(self.ids.next())
    }

    async fn save(&self, member: Member) -> Result<(), StoreError> {
        self.members.write().await.insert(member.id(), member);
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        Ok(self
            .members
            .read()
            .await
            .values()
            .find(|m| m.email() == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self.members.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_by_email_matches_normalized_value() {
        let repo = InMemoryMemberRepository::new();
        let id = repo.next_id().await.unwrap();
        repo.save(Member::register(id, "Kim@Example.com", "Kim", "010").unwrap())
            .await
            .unwrap();

        let found = repo.find_by_email("kim@example.com").await.unwrap();
        assert_eq!(found.map(|m| m.id()), Some(id));
        assert!(repo.find_by_email("lee@example.com").await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
