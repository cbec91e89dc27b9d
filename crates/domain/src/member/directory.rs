//! Identity lookups consumed by the order service.

use std::sync::Arc;

use async_trait::async_trait;
use common::MemberId;
use serde::Serialize;

use super::{MemberRepository, MemberRole, MemberService, MemberStatus};
use crate::error::StoreError;

/// The slice of a member the order service needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemberProfile {
    pub id: MemberId,
    pub role: MemberRole,
    pub status: MemberStatus,
}

impl MemberProfile {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Resolves member ids to profiles.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Returns `None` when no member has this id.
    async fn resolve(&self, id: MemberId) -> Result<Option<MemberProfile>, StoreError>;
}

#[async_trait]
impl<T: MemberDirectory + ?Sized> MemberDirectory for Arc<T> {
    async fn resolve(&self, id: MemberId) -> Result<Option<MemberProfile>, StoreError> {
        (**self).resolve(id).await
    }
}

#[async_trait]
impl<R: MemberRepository> MemberDirectory for MemberService<R> {
    async fn resolve(&self, id: MemberId) -> Result<Option<MemberProfile>, StoreError> {
        Ok(self
            .repository()
            .find_by_id(id)
            .await?
            .map(|member| MemberProfile {
                id: member.id(),
                role: member.role(),
                status: member.status(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::InMemoryMemberRepository;

    #[tokio::test]
    async fn resolves_through_arc() {
        let service = Arc::new(MemberService::new(InMemoryMemberRepository::new()));
        let id = service.register("a@b.c", "Kim", "010").await.unwrap();
        service.change_role(id, MemberRole::Admin).await.unwrap();

        let directory: Arc<dyn MemberDirectory> = service;
        let profile = directory.resolve(id).await.unwrap().unwrap();
        assert!(profile.is_admin());
        assert!(profile.is_active());
        assert!(directory
            .resolve(MemberId::new(99).unwrap())
            .await
            .unwrap()
            .is_none());
    }
}
