//! Member service.

use common::MemberId;
use tokio::sync::Mutex;

use super::{Member, MemberError, MemberRepository, MemberRole, MemberStatus};
use crate::error::Result;

/// Service for registering members and managing their status and role.
pub struct MemberService<R: MemberRepository> {
    members: R,
    // Serializes registration so the email check and insert are atomic.
    registration: Mutex<()>,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(members: R) -> Self {
        Self {
            members,
            registration: Mutex::new(()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.members
    }

    /// Registers a new ACTIVE member with the USER role.
    #[tracing::instrument(skip(self, phone))]
    pub async fn register(&self, email: &str, name: &str, phone: &str) -> Result<MemberId> {
        let _registration = self.registration.lock().await;

        let email = Member::normalize_email(email)?;
        if self.members.find_by_email(&email).await?.is_some() {
            return Err(MemberError::DuplicateEmail { email }.into());
        }

        Member::validate_profile(name, phone)?;

        let id = self.members.next_id().await?;
        let member = Member::register(id, &email, name, phone)?;
        self.members.save(member).await?;

        tracing::info!(member_id = %id, "member registered");
        Ok(id)
    }

    pub async fn get(&self, id: MemberId) -> Result<Member> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(|| MemberError::NotFound(id).into())
    }

    pub async fn list_all(&self) -> Result<Vec<Member>> {
        Ok(self.members.find_all().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_status(&self, id: MemberId, status: MemberStatus) -> Result<Member> {
        let mut member = self.get(id).await?;
        member.change_status(status);
        self.members.save(member.clone()).await?;
        tracing::info!(member_id = %id, %status, "member status changed");
        Ok(member)
    }

    /// Updates the supplied profile fields. `None` leaves a field unchanged.
    #[tracing::instrument(skip(self, phone))]
    pub async fn update_profile(
        &self,
        id: MemberId,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Member> {
        let mut member = self.get(id).await?;
        member.update_profile(name, phone)?;
        self.members.save(member.clone()).await?;
        tracing::info!(member_id = %id, "member profile updated");
        Ok(member)
    }

    /// Withdraws a member by marking it INACTIVE.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate(&self, id: MemberId) -> Result<Member> {
        let mut member = self.get(id).await?;
        member.deactivate();
        self.members.save(member.clone()).await?;
        tracing::info!(member_id = %id, "member withdrew");
        Ok(member)
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_role(&self, id: MemberId, role: MemberRole) -> Result<Member> {
        let mut member = self.get(id).await?;
        member.change_role(role);
        self.members.save(member.clone()).await?;
        tracing::info!(member_id = %id, %role, "member role changed");
        Ok(member)
    }
}
