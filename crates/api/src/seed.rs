//! Demo data for local runs.

use common::MemberId;
use domain::{CreateProduct, MemberRole, Result};

use crate::AppState;

/// Ids of the demo members, for logging at startup.
#[derive(Debug, Clone, Copy)]
pub struct DemoMembers {
    pub user: MemberId,
    pub admin: MemberId,
}

/// Registers a shopper and an administrator, a three-node category tree
/// and a handful of products, one of them sold out.
#[tracing::instrument(skip(state))]
pub async fn seed_demo_data(state: &AppState) -> Result<DemoMembers> {
    let user = state
        .members
        .register("test1@test.com", "테스트", "010-1111-2222")
        .await?;
    let admin = state
        .members
        .register("admin@test.com", "관리자", "010-9999-0000")
        .await?;
    state.members.change_role(admin, MemberRole::Admin).await?;

    let electronics = state.categories.create("전자", None).await?;
    let computer = state.categories.create("컴퓨터", Some(electronics)).await?;
    let phone = state.categories.create("휴대폰", Some(electronics)).await?;

    let products = [
        (electronics, "전자제품 랜덤", 10_000, 10, "전자 카테고리 테스트 상품"),
        (computer, "맥북 프로", 3_000_000, 5, "애플 노트북"),
        (computer, "게이밍 데스크탑", 2_500_000, 3, "RTX 탑재"),
        (phone, "아이폰 15", 1_500_000, 0, "품절 상태"),
        (phone, "갤럭시 S24", 1_400_000, 7, "삼성 최신폰"),
    ];
    for (category_id, name, price, stock, description) in products {
        state
            .products
            .create(CreateProduct::new(category_id, name, price, stock).with_description(description))
            .await?;
    }

    tracing::info!(user = %user, admin = %admin, "demo data loaded");
    Ok(DemoMembers { user, admin })
}

#[cfg(test)]
mod tests {
    use domain::ProductStatus;

    use super::*;

    #[tokio::test]
    async fn seeds_tree_members_and_a_sold_out_product() {
        let state = crate::create_default_state();
        let members = seed_demo_data(&state).await.unwrap();

        let admin = state.members.get(members.admin).await.unwrap();
        assert!(admin.role().is_admin());
        assert!(!state.members.get(members.user).await.unwrap().role().is_admin());

        let categories = state.categories.list_all().await.unwrap();
        assert_eq!(categories.len(), 3);
        let root = categories[0].id();
        assert!(categories[1..].iter().all(|c| c.parent_id() == Some(root)));

        let phones = state
            .products
            .list_by_category(categories[2].id())
            .await
            .unwrap();
        assert!(phones
            .iter()
            .any(|p| p.stock() == 0 && p.status() == ProductStatus::SoldOut));
    }

    #[tokio::test]
    async fn seeding_twice_conflicts() {
        let state = crate::create_default_state();
        seed_demo_data(&state).await.unwrap();
        assert!(seed_demo_data(&state).await.is_err());
    }
}
