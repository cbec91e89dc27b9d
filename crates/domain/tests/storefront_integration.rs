//! Integration tests for the storefront domain.
//!
//! These tests drive the category, product and order services together the
//! way the HTTP layer does, including concurrent ordering and failure
//! compensation.

use std::sync::Arc;

use common::{CategoryId, MemberId, ProductId};
use domain::category::InMemoryCategoryRepository;
use domain::member::InMemoryMemberRepository;
use domain::order::InMemoryOrderRepository;
use domain::product::InMemoryProductRepository;
use domain::{
    CategoryError, CategoryService, CategoryUpdate, CreateProduct, DomainError, ErrorKind,
    MemberService, OrderService, OrderStatus, PlaceOrder, ProductService, ProductStatus,
};

type Categories = CategoryService<InMemoryCategoryRepository, InMemoryProductRepository>;
type Products = ProductService<InMemoryCategoryRepository, InMemoryProductRepository>;
type Members = Arc<MemberService<InMemoryMemberRepository>>;
type Orders = OrderService<
    InMemoryCategoryRepository,
    InMemoryProductRepository,
    InMemoryOrderRepository,
    Members,
>;

/// All services wired over fresh in-memory stores.
struct Storefront {
    categories: Arc<Categories>,
    products: Arc<Products>,
    members: Members,
    orders: Orders,
}

impl Storefront {
    fn new() -> Self {
        let product_repo = InMemoryProductRepository::new();
        let categories = Arc::new(CategoryService::new(
            InMemoryCategoryRepository::new(),
            product_repo.clone(),
        ));
        let products = Arc::new(ProductService::new(product_repo, categories.clone()));
        let members = Arc::new(MemberService::new(InMemoryMemberRepository::new()));
        let orders = OrderService::new(
            InMemoryOrderRepository::new(),
            products.clone(),
            members.clone(),
        );
        Self {
            categories,
            products,
            members,
            orders,
        }
    }

    async fn member(&self, email: &str) -> MemberId {
        self.members
            .register(email, "홍길동", "010-1234-5678")
            .await
            .unwrap()
    }

    async fn product(&self, category_id: CategoryId, price: i64, stock: i64) -> ProductId {
        self.products
            .create(CreateProduct::new(category_id, "노트북", price, stock))
            .await
            .unwrap()
    }

    async fn stock(&self, product_id: ProductId) -> i64 {
        self.products.get(product_id).await.unwrap().stock()
    }
}

fn order(product_id: ProductId, quantity: u32) -> PlaceOrder {
    PlaceOrder::new(product_id, quantity)
        .recipient("홍길동", "010-1234-5678")
        .ship_to("06236", "서울시 강남구 테헤란로 1")
        .request_message("문 앞에 놓아주세요")
}

mod order_lifecycle {
    use super::*;

    #[tokio::test]
    async fn order_then_cancel_restores_stock() {
        let shop = Storefront::new();
        let buyer = shop.member("buyer@example.com").await;

        let category_id = shop.categories.create("전자", None).await.unwrap();
        let product_id = shop.product(category_id, 1000, 10).await;
        let product = shop
            .products
            .change_status(product_id, ProductStatus::OnSale)
            .await
            .unwrap();
        assert_eq!(product.status(), ProductStatus::OnSale);

        let order_id = shop
            .orders
            .create(Some(buyer), order(product_id, 2))
            .await
            .unwrap();
        let placed = shop.orders.get_detail(Some(buyer), order_id).await.unwrap();
        assert_eq!(placed.total_price().amount(), 2000);
        assert_eq!(placed.shipping().request_message(), Some("문 앞에 놓아주세요"));
        assert_eq!(shop.stock(product_id).await, 8);

        let canceled = shop.orders.cancel(Some(buyer), order_id).await.unwrap();
        assert_eq!(canceled.status(), OrderStatus::Canceled);
        assert_eq!(shop.stock(product_id).await, 10);
    }

    #[tokio::test]
    async fn second_cancel_conflicts_and_restores_nothing() {
        let shop = Storefront::new();
        let buyer = shop.member("buyer@example.com").await;
        let category_id = shop.categories.create("전자", None).await.unwrap();
        let product_id = shop.product(category_id, 1000, 5).await;

        let order_id = shop
            .orders
            .create(Some(buyer), order(product_id, 3))
            .await
            .unwrap();
        shop.orders.cancel(Some(buyer), order_id).await.unwrap();

        let err = shop.orders.cancel(Some(buyer), order_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(shop.stock(product_id).await, 5);
    }

    #[tokio::test]
    async fn oversized_order_leaves_stock_unchanged() {
        let shop = Storefront::new();
        let buyer = shop.member("buyer@example.com").await;
        let category_id = shop.categories.create("전자", None).await.unwrap();
        let product_id = shop.product(category_id, 1000, 2).await;

        let err = shop
            .orders
            .create(Some(buyer), order(product_id, 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(shop.stock(product_id).await, 2);
    }

    #[tokio::test]
    async fn snapshot_ignores_later_price_change() {
        let shop = Storefront::new();
        let buyer = shop.member("buyer@example.com").await;
        let category_id = shop.categories.create("전자", None).await.unwrap();
        let product_id = shop.product(category_id, 1000, 5).await;

        let order_id = shop
            .orders
            .create(Some(buyer), order(product_id, 1))
            .await
            .unwrap();
        shop.products
            .update(
                product_id,
                domain::UpdateProduct::new().name("새 이름").price(9999),
            )
            .await
            .unwrap();

        let placed = shop.orders.get_detail(Some(buyer), order_id).await.unwrap();
        assert_eq!(placed.product_name(), "노트북");
        assert_eq!(placed.unit_price().amount(), 1000);
    }
}

mod category_tree {
    use super::*;

    #[tokio::test]
    async fn reparenting_under_descendant_is_a_cycle() {
        let shop = Storefront::new();
        let a = shop.categories.create("A", None).await.unwrap();
        let b = shop.categories.create("B", Some(a)).await.unwrap();

        let err = shop
            .categories
            .update(a, CategoryUpdate::new().parent(b))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Category(CategoryError::Cycle { .. })
        ));
        assert_eq!(shop.categories.get(a).await.unwrap().parent_id(), None);
    }

    #[tokio::test]
    async fn names_are_unique_ignoring_case_and_padding() {
        let shop = Storefront::new();
        shop.categories.create("Electronics", None).await.unwrap();
        let err = shop
            .categories
            .create(" electronics ", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn delete_is_blocked_by_dependents() {
        let shop = Storefront::new();
        let root = shop.categories.create("전자", None).await.unwrap();
        let child = shop.categories.create("컴퓨터", Some(root)).await.unwrap();
        shop.product(child, 1000, 1).await;
        let leaf = shop.categories.create("휴대폰", Some(root)).await.unwrap();

        assert_eq!(
            shop.categories.delete(root).await.unwrap_err().kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            shop.categories.delete(child).await.unwrap_err().kind(),
            ErrorKind::Conflict
        );

        shop.categories.delete(leaf).await.unwrap();
        assert_eq!(
            shop.categories.get(leaf).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn concurrent_reparents_never_form_a_cycle() {
        for _ in 0..20 {
            let shop = Storefront::new();
            let root = shop.categories.create("root", None).await.unwrap();
            let a = shop.categories.create("a", Some(root)).await.unwrap();
            let b = shop.categories.create("b", Some(root)).await.unwrap();

            let (first, second) = tokio::join!(
                shop.categories.update(a, CategoryUpdate::new().parent(b)),
                shop.categories.update(b, CategoryUpdate::new().parent(a)),
            );
            assert!(
                first.is_ok() ^ second.is_ok(),
                "exactly one re-parent must win"
            );

            let all = shop.categories.list_all().await.unwrap();
            for category in &all {
                let mut hops = 0;
                let mut current = category.parent_id();
                while let Some(parent) = current {
                    hops += 1;
                    assert!(hops <= all.len(), "parent chain does not terminate");
                    current = shop.categories.get(parent).await.unwrap().parent_id();
                }
            }
        }
    }
}

mod concurrency {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_orders_never_oversell() {
        let shop = Arc::new(Storefront::new());
        let category_id = shop.categories.create("한정판", None).await.unwrap();
        let product_id = shop.product(category_id, 5000, 5).await;

        let mut buyers = Vec::new();
        for i in 0..20 {
            buyers.push(shop.member(&format!("buyer{i}@example.com")).await);
        }

        let tasks: Vec<_> = buyers
            .into_iter()
            .map(|buyer| {
                let shop = shop.clone();
                tokio::spawn(async move {
                    shop.orders
                        .create(Some(buyer), order(product_id, 1))
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut placed = 0;
        for task in tasks {
            if task.await.unwrap() {
                placed += 1;
            }
        }

        assert_eq!(placed, 5);
        let product = shop.products.get(product_id).await.unwrap();
        assert_eq!(product.stock(), 0);
        assert_eq!(product.status(), ProductStatus::SoldOut);
        assert_eq!(shop.orders.repository().len().await, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_cancels_restore_once() {
        let shop = Arc::new(Storefront::new());
        let buyer = shop.member("buyer@example.com").await;
        let category_id = shop.categories.create("전자", None).await.unwrap();
        let product_id = shop.product(category_id, 1000, 10).await;
        let order_id = shop
            .orders
            .create(Some(buyer), order(product_id, 4))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let shop = shop.clone();
                tokio::spawn(async move { shop.orders.cancel(Some(buyer), order_id).await.is_ok() })
            })
            .collect();

        let mut canceled = 0;
        for task in tasks {
            if task.await.unwrap() {
                canceled += 1;
            }
        }

        assert_eq!(canceled, 1);
        assert_eq!(shop.stock(product_id).await, 10);
    }
}

mod compensation {
    use super::*;

    #[tokio::test]
    async fn failed_order_write_gives_stock_back() {
        let shop = Storefront::new();
        let buyer = shop.member("buyer@example.com").await;
        let category_id = shop.categories.create("전자", None).await.unwrap();
        let product_id = shop.product(category_id, 1000, 2).await;

        shop.orders.repository().set_fail_on_save(true);
        let err = shop
            .orders
            .create(Some(buyer), order(product_id, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
        assert_eq!(shop.stock(product_id).await, 2);
        assert!(shop.orders.repository().is_empty().await);

        shop.orders.repository().set_fail_on_save(false);
        shop.orders
            .create(Some(buyer), order(product_id, 2))
            .await
            .unwrap();
        assert_eq!(shop.stock(product_id).await, 0);
    }
}
