use std::sync::Mutex;

use async_trait::async_trait;
use commerce_api::{ApiError, CommerceApi};
use crossbeam_channel::bounded;
use shared::{
    domain::{CatalogItem, ItemId},
    protocol::{OrderRequest, OrderResponse},
};

use super::*;

struct StubApi {
    products: Vec<CatalogItem>,
    fail_orders: bool,
    placed: Mutex<Vec<OrderRequest>>,
}

impl StubApi {
    fn new(products: Vec<CatalogItem>) -> Self {
        Self {
            products,
            fail_orders: false,
            placed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CommerceApi for StubApi {
    async fn fetch_products(&self) -> Result<Vec<CatalogItem>, ApiError> {
        Ok(self.products.clone())
    }

    async fn fetch_product(&self, id: &ItemId) -> Result<CatalogItem, ApiError> {
        self.products
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or(ApiError::BaseUrl(url::ParseError::EmptyHost))
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        if self.fail_orders {
            return Err(ApiError::BaseUrl(url::ParseError::EmptyHost));
        }
        self.placed.lock().expect("lock").push(order.clone());
        Ok(OrderResponse {
            id: "order-1".to_string(),
            total: order.total,
        })
    }
}

fn item(id: &str) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(id),
        category: "other".to_string(),
        title: id.to_uppercase(),
        description: String::new(),
        image: format!("/i/{id}.svg"),
        price: Some(100),
    }
}

#[tokio::test]
async fn fetch_and_submit_round_trip_through_the_worker() {
    let api = StubApi::new(vec![item("a"), item("b")]);
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);

    cmd_tx.send(BackendCommand::FetchCatalog).expect("queue");
    cmd_tx
        .send(BackendCommand::SubmitOrder(OrderRequest {
            payment: "card".to_string(),
            address: "1 Main St".to_string(),
            email: "a@b.c".to_string(),
            phone: "+1 555 0100".to_string(),
            total: 100,
            items: vec![ItemId::new("a")],
        }))
        .expect("queue");
    drop(cmd_tx);

    run_worker(&api, cmd_rx, ui_tx).await;

    match ui_rx.recv().expect("catalog event") {
        UiEvent::CatalogLoaded(items) => assert_eq!(items.len(), 2),
        other => panic!("unexpected event: {other:?}"),
    }
    match ui_rx.recv().expect("order event") {
        UiEvent::OrderPlaced(response) => {
            assert_eq!(response.id, "order-1");
            assert_eq!(response.total, 100);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(api.placed.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn order_failure_is_reported_without_stopping_the_worker() {
    let mut api = StubApi::new(vec![item("a")]);
    api.fail_orders = true;
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);

    cmd_tx
        .send(BackendCommand::SubmitOrder(OrderRequest {
            payment: "card".to_string(),
            address: "1 Main St".to_string(),
            email: "a@b.c".to_string(),
            phone: "+1 555 0100".to_string(),
            total: 100,
            items: vec![ItemId::new("a")],
        }))
        .expect("queue");
    cmd_tx.send(BackendCommand::FetchCatalog).expect("queue");
    drop(cmd_tx);

    run_worker(&api, cmd_rx, ui_tx).await;

    assert!(matches!(
        ui_rx.recv().expect("failure event"),
        UiEvent::OrderFailed(_)
    ));
    assert!(matches!(
        ui_rx.recv().expect("catalog event"),
        UiEvent::CatalogLoaded(_)
    ));
}
