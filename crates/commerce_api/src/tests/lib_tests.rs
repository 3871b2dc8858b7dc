use serde_json::json;
use shared::{
    domain::{CatalogItem, ItemId},
    protocol::{OrderRequest, ProductListResponse},
};

use super::*;

fn api() -> HttpCommerceApi {
    HttpCommerceApi::new("http://127.0.0.1:3000/api/", "http://127.0.0.1:3000/content")
        .expect("valid base url")
}

#[test]
fn rejects_an_unparseable_base_url() {
    assert!(matches!(
        HttpCommerceApi::new("not a url", "http://cdn.example"),
        Err(ApiError::BaseUrl(_))
    ));
}

#[test]
fn builds_endpoints_without_doubled_slashes() {
    let api = api();
    assert_eq!(
        api.endpoint("product/"),
        "http://127.0.0.1:3000/api/product/"
    );
    assert_eq!(
        api.endpoint("/product/abc"),
        "http://127.0.0.1:3000/api/product/abc"
    );
    assert_eq!(api.endpoint("order"), "http://127.0.0.1:3000/api/order");
}

#[test]
fn rewrites_images_against_the_cdn_base() {
    let api = api();
    let mut item = CatalogItem {
        id: ItemId::new("a"),
        category: "other".to_string(),
        title: "Widget".to_string(),
        description: String::new(),
        image: "/images/widget.svg".to_string(),
        price: Some(100),
    };
    api.rewrite_image(&mut item);
    assert_eq!(item.image, "http://127.0.0.1:3000/content/images/widget.svg");

    let mut relative = item.clone();
    relative.image = "images/widget.svg".to_string();
    api.rewrite_image(&mut relative);
    assert_eq!(
        relative.image,
        "http://127.0.0.1:3000/content/images/widget.svg"
    );
}

#[test]
fn decodes_a_null_price_as_priceless() {
    let body = json!({
        "total": 2,
        "items": [
            {
                "id": "a",
                "category": "hard-skill",
                "title": "Widget",
                "description": "d",
                "image": "/i/a.svg",
                "price": 100
            },
            {
                "id": "b",
                "category": "other",
                "title": "Gizmo",
                "description": "d",
                "image": "/i/b.svg",
                "price": null
            }
        ]
    });

    let decoded: ProductListResponse = serde_json::from_value(body).expect("decode");
    assert_eq!(decoded.items[0].price, Some(100));
    assert_eq!(decoded.items[1].price, None);
}

#[test]
fn single_product_requests_use_the_id_path_and_rewrite_the_image() {
    let api = api();
    let id = ItemId::new("abc-123");
    assert_eq!(
        api.endpoint(&format!("product/{}", id.as_str())),
        "http://127.0.0.1:3000/api/product/abc-123"
    );

    let mut item: CatalogItem = serde_json::from_value(json!({
        "id": "abc-123",
        "category": "other",
        "title": "Widget",
        "description": "d",
        "image": "/i/abc-123.svg",
        "price": null
    }))
    .expect("decode");
    api.rewrite_image(&mut item);
    assert_eq!(item.image, "http://127.0.0.1:3000/content/i/abc-123.svg");
    assert_eq!(item.price, None);
}

#[test]
fn order_request_serializes_with_the_wire_field_names() {
    let order = OrderRequest {
        payment: "card".to_string(),
        address: "1 Main St".to_string(),
        email: "a@b.c".to_string(),
        phone: "+1 555 0100".to_string(),
        total: 150,
        items: vec![ItemId::new("a"), ItemId::new("b")],
    };

    let encoded = serde_json::to_value(&order).expect("encode");
    assert_eq!(
        encoded,
        json!({
            "payment": "card",
            "address": "1 Main St",
            "email": "a@b.c",
            "phone": "+1 555 0100",
            "total": 150,
            "items": ["a", "b"]
        })
    );
}
