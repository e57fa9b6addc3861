//! `HttpTransport` against a mock catalog server.

mod common;

use std::time::Duration;

use common::{body, record};
use mockito::Matcher;
use shelf_commerce::catalog::FacetCatalog;
use shelf_commerce::search::{build, FilterPanel, FilterSelection, MultiFacet, PageContext, SortKey};
use shelf_commerce::Price;
use shelf_data::{
    CatalogClient, ClientConfig, FetchError, HttpTransport, NetworkError, Refresh,
    DEFAULT_PRODUCTS_PATH, LOAD_FAILED_MESSAGE,
};

fn client(server: &mockito::Server, config: ClientConfig) -> CatalogClient<HttpTransport> {
    let transport = HttpTransport::new(&server.url(), DEFAULT_PRODUCTS_PATH).unwrap();
    CatalogClient::new(transport, config)
}

#[tokio::test]
async fn sends_canonical_parameters_and_decodes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/products")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("main_category".into(), "Men's Shoes".into()),
            Matcher::UrlEncoded("sub_category".into(), "Sneakers".into()),
            Matcher::UrlEncoded("color".into(), "Black".into()),
            Matcher::UrlEncoded("sort_by_price".into(), "asc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body(&[
            record(1, "Running Shoe", "129.95"),
            record(2, "Court Sneaker", "89"),
        ]))
        .create_async()
        .await;

    let mut panel = FilterPanel::new(FacetCatalog::shared());
    panel.toggle_multi(MultiFacet::Color, "Black");
    panel.toggle_subcategory("Sneakers");
    panel.set_sort(SortKey::PriceAsc);
    let query = build(
        &panel.commit(),
        &PageContext::category("Men's Shoes", None),
    );

    let client = client(&server, ClientConfig::default());
    let products = client.fetch(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Running Shoe");
    assert_eq!(products[0].price, Price::from_cents(12995));
    assert_eq!(products[1].price, Price::from_cents(8900));
}

#[tokio::test]
async fn server_error_keeps_previous_products() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_body(body(&[record(1, "Running Shoe", "129.95")]))
        .expect(1)
        .create_async()
        .await;

    let client = client(&server, ClientConfig::default());
    let query = build(&FilterSelection::new(), &PageContext::none());
    assert_eq!(client.refresh(&query).await, Refresh::Applied);
    first.assert_async().await;
    first.remove_async().await;

    server
        .mock("GET", "/api/products")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    assert_eq!(client.refresh(&query).await, Refresh::Failed);
    let view = client.snapshot();
    assert_eq!(view.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert_eq!(view.products.len(), 1);
    assert!(!view.loading);
}

#[tokio::test]
async fn not_found_maps_by_config() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/products")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "No products found"}"#)
        .create_async()
        .await;

    let mut panel = FilterPanel::new(FacetCatalog::shared());
    panel.toggle_multi(MultiFacet::Color, "Teal");
    let query = build(&panel.commit(), &PageContext::none());

    let strict = client(&server, ClientConfig::default());
    match strict.fetch(&query).await {
        Err(FetchError::Network(NetworkError::Status { status, url })) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/api/products?color=Teal"));
        }
        other => panic!("expected 404 status error, got {:?}", other),
    }

    let lenient = client(&server, ClientConfig::default().with_empty_on_not_found(true));
    assert_eq!(lenient.refresh(&query).await, Refresh::Applied);
    assert!(lenient.snapshot().is_empty());
}

#[tokio::test]
async fn non_array_payload_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/products")
        .with_status(200)
        .with_body(r#"{"products": []}"#)
        .create_async()
        .await;

    let client = client(&server, ClientConfig::default());
    let err = client
        .fetch(&build(&FilterSelection::new(), &PageContext::none()))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let transport = HttpTransport::new("http://127.0.0.1:9", DEFAULT_PRODUCTS_PATH).unwrap();
    let client = CatalogClient::new(
        transport,
        ClientConfig::default().with_timeout(Duration::from_secs(5)),
    );
    let err = client
        .fetch(&build(&FilterSelection::new(), &PageContext::none()))
        .await
        .unwrap_err();
    assert!(err.is_network());
}
