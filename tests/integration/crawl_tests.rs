//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small shop and run the full crawl
//! cycle end-to-end through the real HTTP fetcher and JSON sink.

use shop_sweep::config::{CategoryEntry, Config};
use shop_sweep::crawler::{run_crawl, HttpFetcher};
use shop_sweep::output::{load_result, JsonFileSink};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for a shop served by `base_url`
fn create_test_config(base_url: &str, categories: &[String], output: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", base_url);
    config.categories = categories
        .iter()
        .map(|url| CategoryEntry { url: url.clone() })
        .collect();
    config.fetcher.request_pause_ms = 0;
    config.fetcher.timeout_secs = 5;
    config.output.path = output.to_string();
    config
}

fn tile(id: u32) -> String {
    format!(r#"<div class="goods"><a href="/goods/{id}/"><img id="g{id}"></a></div>"#)
}

fn listing_page(heading: &str, pages: u32, tiles: &[String], script: &str) -> String {
    let pager: String = (1..=pages)
        .map(|n| format!(r#"<li class="page"><a href="?p={n}">{n}</a></li>"#))
        .collect();
    format!(
        r#"<html><head><title>{heading}</title></head><body>
        <h1>{heading}</h1>
        <ul class="yiiPager">{pager}<li class="next"><a>&gt;</a></li></ul>
        <div class="goodsBlock">{}</div>
        <script>{script}</script>
        </body></html>"#,
        tiles.concat()
    )
}

fn detail_page(name: &str) -> String {
    format!(
        r#"<html><body>
        <h1>{name}</h1>
        <div itemprop="description">Полнорационный&nbsp;корм</div>
        <img class="eslider-main-img" src="/img/{name}.jpg">
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_pages_with_missing_detail() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Page 1: three tiles, the middle one has no identifier image
    let page_one_tiles = vec![
        tile(101),
        r#"<div class="goods"><a href="/goods/999/">no image</a></div>"#.to_string(),
        tile(102),
    ];
    mount_html(
        &mock_server,
        "/shop/cats/",
        listing_page(
            "Корм для кошек",
            2,
            &page_one_tiles,
            r#"var items_v = {"101": [{"art": "A-101", "mass": "400 г", "price": 250}, {"art": "A-101b", "mass": "2 кг", "price": 990.5}]};"#,
        ),
    )
    .await;

    // Page 2: two tiles
    mount_html(
        &mock_server,
        "/shop/cats/page/2/",
        listing_page(
            "Корм для кошек",
            2,
            &[tile(201), tile(202)],
            r#"var items_v = {"202": [{"art": "B-202", "mass": "1 кг", "price": 500}]};"#,
        ),
    )
    .await;

    mount_html(&mock_server, "/goods/101/", detail_page("first")).await;
    mount_html(&mock_server, "/goods/102/", detail_page("second")).await;
    // /goods/201/ is not mounted and answers 404
    mount_html(&mock_server, "/goods/202/", detail_page("fourth")).await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("shop_data.json");
    let config = create_test_config(
        &base_url,
        &[format!("{}/shop/cats/", base_url)],
        output.to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.fetcher).unwrap();
    let sink = JsonFileSink::new(&config.output.path);
    let stats = run_crawl(&config, fetcher, &sink).await.unwrap();

    assert_eq!(stats.categories_crawled, 1);
    assert_eq!(stats.pages_extracted, 2);
    assert_eq!(stats.products_saved, 3);
    assert_eq!(stats.products_skipped, 1);
    assert_eq!(stats.stubs_dropped, 1);

    let result = load_result(&output).unwrap();
    assert_eq!(result.len(), 1);

    let category = &result[0];
    assert_eq!(category.name, "Корм для кошек");

    let urls: Vec<_> = category.goods.iter().map(|p| p.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/goods/101/", base_url),
            format!("{}/goods/102/", base_url),
            format!("{}/goods/202/", base_url),
        ]
    );

    let first = &category.goods[0];
    assert_eq!(first.name.as_deref(), Some("first"));
    assert_eq!(first.description.as_deref(), Some("Полнорационный корм"));
    assert_eq!(
        first.image.as_deref(),
        Some(format!("{}/img/first.jpg", base_url).as_str())
    );
    assert_eq!(first.variants.len(), 2);
    assert_eq!(first.variants[0].article.as_deref(), Some("A-101"));
    assert_eq!(first.variants[1].mass.as_deref(), Some("2 кг"));
    assert_eq!(first.variants[1].price.as_ref().map(|p| p.to_string()), Some("990.5".to_string()));

    // No entry in the embedded data means no variants, not a dropped product
    assert!(category.goods[1].variants.is_empty());
    assert_eq!(category.goods[2].variants[0].article.as_deref(), Some("B-202"));
}

#[tokio::test]
async fn test_malformed_variant_data_keeps_products() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/shop/dogs/",
        listing_page(
            "Переноски",
            1,
            &[tile(7)],
            r#"var items_v = {"7": [{"art": "D-7", "price": }]};"#,
        ),
    )
    .await;
    mount_html(&mock_server, "/goods/7/", detail_page("carrier")).await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.json");
    let config = create_test_config(
        &base_url,
        &[format!("{}/shop/dogs/", base_url)],
        output.to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.fetcher).unwrap();
    let stats = run_crawl(&config, fetcher, &JsonFileSink::new(&output))
        .await
        .unwrap();

    assert_eq!(stats.blobs_malformed, 1);
    assert_eq!(stats.products_saved, 1);

    let result = load_result(&output).unwrap();
    assert_eq!(result[0].goods.len(), 1);
    assert_eq!(result[0].goods[0].name.as_deref(), Some("carrier"));
    assert!(result[0].goods[0].variants.is_empty());
}

#[tokio::test]
async fn test_unreachable_category_is_named_from_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/shop/cat_toys/",
        listing_page("Игрушки", 1, &[], ""),
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.json");
    let config = create_test_config(
        &base_url,
        &[
            format!("{}/shop/suhoy_korm_dlya_koshek/", base_url),
            format!("{}/shop/cat_toys/", base_url),
        ],
        output.to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.fetcher).unwrap();
    let stats = run_crawl(&config, fetcher, &JsonFileSink::new(&output))
        .await
        .unwrap();

    assert_eq!(stats.category_name_fallbacks, 1);

    let result = load_result(&output).unwrap();
    let names: Vec<_> = result.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Suhoy Korm Dlya Koshek", "Игрушки"]);
    assert!(result[0].goods.is_empty());
}

#[tokio::test]
async fn test_output_is_readable_json_with_verbatim_text() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/shop/birds/",
        listing_page("Птицы", 1, &[tile(5)], r#"var items_v = {"5": [{"art": "P-5", "mass": "500 г", "price": 120}]};"#),
    )
    .await;
    mount_html(&mock_server, "/goods/5/", detail_page("seed")).await;

    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("shop_data.json");
    let config = create_test_config(
        &base_url,
        &[format!("{}/shop/birds/", base_url)],
        output.to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.fetcher).unwrap();
    run_crawl(&config, fetcher, &JsonFileSink::new(&output))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("\"name\": \"Птицы\""));
    assert!(raw.contains("\"price\": 120"));
    assert!(!raw.contains("\\u"));

    // Nothing is left behind next to the document
    let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}
