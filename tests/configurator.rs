//! End-to-end journey through the public surface: catalog on disk,
//! faceted browsing, bucket selection up to capacity, durable reload
//! and share-code round-trip.

use photo_configurator::{
    AppPaths, Configurator, InMemoryRemoteStore, JsonCatalogProvider, SelectOutcome,
    BUCKET_CAPACITY, OTHER_TAB_ID,
};
use std::fs;

fn write_catalog(paths: &AppPaths) {
    fs::write(
        &paths.taxonomy_path,
        serde_json::json!({
            "tag_groups": [
                {
                    "id": "tipo",
                    "name": "Tipo",
                    "tags": [
                        { "id": "knife", "name": "Cuchillo" },
                        { "id": "sheath", "name": "Funda" },
                        { "id": "axe", "name": "Hacha" },
                        { "id": "machete", "name": "Machete" }
                    ]
                },
                {
                    "id": "acero",
                    "name": "Acero",
                    "tags": [
                        { "id": "carbon", "name": "Acéro carbono" },
                        { "id": "stainless", "name": "Inoxidable" }
                    ]
                }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let photos: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            serde_json::json!({
                "id": format!("p{i}"),
                "url": format!("/photos/p{i}.jpg"),
                "text": if i == 0 { "Acéro inoxidable pulido" } else { "Pieza de monte" },
                "tags": if i % 2 == 0 { ["knife", "carbon"] } else { ["machete", "stainless"] }
            })
        })
        .collect();
    fs::write(
        &paths.photos_path,
        serde_json::json!({ "photos": photos }).to_string(),
    )
    .unwrap();
}

#[tokio::test]
async fn full_configurator_journey() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::discover(dir.path().join("app")).unwrap();
    write_catalog(&paths);

    let provider = JsonCatalogProvider::new(&paths.taxonomy_path, &paths.photos_path);
    let pool = photo_configurator::init_database(&paths.db_path).unwrap();
    let remote = InMemoryRemoteStore::new();

    let mut configurator = Configurator::open(&provider, pool.clone(), &remote);

    // Browse: the synthetic tab catches "machete", the fourth tipo tag.
    configurator.set_active_tab(Some(OTHER_TAB_ID));
    assert_eq!(configurator.visible_photos().len(), 5);
    configurator.set_active_tab(None);

    // Diacritic-insensitive search over free text.
    configurator.set_search_query("acero inox");
    let hits = configurator.visible_photos();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "p0");
    configurator.set_search_query("");

    // Fill the active bucket to its cap; the seventh photo bounces.
    for i in 0..BUCKET_CAPACITY {
        assert_eq!(
            configurator.select(&format!("p{i}")).unwrap(),
            SelectOutcome::Added
        );
    }
    assert_eq!(
        configurator.select("p9").unwrap(),
        SelectOutcome::AtCapacity
    );
    assert_eq!(configurator.active_bucket().len(), BUCKET_CAPACITY);

    let code = configurator.save_share().await.unwrap();
    drop(configurator);

    // A reload over the same database restores the session.
    let reloaded = Configurator::open(&provider, pool, &remote);
    assert_eq!(reloaded.active_bucket().len(), BUCKET_CAPACITY);
    assert_eq!(reloaded.share_code(), Some(code.as_str()));

    // A fresh device follows the share code and adopts the snapshot.
    let other_pool = photo_configurator::init_memory_database().unwrap();
    let mut other = Configurator::open(&provider, other_pool, &remote);
    other.open_share(&code).await.unwrap();
    assert!(other.active_bucket().contains("p0"));
    assert_eq!(other.active_bucket().len(), BUCKET_CAPACITY);
}
