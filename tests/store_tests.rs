use gameshelf::config::GeneralConfig;
use gameshelf::db::{Store, StoreError};

async fn memory_store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store")
}

#[tokio::test]
async fn test_first_game_gets_id_one() {
    let store = memory_store().await;

    store
        .add("Chrono Trigger", Some("placeholder"), "http://img/ct.png")
        .await
        .unwrap();

    let games = store.list_all().await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].id, 1);
    assert_eq!(games[0].title, "Chrono Trigger");
    assert_eq!(games[0].image_url, "http://img/ct.png");
    assert_eq!(games[0].description.as_deref(), Some("placeholder"));
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let store = memory_store().await;

    let titles = ["Zelda", "Metroid", "Chrono Trigger", "Earthbound"];
    for title in titles {
        let game = store.add(title, None, "http://img/x.png").await.unwrap();
        assert!(game.id > 0);
    }

    let games = store.list_all().await.unwrap();
    assert_eq!(games.len(), titles.len());
    assert!(games.windows(2).all(|w| w[0].id <= w[1].id));

    for title in titles {
        assert!(games.iter().any(|g| g.title == title));
    }
}

#[tokio::test]
async fn test_add_rejects_missing_fields() {
    let store = memory_store().await;
    store.add("Zelda", None, "http://img/z.png").await.unwrap();
    let before = store.list_all().await.unwrap();

    let err = store.add("", None, "http://img/x.png").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store.add("   ", None, "http://img/x.png").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store.add("Metroid", None, "").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store
        .add(&"x".repeat(51), None, "http://img/x.png")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(store.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_missing_id_is_not_found() {
    let store = memory_store().await;
    store.add("Zelda", None, "http://img/z.png").await.unwrap();
    let before = store.list_all().await.unwrap();

    let err = store.delete(999).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(999)));

    assert_eq!(store.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_removes_exactly_one_game() {
    let store = memory_store().await;
    let zelda = store.add("Zelda", None, "http://img/z.png").await.unwrap();
    let metroid = store.add("Metroid", None, "http://img/m.png").await.unwrap();
    let kirby = store.add("Kirby", None, "http://img/k.png").await.unwrap();

    let removed = store.delete(metroid.id).await.unwrap();
    assert_eq!(removed, metroid);

    let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![zelda.id, kirby.id]);

    let err = store.delete(metroid.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == metroid.id));
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let store = memory_store().await;
    let first = store.add("Zelda", None, "http://img/z.png").await.unwrap();
    store.delete(first.id).await.unwrap();

    let second = store.add("Zelda", None, "http://img/z.png").await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_duplicates_are_allowed() {
    let store = memory_store().await;
    let a = store.add("Zelda", None, "http://img/z.png").await.unwrap();
    let b = store.add("Zelda", None, "http://img/z.png").await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(store.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_ping() {
    let store = memory_store().await;
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn test_from_config_uses_configured_pool_size() {
    let path = std::env::temp_dir().join(format!("gameshelf-{}.db", uuid::Uuid::new_v4()));
    let general = GeneralConfig {
        database_path: format!("sqlite:{}", path.display()),
        max_db_connections: 3,
        min_db_connections: 1,
        ..GeneralConfig::default()
    };

    let store = Store::from_config(&general).await.unwrap();
    let pool = store.conn.get_sqlite_connection_pool();
    assert_eq!(pool.options().get_max_connections(), 3);
    assert_eq!(pool.options().get_min_connections(), 1);

    store.add("Zelda", None, "http://img/z.png").await.unwrap();
    assert_eq!(store.list_all().await.unwrap().len(), 1);

    drop(store);
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_in_memory_store_uses_single_connection() {
    let general = GeneralConfig {
        database_path: "sqlite::memory:".to_string(),
        max_db_connections: 5,
        ..GeneralConfig::default()
    };

    let store = Store::from_config(&general).await.unwrap();
    let pool = store.conn.get_sqlite_connection_pool();
    assert_eq!(pool.options().get_max_connections(), 1);
}
