use anyhow::Result;
use lego_catalog::db::DatabaseManager;
use lego_catalog::models::{NewSet, SetChanges, Theme};
use lego_catalog::store::CatalogStore;
use tempfile::TempDir;

// Each store operation opens its own connection, so the test database has
// to live on disk; the TempDir must stay alive for the test's duration.
async fn empty_store() -> Result<(CatalogStore, TempDir)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("catalog.db");
    let db = DatabaseManager::connect_local(path.to_str().unwrap()).await?;
    Ok((CatalogStore::new(db), dir))
}

fn sample_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: 1,
            name: "City".to_string(),
        },
        Theme {
            id: 2,
            name: "Creator Expert".to_string(),
        },
    ]
}

fn sample_sets() -> Vec<NewSet> {
    vec![
        NewSet {
            set_num: "7140".to_string(),
            name: "City Bus".to_string(),
            year: 2004,
            num_parts: 221,
            theme_id: Some(1),
            img_url: "https://example.com/7140.jpg".to_string(),
        },
        NewSet {
            set_num: "10256".to_string(),
            name: "Taj Mahal".to_string(),
            year: 2017,
            num_parts: 5923,
            theme_id: Some(2),
            img_url: "https://example.com/10256.jpg".to_string(),
        },
        NewSet {
            set_num: "1550".to_string(),
            name: "Sterling Super Caravelle".to_string(),
            year: 1972,
            num_parts: 170,
            theme_id: None,
            img_url: "https://example.com/1550.jpg".to_string(),
        },
    ]
}

async fn seeded_store() -> Result<(CatalogStore, TempDir)> {
    let (store, dir) = empty_store().await?;
    store.sync_schema().await?;
    store.seed(&sample_themes(), &sample_sets()).await?;
    Ok((store, dir))
}

#[tokio::test]
async fn get_set_by_num_returns_matching_set() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let set = store.get_set_by_num("7140").await?;
    assert_eq!(set.set_num, "7140");
    assert_eq!(set.name, "City Bus");
    assert_eq!(set.theme.as_ref().map(|t| t.name.as_str()), Some("City"));
    Ok(())
}

#[tokio::test]
async fn get_set_by_num_fails_for_absent_key() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let err = store.get_set_by_num("9999").await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn theme_filter_is_case_insensitive_substring() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let sets = store.get_sets_by_theme("city").await?;
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].set_num, "7140");

    // Substring of "Creator Expert", different case
    let sets = store.get_sets_by_theme("EXPERT").await?;
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].set_num, "10256");
    Ok(())
}

#[tokio::test]
async fn theme_filter_fails_when_nothing_matches() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let err = store.get_sets_by_theme("castle").await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn get_all_sets_attaches_themes_with_left_join_semantics() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let sets = store.get_all_sets().await?;
    assert_eq!(sets.len(), sample_sets().len());

    let bus = sets.iter().find(|s| s.set_num == "7140").unwrap();
    assert_eq!(bus.theme.as_ref().map(|t| t.id), Some(1));

    // A set with no theme still appears, theme absent
    let orphan = sets.iter().find(|s| s.set_num == "1550").unwrap();
    assert!(orphan.theme.is_none());
    Ok(())
}

#[tokio::test]
async fn edit_set_updates_only_supplied_fields() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let changes = SetChanges {
        name: Some("City Bus v2".to_string()),
        ..Default::default()
    };
    store.edit_set("7140", &changes).await?;

    let set = store.get_set_by_num("7140").await?;
    assert_eq!(set.name, "City Bus v2");
    assert_eq!(set.year, 2004);
    assert_eq!(set.num_parts, 221);
    assert_eq!(set.theme_id, Some(1));
    Ok(())
}

#[tokio::test]
async fn edit_set_of_absent_key_succeeds_silently() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let changes = SetChanges {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };
    store.edit_set("9999", &changes).await?;
    Ok(())
}

#[tokio::test]
async fn delete_set_removes_the_row() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    store.delete_set("7140").await?;
    let err = store.get_set_by_num("7140").await.unwrap_err();
    assert!(err.is_not_found());

    // Deleting an absent key is not an error
    store.delete_set("7140").await?;
    Ok(())
}

#[tokio::test]
async fn add_set_then_read_back() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let new_set = NewSet {
        set_num: "60197".to_string(),
        name: "Passenger Train".to_string(),
        year: 2018,
        num_parts: 677,
        theme_id: Some(1),
        img_url: "https://example.com/60197.jpg".to_string(),
    };
    store.add_set(&new_set).await?;

    let set = store.get_set_by_num("60197").await?;
    assert_eq!(set.name, "Passenger Train");
    assert_eq!(set.theme.as_ref().map(|t| t.name.as_str()), Some("City"));
    Ok(())
}

#[tokio::test]
async fn add_set_with_duplicate_key_is_a_backend_error() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let duplicate = NewSet {
        set_num: "7140".to_string(),
        name: "Impostor".to_string(),
        year: 2020,
        num_parts: 1,
        theme_id: None,
        img_url: "https://example.com/x.jpg".to_string(),
    };
    let err = store.add_set(&duplicate).await.unwrap_err();
    assert!(!err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn get_all_themes_returns_seeded_rows() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    let themes = store.get_all_themes().await?;
    assert_eq!(themes.len(), 2);
    assert!(themes.iter().any(|t| t.name == "City"));
    Ok(())
}

#[tokio::test]
async fn initialize_succeeds_once_schema_exists() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    store.initialize().await?;
    // Idempotent: a second call is a no-op
    store.initialize().await?;
    Ok(())
}

#[tokio::test]
async fn initialize_fails_on_an_unmigrated_database() -> Result<()> {
    let (store, _dir) = empty_store().await?;

    // Readiness check runs before the schema sync, so a brand-new database
    // is rejected until `migrate` has been run
    assert!(store.initialize().await.is_err());
    Ok(())
}

#[tokio::test]
async fn seed_is_idempotent() -> Result<()> {
    let (store, _dir) = seeded_store().await?;

    store.seed(&sample_themes(), &sample_sets()).await?;
    assert_eq!(store.get_all_themes().await?.len(), 2);
    assert_eq!(store.get_all_sets().await?.len(), sample_sets().len());
    Ok(())
}
