use crate::db::DatabaseManager;
use crate::error::{CatalogError, Result};
use crate::models::{NewSet, Set, SetChanges, Theme};
use libsql::{Row, Value};
use tokio::sync::OnceCell;
use tracing::info;

const SET_WITH_THEME_SELECT: &str = "SELECT s.set_num, s.name, s.year, s.num_parts, s.theme_id, s.img_url, t.id, t.name
     FROM sets s LEFT JOIN themes t ON s.theme_id = t.id";

/// Sole owner of persistence access for the catalog. Every operation is a
/// single round trip to the backing database; nothing is cached.
pub struct CatalogStore {
    db: DatabaseManager,
    ready: OnceCell<()>,
}

impl CatalogStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self {
            db,
            ready: OnceCell::new(),
        }
    }

    /// Readiness check (fetch all themes) followed by a schema sync.
    /// Single-flight: the first caller runs both steps, concurrent callers
    /// await the same result, and later calls are no-ops once it has
    /// succeeded. A failed attempt is retried by the next caller.
    pub async fn initialize(&self) -> Result<()> {
        self.ready
            .get_or_try_init(|| async {
                let themes = self.get_all_themes().await?;
                info!(theme_count = themes.len(), "Themes fetched from the database");
                self.sync_schema().await?;
                info!("Database synchronized");
                Ok::<(), CatalogError>(())
            })
            .await?;
        Ok(())
    }

    /// Create the catalog tables if they are missing.
    pub async fn sync_schema(&self) -> Result<()> {
        let conn = self.db.get_connection().await?;
        let migration_sql = include_str!("../migrations/001_create_catalog_tables.sql");
        conn.execute_batch(migration_sql)
            .await
            .map_err(|e| CatalogError::database(format!("Failed to sync schema: {e}")))?;
        Ok(())
    }

    pub async fn get_all_themes(&self) -> Result<Vec<Theme>> {
        let conn = self.db.get_connection().await?;
        let mut rows = conn
            .query("SELECT id, name FROM themes", libsql::params![])
            .await?;

        let mut themes = Vec::new();
        while let Some(row) = rows.next().await? {
            themes.push(Theme {
                id: row.get::<i64>(0)?,
                name: row.get::<String>(1)?,
            });
        }
        Ok(themes)
    }

    pub async fn get_all_sets(&self) -> Result<Vec<Set>> {
        let conn = self.db.get_connection().await?;
        let mut rows = conn.query(SET_WITH_THEME_SELECT, libsql::params![]).await?;

        let mut sets = Vec::new();
        while let Some(row) = rows.next().await? {
            sets.push(row_to_set(&row)?);
        }
        Ok(sets)
    }

    /// Fetch the one set keyed by `set_num`, theme attached.
    pub async fn get_set_by_num(&self, set_num: &str) -> Result<Set> {
        let conn = self.db.get_connection().await?;
        let sql = format!("{SET_WITH_THEME_SELECT} WHERE s.set_num = ?1");
        let mut rows = conn.query(&sql, libsql::params![set_num]).await?;

        match rows.next().await? {
            Some(row) => row_to_set(&row),
            None => Err(CatalogError::not_found("Unable to find requested set")),
        }
    }

    /// All sets whose theme name contains `theme` (case-insensitive).
    pub async fn get_sets_by_theme(&self, theme: &str) -> Result<Vec<Set>> {
        let conn = self.db.get_connection().await?;
        let sql = format!(
            "{SET_WITH_THEME_SELECT} WHERE lower(t.name) LIKE '%' || lower(?1) || '%'"
        );
        let mut rows = conn.query(&sql, libsql::params![theme]).await?;

        let mut sets = Vec::new();
        while let Some(row) = rows.next().await? {
            sets.push(row_to_set(&row)?);
        }

        if sets.is_empty() {
            return Err(CatalogError::not_found("Unable to find requested sets"));
        }
        Ok(sets)
    }

    /// Insert a new set row. A duplicate `set_num` surfaces as the backing
    /// store's constraint violation.
    pub async fn add_set(&self, new_set: &NewSet) -> Result<()> {
        let conn = self.db.get_connection().await?;
        conn.execute(
            "INSERT INTO sets (set_num, name, year, num_parts, theme_id, img_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            vec![
                Value::from(new_set.set_num.clone()),
                Value::from(new_set.name.clone()),
                Value::Integer(new_set.year),
                Value::Integer(new_set.num_parts),
                opt_i64(new_set.theme_id),
                Value::from(new_set.img_url.clone()),
            ],
        )
        .await
        .map_err(|e| CatalogError::database(format!("Failed to add set: {e}")))?;

        info!(set_num = %new_set.set_num, "Set added");
        Ok(())
    }

    /// Update the supplied fields of the set keyed by `set_num`. Succeeds
    /// silently when zero rows match, like the source system.
    pub async fn edit_set(&self, set_num: &str, changes: &SetChanges) -> Result<()> {
        let Some((sql, params)) = build_update(set_num, changes) else {
            return Ok(());
        };

        let conn = self.db.get_connection().await?;
        conn.execute(&sql, params)
            .await
            .map_err(|e| CatalogError::database(format!("Failed to update set {set_num}: {e}")))?;

        info!(set_num = %set_num, "Set updated");
        Ok(())
    }

    /// Delete the set keyed by `set_num`; deleting an absent key is not an
    /// error.
    pub async fn delete_set(&self, set_num: &str) -> Result<()> {
        let conn = self.db.get_connection().await?;
        conn.execute(
            "DELETE FROM sets WHERE set_num = ?1",
            libsql::params![set_num],
        )
        .await
        .map_err(|e| CatalogError::database(format!("Failed to delete set {set_num}: {e}")))?;

        info!(set_num = %set_num, "Set deleted");
        Ok(())
    }

    /// Idempotent load of sample data; rows that already exist are left
    /// alone. Used by `migrate --seed` and by tests.
    pub async fn seed(&self, themes: &[Theme], sets: &[NewSet]) -> Result<()> {
        let conn = self.db.get_connection().await?;

        for theme in themes {
            conn.execute(
                "INSERT OR IGNORE INTO themes (id, name) VALUES (?1, ?2)",
                libsql::params![theme.id, theme.name.clone()],
            )
            .await?;
        }

        for set in sets {
            conn.execute(
                "INSERT OR IGNORE INTO sets (set_num, name, year, num_parts, theme_id, img_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                vec![
                    Value::from(set.set_num.clone()),
                    Value::from(set.name.clone()),
                    Value::Integer(set.year),
                    Value::Integer(set.num_parts),
                    opt_i64(set.theme_id),
                    Value::from(set.img_url.clone()),
                ],
            )
            .await?;
        }

        info!(
            theme_count = themes.len(),
            set_count = sets.len(),
            "Seed data loaded"
        );
        Ok(())
    }
}

/// The sample data bundled with the binary.
pub fn bundled_seed() -> Result<(Vec<Theme>, Vec<NewSet>)> {
    let themes: Vec<Theme> = serde_json::from_str(include_str!("../data/themeData.json"))?;
    let sets: Vec<NewSet> = serde_json::from_str(include_str!("../data/setData.json"))?;
    Ok((themes, sets))
}

fn row_to_set(row: &Row) -> Result<Set> {
    // Nullable columns come back as NULL for sets with no matching theme
    let joined_theme_id: Option<i64> = row.get(6).ok();
    let joined_theme_name: Option<String> = row.get(7).ok();
    let theme = match (joined_theme_id, joined_theme_name) {
        (Some(id), Some(name)) => Some(Theme { id, name }),
        _ => None,
    };

    Ok(Set {
        set_num: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        year: row.get::<i64>(2)?,
        num_parts: row.get::<i64>(3)?,
        theme_id: row.get(4).ok(),
        img_url: row.get::<String>(5)?,
        theme,
    })
}

fn opt_i64(value: Option<i64>) -> Value {
    match value {
        Some(v) => Value::Integer(v),
        None => Value::Null,
    }
}

/// Build the dynamic UPDATE statement for a partial edit. Returns `None`
/// when there is nothing to write.
fn build_update(set_num: &str, changes: &SetChanges) -> Option<(String, Vec<Value>)> {
    if changes.is_empty() {
        return None;
    }

    let mut assignments = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(name) = &changes.name {
        assignments.push("name = ?");
        params.push(Value::from(name.clone()));
    }
    if let Some(year) = changes.year {
        assignments.push("year = ?");
        params.push(Value::Integer(year));
    }
    if let Some(num_parts) = changes.num_parts {
        assignments.push("num_parts = ?");
        params.push(Value::Integer(num_parts));
    }
    if let Some(theme_id) = changes.theme_id {
        assignments.push("theme_id = ?");
        params.push(Value::Integer(theme_id));
    }
    if let Some(img_url) = &changes.img_url {
        assignments.push("img_url = ?");
        params.push(Value::from(img_url.clone()));
    }

    let sql = format!(
        "UPDATE sets SET {} WHERE set_num = ?",
        assignments.join(", ")
    );
    params.push(Value::from(set_num.to_string()));
    Some((sql, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_update_skips_empty_changes() {
        let changes = SetChanges::default();
        assert!(build_update("7140-1", &changes).is_none());
    }

    #[test]
    fn build_update_only_writes_supplied_fields() {
        let changes = SetChanges {
            name: Some("City Bus v2".to_string()),
            ..Default::default()
        };
        let (sql, params) = build_update("7140-1", &changes).unwrap();
        assert_eq!(sql, "UPDATE sets SET name = ? WHERE set_num = ?");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn build_update_joins_multiple_assignments() {
        let changes = SetChanges {
            name: Some("Taj Mahal".to_string()),
            year: Some(2017),
            num_parts: Some(5923),
            ..Default::default()
        };
        let (sql, params) = build_update("10256-1", &changes).unwrap();
        assert_eq!(
            sql,
            "UPDATE sets SET name = ?, year = ?, num_parts = ? WHERE set_num = ?"
        );
        assert_eq!(params.len(), 4);
    }
}
