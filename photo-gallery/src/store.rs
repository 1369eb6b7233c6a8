use crate::geocode::{resolve_place, Geocoder};
use crate::models::{uri_to_path, Coordinates, ImageRecord, PlaceName};
use crate::schema::init_image_schema;
use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Params};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Error type for image store operations
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be opened or the schema could not be created
    Init(String),
    /// An operation was issued before `initialize()` succeeded
    NotInitialized,
    Read(rusqlite::Error),
    Write(rusqlite::Error),
    /// The referenced image file does not exist
    MissingFile(PathBuf),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Init(msg) => write!(f, "Storage initialization failed: {}", msg),
            StoreError::NotInitialized => write!(f, "Storage used before initialization"),
            StoreError::Read(e) => write!(f, "Storage read error: {}", e),
            StoreError::Write(e) => write!(f, "Storage write error: {}", e),
            StoreError::MissingFile(path) => {
                write!(f, "Image file does not exist: {}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Read(e) | StoreError::Write(e) => Some(e),
            _ => None,
        }
    }
}

impl StoreError {
    /// Write-side failures: constraint, I/O or dangling file reference
    pub fn is_write_error(&self) -> bool {
        matches!(self, StoreError::Write(_) | StoreError::MissingFile(_))
    }
}

const SELECT_IMAGES: &str = "SELECT id, uri, latitude, longitude, location, timestamp FROM images";
const NEWEST_FIRST: &str = "ORDER BY timestamp DESC, id DESC";

/// Local store of image records.
///
/// Constructed explicitly and passed to whoever needs it. `initialize()` must
/// succeed before any other operation; calling it again is a no-op.
pub struct ImageStore {
    conn: Connection,
    initialized: Cell<bool>,
}

impl ImageStore {
    /// Opens (or creates) the database file, creating its directory if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Init(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Init(format!("cannot open {}: {}", path.display(), e)))?;
        log::debug!("Opened image database at {}", path.display());

        Ok(Self {
            conn,
            initialized: Cell::new(false),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Init(e.to_string()))?;
        Ok(Self {
            conn,
            initialized: Cell::new(false),
        })
    }

    /// Ensures the schema exists
    pub fn initialize(&self) -> Result<(), StoreError> {
        if self.initialized.get() {
            return Ok(());
        }
        init_image_schema(&self.conn).map_err(|e| StoreError::Init(e.to_string()))?;
        self.initialized.set(true);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Closes the underlying connection
    pub fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .map_err(|(_, e)| StoreError::Init(format!("close failed: {}", e)))
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        if self.initialized.get() {
            Ok(&self.conn)
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    /// Resolves the place name for `coordinates` and inserts a new record.
    ///
    /// Geocoding failures never fail the insert; the record gets the
    /// "Unknown Location" label instead.
    pub async fn insert<G: Geocoder>(
        &self,
        geocoder: &G,
        uri: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<i64, StoreError> {
        self.conn()?;
        ensure_file_exists(uri)?;

        let place = resolve_place(geocoder, coordinates).await;
        self.insert_resolved(uri, coordinates, &place)
    }

    /// Inserts a record whose place has already been resolved
    pub fn insert_resolved(
        &self,
        uri: &str,
        coordinates: Option<Coordinates>,
        place: &PlaceName,
    ) -> Result<i64, StoreError> {
        self.insert_at(uri, coordinates, place, Utc::now().naive_utc())
    }

    fn insert_at(
        &self,
        uri: &str,
        coordinates: Option<Coordinates>,
        place: &PlaceName,
        timestamp: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        ensure_file_exists(uri)?;

        conn.execute(
            "INSERT INTO images (uri, latitude, longitude, location, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                uri,
                coordinates.map(|c| c.latitude),
                coordinates.map(|c| c.longitude),
                place.label(),
                sql_timestamp(&timestamp),
            ],
        )
        .map_err(StoreError::Write)?;

        let id = conn.last_insert_rowid();
        log::info!("Stored image {} as record {} ({})", uri, id, place.label());
        Ok(id)
    }

    /// All records, newest first
    pub fn list_all(&self) -> Result<Vec<ImageRecord>, StoreError> {
        self.query_records(&format!("{} {}", SELECT_IMAGES, NEWEST_FIRST), [])
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<ImageRecord>, StoreError> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_IMAGES),
            params![id],
            |row| ImageRecord::try_from(row),
        )
        .optional()
        .map_err(StoreError::Read)
    }

    /// Removes a record and its backing file.
    ///
    /// Returns `false` if no such record exists. A file that cannot be
    /// removed is logged and the row is deleted anyway.
    pub fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn()?;

        let uri: Option<String> = conn
            .query_row("SELECT uri FROM images WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()
            .map_err(StoreError::Read)?;

        let Some(uri) = uri else {
            log::debug!("Delete requested for unknown record {}", id);
            return Ok(false);
        };

        let shared: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM images WHERE uri = ?1 AND id != ?2",
                params![uri, id],
                |row| row.get(0),
            )
            .map_err(StoreError::Read)?;
        if shared > 0 {
            log::debug!("File {} still used by {} other record(s), keeping it", uri, shared);
        } else {
            remove_backing_file(&uri);
        }

        let rows = conn
            .execute("DELETE FROM images WHERE id = ?1", params![id])
            .map_err(StoreError::Write)?;

        log::info!("Deleted record {}", id);
        Ok(rows > 0)
    }

    /// Re-resolves the place and overwrites uri, coordinates and location.
    /// The timestamp is left untouched. Returns `false` if no such record exists.
    pub async fn update_by_id<G: Geocoder>(
        &self,
        geocoder: &G,
        id: i64,
        uri: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<bool, StoreError> {
        let exists = self
            .conn()?
            .query_row("SELECT 1 FROM images WHERE id = ?1", params![id], |_| Ok(()))
            .optional()
            .map_err(StoreError::Read)?
            .is_some();
        if !exists {
            return Ok(false);
        }
        ensure_file_exists(uri)?;

        let place = resolve_place(geocoder, coordinates).await;

        let rows = self
            .conn()?
            .execute(
                "UPDATE images SET uri = ?1, latitude = ?2, longitude = ?3, location = ?4
                 WHERE id = ?5",
                params![
                    uri,
                    coordinates.map(|c| c.latitude),
                    coordinates.map(|c| c.longitude),
                    place.label(),
                    id,
                ],
            )
            .map_err(StoreError::Write)?;

        Ok(rows > 0)
    }

    /// Case-insensitive (ASCII) substring search on the place name, newest first.
    /// `%`, `_` and `\` in the query match literally.
    pub fn search_by_location(&self, query: &str) -> Result<Vec<ImageRecord>, StoreError> {
        self.query_records(
            &format!(
                "{} WHERE location LIKE ?1 ESCAPE '\\' {}",
                SELECT_IMAGES, NEWEST_FIRST
            ),
            params![like_pattern(query)],
        )
    }

    /// Records with `start <= timestamp <= end`, newest first.
    /// Stored timestamps have millisecond precision, so `start` is rounded up
    /// and `end` down to whole milliseconds.
    pub fn search_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ImageRecord>, StoreError> {
        self.query_records(
            &format!(
                "{} WHERE timestamp BETWEEN ?1 AND ?2 {}",
                SELECT_IMAGES, NEWEST_FIRST
            ),
            params![sql_timestamp(&ceil_millis(start)), sql_timestamp(&end)],
        )
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        self.conn()?
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
            .map_err(StoreError::Read)
    }

    fn query_records<P: Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<ImageRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql).map_err(StoreError::Read)?;
        let rows = stmt
            .query_map(params, |row| ImageRecord::try_from(row))
            .map_err(StoreError::Read)?;

        let records = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Read)?;
        Ok(records)
    }
}

// Fixed-width text keeps SQLite's string comparison in chronological order
fn sql_timestamp(ts: &NaiveDateTime) -> String {
    ts.trunc_subsecs(3).format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

fn ceil_millis(ts: NaiveDateTime) -> NaiveDateTime {
    let truncated = ts.trunc_subsecs(3);
    if truncated < ts {
        truncated + Duration::milliseconds(1)
    } else {
        truncated
    }
}

fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn ensure_file_exists(uri: &str) -> Result<(), StoreError> {
    let path = uri_to_path(uri);
    if uri.is_empty() || !path.is_file() {
        return Err(StoreError::MissingFile(path));
    }
    Ok(())
}

fn remove_backing_file(uri: &str) {
    if uri.is_empty() {
        return;
    }
    let path = uri_to_path(uri);
    match std::fs::remove_file(&path) {
        Ok(()) => log::debug!("Removed image file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Image file {} already gone", path.display())
        }
        Err(e) => log::error!("Error deleting file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::GeocodeError;
    use crate::models::{UnresolvedReason, UNKNOWN_LOCATION};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    struct StubGeocoder(Result<String, GeocodeError>);

    impl Geocoder for StubGeocoder {
        async fn reverse_geocode(&self, _c: Coordinates) -> Result<String, GeocodeError> {
            self.0.clone()
        }
    }

    fn setup_store() -> ImageStore {
        let store = ImageStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    fn image_file(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, b"jpeg").unwrap();
        path.to_string_lossy().to_string()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn resolved(name: &str) -> PlaceName {
        PlaceName::Resolved(name.to_string())
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        let paris = Coordinates::new(48.8566, 2.3522);

        let geocoder = StubGeocoder(Ok("Paris, France".to_string()));
        let id = store.insert(&geocoder, &uri, paris).await.unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].uri, uri);
        assert_eq!(all[0].coordinates, paris);
        assert!(all[0].location.contains("Paris"));

        let other = store.insert(&geocoder, &uri, None).await.unwrap();
        assert_ne!(other, id);
    }

    #[tokio::test]
    async fn test_failing_geocoder_uses_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");

        let geocoder = StubGeocoder(Err(GeocodeError::Unavailable("offline".to_string())));
        let id = store
            .insert(&geocoder, &uri, Coordinates::new(48.8566, 2.3522))
            .await
            .unwrap();

        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.location, UNKNOWN_LOCATION);
        assert!(record.coordinates.is_some());
        assert!(!record.has_known_location());
    }

    #[test]
    fn test_list_all_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");

        let a = store.insert_at(&uri, None, &resolved("A"), at(9, 0, 0)).unwrap();
        let c = store.insert_at(&uri, None, &resolved("C"), at(11, 0, 0)).unwrap();
        let b = store.insert_at(&uri, None, &resolved("B"), at(10, 0, 0)).unwrap();

        let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![c, b, a]);
    }

    #[test]
    fn test_consecutive_inserts_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        let place = PlaceName::Unresolved(UnresolvedReason::NoCoordinates);

        let first = store.insert_resolved(&uri, None, &place).unwrap();
        let second = store.insert_resolved(&uri, None, &place).unwrap();

        let all = store.list_all().unwrap();
        assert_eq!(all[0].id, second);
        assert_eq!(all[1].id, first);
    }

    #[test]
    fn test_list_all_empty() {
        let store = setup_store();
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        store.insert_resolved(&uri, None, &resolved("A")).unwrap();

        assert!(!store.delete_by_id(999).unwrap());
        assert_eq!(store.count().unwrap(), 1);
        assert!(Path::new(&uri).exists());
    }

    #[test]
    fn test_delete_removes_row_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        let id = store.insert_resolved(&uri, None, &resolved("A")).unwrap();

        assert!(store.delete_by_id(id).unwrap());
        assert!(store.get_by_id(id).unwrap().is_none());
        assert!(!Path::new(&uri).exists());
    }

    #[test]
    fn test_delete_proceeds_when_file_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        let id = store.insert_resolved(&uri, None, &resolved("A")).unwrap();
        std::fs::remove_file(&uri).unwrap();

        assert!(store.delete_by_id(id).unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_accepts_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let path = image_file(&dir, "a.jpg");
        let uri = format!("file://{}", path);
        let id = store.insert_resolved(&uri, None, &resolved("A")).unwrap();

        assert!(store.delete_by_id(id).unwrap());
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_search_by_location() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");

        let p1 = store
            .insert_at(&uri, None, &resolved("Paris, France"), at(9, 0, 0))
            .unwrap();
        store
            .insert_at(&uri, None, &resolved("Berlin, Germany"), at(10, 0, 0))
            .unwrap();
        let p2 = store
            .insert_at(&uri, None, &resolved("Near paris"), at(11, 0, 0))
            .unwrap();

        let found = store.search_by_location("Paris").unwrap();
        let ids: Vec<i64> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![p2, p1]);
        assert!(found
            .iter()
            .all(|r| r.location.to_lowercase().contains("paris")));

        assert!(store.search_by_location("Tokyo").unwrap().is_empty());
    }

    #[test]
    fn test_search_by_location_matches_wildcards_literally() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        store.insert_resolved(&uri, None, &resolved("Paris")).unwrap();
        let hit = store.insert_resolved(&uri, None, &resolved("100% Paris")).unwrap();

        let found = store.search_by_location("%").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, hit);

        assert!(store.search_by_location("P_ris").unwrap().is_empty());
    }

    #[test]
    fn test_search_by_date_range_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");

        store.insert_at(&uri, None, &resolved("A"), at(8, 59, 59)).unwrap();
        let b = store.insert_at(&uri, None, &resolved("B"), at(9, 0, 0)).unwrap();
        let c = store.insert_at(&uri, None, &resolved("C"), at(9, 30, 0)).unwrap();
        let d = store.insert_at(&uri, None, &resolved("D"), at(10, 0, 0)).unwrap();
        store.insert_at(&uri, None, &resolved("E"), at(10, 0, 1)).unwrap();

        let found = store.search_by_date_range(at(9, 0, 0), at(10, 0, 0)).unwrap();
        let ids: Vec<i64> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![d, c, b]);
        assert!(found
            .iter()
            .all(|r| r.timestamp >= at(9, 0, 0) && r.timestamp <= at(10, 0, 0)));

        assert!(store
            .search_by_date_range(at(10, 0, 0), at(9, 0, 0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_search_by_date_range_sub_millisecond_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");

        store.insert_at(&uri, None, &resolved("A"), at(9, 0, 0)).unwrap();
        let b = store
            .insert_at(&uri, None, &resolved("B"), at(9, 0, 0) + Duration::milliseconds(1))
            .unwrap();

        let start = at(9, 0, 0) + Duration::microseconds(500);
        let found = store.search_by_date_range(start, at(10, 0, 0)).unwrap();
        let ids: Vec<i64> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b]);
        assert!(found.iter().all(|r| r.timestamp >= start));

        let end = at(9, 0, 0) + Duration::microseconds(900);
        let found = store.search_by_date_range(at(8, 0, 0), end).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|r| r.timestamp <= end));
    }

    #[tokio::test]
    async fn test_update_keeps_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let old_uri = image_file(&dir, "a.jpg");
        let new_uri = image_file(&dir, "b.jpg");
        let id = store
            .insert_at(&old_uri, None, &resolved("Old"), at(9, 0, 0))
            .unwrap();

        let geocoder = StubGeocoder(Ok("Lyon, France".to_string()));
        let updated = store
            .update_by_id(&geocoder, id, &new_uri, Coordinates::new(45.76, 4.83))
            .await
            .unwrap();
        assert!(updated);

        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.uri, new_uri);
        assert_eq!(record.location, "Lyon, France");
        assert_eq!(record.timestamp, at(9, 0, 0));

        let missing = store.update_by_id(&geocoder, 999, &new_uri, None).await.unwrap();
        assert!(!missing);
    }

    struct PanickingGeocoder;

    impl Geocoder for PanickingGeocoder {
        async fn reverse_geocode(&self, _c: Coordinates) -> Result<String, GeocodeError> {
            panic!("lookup for a record that does not exist");
        }
    }

    #[tokio::test]
    async fn test_update_missing_skips_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");

        let updated = store
            .update_by_id(&PanickingGeocoder, 42, &uri, Coordinates::new(45.76, 4.83))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_insert_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = dir.path().to_string_lossy().to_string();

        let err = store.insert_resolved(&uri, None, &resolved("A")).unwrap_err();
        assert!(matches!(err, StoreError::MissingFile(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_keeps_file_shared_by_other_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = image_file(&dir, "a.jpg");
        let first = store.insert_resolved(&uri, None, &resolved("A")).unwrap();
        let second = store.insert_resolved(&uri, None, &resolved("B")).unwrap();

        assert!(store.delete_by_id(first).unwrap());
        assert!(Path::new(&uri).exists());
        assert!(store.get_by_id(second).unwrap().is_some());

        assert!(store.delete_by_id(second).unwrap());
        assert!(!Path::new(&uri).exists());
    }

    #[test]
    fn test_insert_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = setup_store();
        let uri = dir.path().join("nope.jpg").to_string_lossy().to_string();

        let err = store.insert_resolved(&uri, None, &resolved("A")).unwrap_err();
        assert!(matches!(err, StoreError::MissingFile(_)));
        assert!(err.is_write_error());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_operations_require_initialize() {
        let store = ImageStore::open_in_memory().unwrap();

        assert!(matches!(store.list_all(), Err(StoreError::NotInitialized)));
        assert!(matches!(store.delete_by_id(1), Err(StoreError::NotInitialized)));
        assert!(matches!(store.count(), Err(StoreError::NotInitialized)));

        store.initialize().unwrap();
        store.initialize().unwrap();
        assert!(store.is_initialized());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("gallery.db");
        let uri = image_file(&dir, "a.jpg");

        let store = ImageStore::open(&db_path).unwrap();
        store.initialize().unwrap();
        let id = store.insert_resolved(&uri, None, &resolved("Paris")).unwrap();
        store.close().unwrap();

        let store = ImageStore::open(&db_path).unwrap();
        store.initialize().unwrap();
        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.location, "Paris");
    }
}
