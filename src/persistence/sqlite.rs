use super::{PersistenceResult, TrackerStore};
use crate::allocation::Allocation;
use crate::leave::ResourceLeave;
use crate::project::Project;
use crate::resource::{Resource, Role};
use crate::tracker::Tracker;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

pub struct SqliteTrackerStore {
    connection: Mutex<Connection>,
}

const SNAPSHOT_VERSION: i64 = 1;

impl SqliteTrackerStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS tracker_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                snapshot_version INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS roles (
                id TEXT PRIMARY KEY,
                role_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS resources (
                id TEXT PRIMARY KEY,
                resource_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                project_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS leaves (
                id TEXT PRIMARY KEY,
                leave_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS allocations (
                id TEXT PRIMARY KEY,
                allocation_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_records<T: serde::Serialize>(
        tx: &rusqlite::Transaction,
        table: &str,
        json_column: &str,
        records: &[(String, T)],
    ) -> PersistenceResult<()> {
        tx.execute(&format!("DELETE FROM {table}"), [])?;
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} (id, {json_column}) VALUES (?1, ?2)"
        ))?;
        for (id, record) in records {
            let json = serde_json::to_string(record)?;
            stmt.execute(params![id, json])?;
        }
        Ok(())
    }

    fn load_json_rows(conn: &Connection, table: &str, json_column: &str) -> PersistenceResult<Vec<String>> {
        let mut stmt =
            conn.prepare(&format!("SELECT {json_column} FROM {table} ORDER BY id ASC"))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut payloads = Vec::new();
        for json in rows {
            payloads.push(json?);
        }
        Ok(payloads)
    }
}

impl TrackerStore for SqliteTrackerStore {
    fn save_tracker(&self, tracker: &Tracker) -> PersistenceResult<()> {
        super::validate_tracker(tracker)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM tracker_meta", [])?;
        tx.execute(
            "INSERT INTO tracker_meta (id, snapshot_version) VALUES (1, ?1)",
            params![SNAPSHOT_VERSION],
        )?;

        let roles: Vec<(String, Role)> = tracker
            .roles()
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();
        Self::save_records(&tx, "roles", "role_json", &roles)?;

        let resources: Vec<(String, Resource)> = tracker
            .resources()
            .iter()
            .map(|r| (r.id.clone(), r.clone()))
            .collect();
        Self::save_records(&tx, "resources", "resource_json", &resources)?;

        let projects: Vec<(String, Project)> = tracker
            .projects()
            .iter()
            .map(|p| (p.id.clone(), p.clone()))
            .collect();
        Self::save_records(&tx, "projects", "project_json", &projects)?;

        let leaves: Vec<(String, ResourceLeave)> = tracker
            .leaves()
            .iter()
            .map(|l| (l.id.clone(), l.clone()))
            .collect();
        Self::save_records(&tx, "leaves", "leave_json", &leaves)?;

        let allocations: Vec<(String, Allocation)> = tracker
            .allocations()?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();
        Self::save_records(&tx, "allocations", "allocation_json", &allocations)?;

        tx.commit()?;
        Ok(())
    }

    fn load_tracker(&self) -> PersistenceResult<Option<Tracker>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT snapshot_version FROM tracker_meta WHERE id = 1")?;
        let version: Option<i64> = stmt.query_row([], |row| row.get(0)).optional()?;
        if version.is_none() {
            return Ok(None);
        }

        let mut roles = Vec::new();
        for json in Self::load_json_rows(&conn, "roles", "role_json")? {
            roles.push(serde_json::from_str::<Role>(&json)?);
        }
        let mut resources = Vec::new();
        for json in Self::load_json_rows(&conn, "resources", "resource_json")? {
            resources.push(serde_json::from_str::<Resource>(&json)?);
        }
        let mut projects = Vec::new();
        for json in Self::load_json_rows(&conn, "projects", "project_json")? {
            projects.push(serde_json::from_str::<Project>(&json)?);
        }
        let mut leaves = Vec::new();
        for json in Self::load_json_rows(&conn, "leaves", "leave_json")? {
            leaves.push(serde_json::from_str::<ResourceLeave>(&json)?);
        }
        let mut allocations = Vec::new();
        for json in Self::load_json_rows(&conn, "allocations", "allocation_json")? {
            allocations.push(serde_json::from_str::<Allocation>(&json)?);
        }

        super::validate_allocations(&allocations)?;

        let mut tracker = Tracker::from_parts(roles, resources, projects, leaves);
        for allocation in allocations {
            tracker.upsert_allocation_record(allocation)?;
        }
        super::validate_tracker(&tracker)?;

        Ok(Some(tracker))
    }
}
