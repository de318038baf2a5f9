use std::sync::Arc;
use tempfile::TempDir;

use crate::db::{self, spawn_writer, DbPool, WriteHandle};

/// Fresh migrated database in a temp dir. Keep the `TempDir` alive for the
/// duration of the test. Must be called inside a Tokio runtime.
pub(crate) fn setup_db() -> (TempDir, Arc<DbPool>, WriteHandle) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("myfolio-test.db");
    let db_path = db::init(path.to_str().expect("utf-8 temp path")).expect("init db");
    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");
    let writer = spawn_writer((*pool).clone());
    (dir, pool, writer)
}
