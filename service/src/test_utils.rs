use std::{ops::Deref, sync::Arc};

use abi::Config;
use rand::Rng;
use sqlx_db_tester::TestDb;

/// A server config pointing at a freshly migrated throwaway database.
#[derive(Clone)]
pub struct TestConfig {
    #[allow(dead_code)]
    tdb: Arc<TestDb>,
    pub config: Arc<Config>,
}

impl Deref for TestConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

impl TestConfig {
    pub fn new(filename: &str) -> Self {
        let mut config = Config::load(filename).unwrap();
        let tdb = TestDb::new(
            &config.db.host,
            config.db.port,
            &config.db.user,
            &config.db.password,
            "../migrations",
        );
        config.db.dbname = tdb.dbname.clone();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = rand::thread_rng().gen_range(20000..60000);
        Self {
            tdb: Arc::new(tdb),
            config: Arc::new(config),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new("../fixtures/config.yml")
    }
}
