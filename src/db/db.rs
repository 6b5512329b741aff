use crate::db::migrations;
use crate::libs::config::Config;
use crate::libs::error::AppError;
use rusqlite::Connection;

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens a connection to the configured database file.
    ///
    /// Handlers call this once per request; the connection is dropped on
    /// every exit path when the `Db` goes out of scope.
    pub fn open(config: &Config) -> Result<Db, AppError> {
        let conn: Connection = Connection::open(&config.db_path)?;

        Ok(Db { conn })
    }

    /// Opens the database and applies any pending schema migrations.
    ///
    /// Called once at startup (and from test setup). Request handlers use
    /// [`Db::open`], which assumes the schema is already in place.
    pub fn init(config: &Config) -> anyhow::Result<Db> {
        let mut db = Db::open(config)?;
        migrations::init_with_migrations(&mut db.conn)?;

        Ok(db)
    }
}
