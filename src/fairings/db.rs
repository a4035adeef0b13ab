use crate::controllers::PostController;
use crate::repository::mysql::ensure_schema;
use crate::repository::MySqlPostRepository;
use mysql_async::{Opts, Pool};
use rocket::fairing::{self, Fairing, Info, Kind};
use rocket::{Build, Orbit, Rocket};
use tracing::{error, info, warn};

/// Shared handle on the MySQL pool, managed as Rocket state.
pub struct DBConnection {
    pub pool: Pool,
}

/// Opens the pool on ignition and disconnects it on shutdown.
pub struct DBFairing {
    database_url: String,
    auto_migrate: bool,
}

impl DBFairing {
    pub fn new(database_url: impl Into<String>, auto_migrate: bool) -> Self {
        DBFairing {
            database_url: database_url.into(),
            auto_migrate,
        }
    }
}

#[rocket::async_trait]
impl Fairing for DBFairing {
    fn info(&self) -> Info {
        Info {
            name: "MySQL post store",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        let opts = match Opts::from_url(&self.database_url) {
            Ok(opts) => opts,
            Err(e) => {
                error!(error = %e, "could not parse DATABASE_URL as a MySQL url");
                return Err(rocket);
            }
        };
        let pool = Pool::new(opts);

        if self.auto_migrate {
            if let Err(e) = ensure_schema(&pool).await {
                error!(error = %e, "could not prepare the posts table");
                return Err(rocket);
            }
            info!("posts table ready");
        }

        let controller = PostController::new(MySqlPostRepository::new(pool.clone()));
        Ok(rocket.manage(DBConnection { pool }).manage(controller))
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        let Some(db) = rocket.state::<DBConnection>() else {
            return;
        };
        match db.pool.clone().disconnect().await {
            Ok(()) => info!("database pool disconnected"),
            Err(e) => warn!(error = %e, "database pool did not disconnect cleanly"),
        }
    }
}
