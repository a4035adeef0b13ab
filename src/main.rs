#[macro_use]
extern crate rocket;

use dotenv::dotenv;
use postsimple::config::Config;
use rocket::{Build, Rocket};
use tracing_subscriber::EnvFilter;

// --------------------------
//  ROCKET LAUNCH
// --------------------------
#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    // Rocket installs its own `log` logger, so ours stays off the log facade.
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }

    let config = Config::load();
    postsimple::build(&config)
}
