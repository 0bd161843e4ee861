mod routes;

pub use routes::{init_routes, json_config};
