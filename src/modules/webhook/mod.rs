pub mod controller;
pub mod log;
pub mod model;
pub mod routes;
pub mod schema;
pub mod verify;
