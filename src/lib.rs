pub mod app;
pub mod deeplink;
pub mod io;
pub mod logging;
pub mod payload;
