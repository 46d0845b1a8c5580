pub mod payload_reader;
pub mod route_report;
