pub mod table;
pub mod transport;
pub mod transports;
pub mod types;
pub mod updater;
