pub mod firewall_vpc;
pub mod image;
pub mod server;
pub mod task;
pub mod volume;
