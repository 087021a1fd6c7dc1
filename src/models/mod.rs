// Domain models: the per-request snapshot and its JSON wire form

mod service;
mod snapshot;
mod system;
mod wire;

pub use service::{ServiceProcess, ServiceStats};
pub use snapshot::Snapshot;
pub use system::{DiskStats, MemoryStats, NetworkAddresses};
pub use wire::{
    CpuSection, DiskSection, MemorySection, NetworkSection, NOT_AVAILABLE, NOT_CONNECTED,
    ServiceSection, StatsResponse, SystemSection,
};
