pub mod aggregator;
pub mod manager;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{
    AggregateResult, Aggregator, CallOutcome, Capability, CapabilityKind, Payload, ProviderCall,
};
pub use manager::ProviderRegistry;
pub use traits::ProviderAdapter;
pub use types::{ProviderId, TimeWindow};
