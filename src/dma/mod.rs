//! DMA-facing memory: buffer pool, descriptor layouts and the ring adapter.
//!
//! # Architecture
//!
//! - [`BufferPool`]: statically allocated receive and transmit regions
//! - [`DescriptorRing`]: ownership view of the externally owned descriptor ring
//! - [`ExternalRing`]: the concrete adapter over HAL descriptor memory
//!
//! The descriptor ring itself (chaining, wraparound, cursor advance) belongs to
//! the HAL's DMA engine. Nothing here writes a descriptor.

pub mod buffer;
pub mod descriptor;
pub mod ring;

pub use buffer::{BufferPool, DmaBuffer};
pub use descriptor::{DmaDescriptor, LegacyDmaDescriptor, OwnedDescriptor, VolatileCell};
pub use ring::{DescriptorRing, ExternalRing};
