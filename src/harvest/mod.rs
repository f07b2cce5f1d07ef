//! Harvest pipeline
//!
//! This module contains the concurrent harvesting machinery, including:
//! - Pagination planning (how many listing pages to visit)
//! - The bounded, order-preserving fan-out pool
//! - The orchestrator driving plan -> listing pages -> detail pages

mod orchestrator;
mod planner;
mod pool;

pub use orchestrator::harvest;
pub use planner::{last_page, page_size_for, plan};
pub use pool::{default_degree, map_bounded};
