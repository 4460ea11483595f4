// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod branch;
pub mod crowd;
pub mod dates;
pub mod prediction;
pub mod repositories;
pub mod visitor_log;
