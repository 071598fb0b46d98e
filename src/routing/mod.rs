//! Routing module
//!
//! Provides the declarative route table for the squirrel resource:
//! - (method, path pattern, operation) entries matched in fixed order
//! - explicit `{id}` segment extraction

mod matcher;

pub use matcher::{match_route, route_table, Operation, Route, RoutePattern};
