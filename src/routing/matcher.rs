//! Route matching module
//!
//! Implements the declarative route table: (method, path pattern,
//! operation) triples evaluated in a fixed order, with explicit
//! extraction of the `{id}` path segment.

use hyper::Method;

/// Operations a route can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

/// One path segment of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// A `{name}` placeholder capturing one non-empty segment
    Param,
}

/// Path pattern made of literal segments and `{name}` captures
#[derive(Debug, Clone)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/squirrels/{id}`
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .trim_start_matches('/')
            .split('/')
            .map(|s| {
                if s.starts_with('{') && s.ends_with('}') {
                    Segment::Param
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// Match a request path against this pattern
    ///
    /// Returns None when the path does not match; otherwise the value
    /// captured by the pattern's `{id}` segment, if it has one.
    pub fn match_path(&self, path: &str) -> Option<Option<String>> {
        let path = path.strip_prefix('/')?;

        let mut parts = path.split('/');
        let mut captured = None;
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if part != literal {
                        return None;
                    }
                }
                Segment::Param => {
                    if part.is_empty() {
                        return None;
                    }
                    captured = Some(part.to_string());
                }
            }
        }

        // Path must not have trailing segments beyond the pattern
        if parts.next().is_some() {
            return None;
        }

        Some(captured)
    }
}

/// A route table entry
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: RoutePattern,
    pub operation: Operation,
}

impl Route {
    fn new(method: Method, pattern: &str, operation: Operation) -> Self {
        Self {
            method,
            pattern: RoutePattern::new(pattern),
            operation,
        }
    }
}

/// The squirrel resource route table, in evaluation order
pub fn route_table() -> Vec<Route> {
    vec![
        Route::new(Method::GET, "/squirrels", Operation::List),
        Route::new(Method::GET, "/squirrels/{id}", Operation::Retrieve),
        Route::new(Method::POST, "/squirrels", Operation::Create),
        Route::new(Method::PUT, "/squirrels/{id}", Operation::Update),
        Route::new(Method::DELETE, "/squirrels/{id}", Operation::Delete),
    ]
}

/// Find the first route matching method and path
///
/// Returns the matched route together with the captured `{id}` segment
/// when the pattern has one.
pub fn match_route<'a>(
    method: &Method,
    path: &str,
    routes: &'a [Route],
) -> Option<(&'a Route, Option<String>)> {
    routes.iter().find_map(|route| {
        if route.method != *method {
            return None;
        }
        route.pattern.match_path(path).map(|id| (route, id))
    })
}
