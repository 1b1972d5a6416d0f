//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first matching route for a request
//! - Return matched route or explicit local dispatch
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order (route tables are small)
//! - Explicit `Dispatch::Local` rather than silent default

use axum::body::Body;
use axum::http::Request;
use thiserror::Error;

use crate::config::ProxyRule;
use crate::routing::matcher::{matcher_for, Matcher};
use crate::routing::target::{TargetError, UpstreamTarget};

/// Error type for route compilation.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Target(#[from] TargetError),
}

/// A compiled proxy rule.
#[derive(Debug)]
pub struct Route {
    context: String,
    matcher: Box<dyn Matcher>,
    target: UpstreamTarget,
}

impl Route {
    /// Compile a configured rule into a route.
    pub fn compile(rule: &ProxyRule) -> Result<Self, RouteError> {
        Ok(Self {
            context: rule.context.clone(),
            matcher: matcher_for(&rule.context)?,
            target: UpstreamTarget::parse(&rule.target)?,
        })
    }

    /// Context string the route was declared with.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Where matching requests go.
    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.matcher.matches_path(path)
    }
}

/// Where a request should be handled.
#[derive(Debug, Clone, Copy)]
pub enum Dispatch<'a> {
    /// Forward to the route's upstream.
    Forward(&'a Route),
    /// Serve from the local asset pipeline.
    Local,
}

/// Ordered, immutable proxy table.
#[derive(Debug, Default)]
pub struct ProxyRouter {
    routes: Vec<Route>,
}

impl ProxyRouter {
    /// Compile all rules, keeping their declaration order.
    pub fn from_rules(rules: &[ProxyRule]) -> Result<Self, RouteError> {
        let routes = rules
            .iter()
            .map(Route::compile)
            .collect::<Result<Vec<_>, _>>()?;

        for route in &routes {
            tracing::debug!(context = %route.context, upstream = %route.target, "Route compiled");
        }

        Ok(Self { routes })
    }

    /// First route whose matcher accepts the path.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches_path(path))
    }

    /// First route whose matcher accepts the request.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(req))
    }

    /// Decide whether a request is forwarded or served locally.
    pub fn dispatch(&self, req: &Request<Body>) -> Dispatch<'_> {
        match self.match_request(req) {
            Some(route) => Dispatch::Forward(route),
            None => Dispatch::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_router() -> ProxyRouter {
        ProxyRouter::from_rules(&[
            ProxyRule::new("/clientid", "http://localhost:8080"),
            ProxyRule::new("/orders", "http://localhost:8080"),
            ProxyRule::new("^/capture/.+", "http://localhost:8080"),
        ])
        .unwrap()
    }

    #[test]
    fn forwards_declared_prefixes() {
        let router = project_router();
        assert_eq!(router.match_path("/clientid").unwrap().context(), "/clientid");
        assert_eq!(router.match_path("/orders/42").unwrap().context(), "/orders");
        assert_eq!(
            router.match_path("/capture/ORDER-1").unwrap().context(),
            "^/capture/.+"
        );
    }

    #[test]
    fn everything_else_is_local() {
        let router = project_router();
        for path in ["/", "/index.html", "/src/main.jsx", "/capture", "/capture/", "/api/orders"] {
            assert!(router.match_path(path).is_none(), "{path} should stay local");
        }

        let req = Request::builder().uri("/assets/logo.svg").body(Body::empty()).unwrap();
        assert!(matches!(router.dispatch(&req), Dispatch::Local));
    }

    #[test]
    fn first_declared_rule_wins() {
        let router = ProxyRouter::from_rules(&[
            ProxyRule::new("/orders", "http://first:1000"),
            ProxyRule::new("^/orders/.*", "http://second:2000"),
            ProxyRule::new("/orders/special", "http://third:3000"),
        ])
        .unwrap();

        let req = Request::builder().uri("/orders/special").body(Body::empty()).unwrap();
        match router.dispatch(&req) {
            Dispatch::Forward(route) => {
                assert_eq!(route.target().authority().as_str(), "first:1000")
            }
            Dispatch::Local => panic!("expected forward"),
        }
    }

    #[test]
    fn bad_rule_fails_compilation() {
        let err = ProxyRouter::from_rules(&[ProxyRule::new("/ok", "https://secure:443")]).unwrap_err();
        assert!(matches!(err, RouteError::Target(TargetError::UnsupportedScheme(_))));
    }

    #[test]
    fn empty_table_is_all_local() {
        let router = ProxyRouter::default();
        assert!(router.match_path("/orders").is_none());

        let req = Request::builder().uri("/clientid").body(Body::empty()).unwrap();
        assert!(matches!(router.dispatch(&req), Dispatch::Local));
    }
}
