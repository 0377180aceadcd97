/// Middleware module
///
/// Custom middleware guarding authenticated routes.
mod jwt_middleware;

pub use jwt_middleware::JwtMiddleware;
