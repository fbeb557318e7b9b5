/*
 * Responsibility
 * - public interface of the middleware modules
 * - http::apply (transport concerns), auth::access (credential gate)
 */
pub mod auth;
pub mod http;
