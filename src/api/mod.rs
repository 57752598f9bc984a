//! API Module
//!
//! HTTP handlers, middleware and routing for the CRM server.
//!
//! # Endpoints
//! - `GET /customers` - List customers
//! - `GET /customers/:id` - Fetch one customer
//! - `POST /customers/add` - Create a customer
//! - `PUT|POST /customers/update/:id` - Replace a customer's fields
//! - `DELETE|POST /customers/delete/:id` - Remove a customer
//! - `GET /get`, `POST /post`, `PUT /put`, `DELETE /delete` - Echo endpoints
//! - `POST /upload` - Multipart file upload
//! - `GET /secure` - Bearer-token protected endpoint

pub mod customers;
pub mod demo;
pub mod middleware;
pub mod negotiate;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
