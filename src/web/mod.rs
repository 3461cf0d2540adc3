pub mod admin;
pub mod error;
pub mod index;
pub mod login;
pub mod logout;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod transactions;

/// Configures the web app by adding services from each web file.
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    // Descending order. Route resolution will stop at the first match.
    index::configure(conf);
    admin::configure(conf);
    login::configure(conf);
    logout::configure(conf);
    orders::configure(conf);
    products::configure(conf);
    promotions::configure(conf);
    transactions::configure(conf);
}
