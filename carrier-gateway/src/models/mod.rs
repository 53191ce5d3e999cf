pub mod requests;
pub mod route;

pub use requests::ForwardRequest;
pub use route::Route;
