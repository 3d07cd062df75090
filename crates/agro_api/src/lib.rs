mod agro_api;
mod api;

pub use agro_api::*;
pub use agro_domain::*;
pub use agro_infra::Environment;
pub use api::*;
