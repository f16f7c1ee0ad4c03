pub mod admin_service;
pub mod ipinfo;
pub mod lure_service;
pub mod view_service;

pub use admin_service::AdminService;
pub use ipinfo::{IpInfo, IpInfoLookup, IpInfoProvider};
pub use lure_service::{CreateLureRequest, LureService, UpdateLureRequest};
pub use view_service::ViewService;
