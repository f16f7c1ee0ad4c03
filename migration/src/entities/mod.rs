pub mod admin;
pub mod lure;
pub mod lure_view;
