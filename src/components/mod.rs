pub mod navbar;
pub mod plane;
