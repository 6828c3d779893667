pub mod account_page;
pub mod diet_page;
pub mod general_page;
