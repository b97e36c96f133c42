pub mod explore;
pub mod home;
pub mod panels;
pub mod plot;
