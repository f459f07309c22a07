pub mod economy;
pub mod health;
