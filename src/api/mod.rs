pub mod contact;
pub mod health;
pub mod swagger;
pub mod tasks;
pub mod users;
