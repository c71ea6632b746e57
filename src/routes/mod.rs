pub mod contact;
pub mod health_check;
