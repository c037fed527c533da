pub mod course;
pub mod purchase;
pub mod referral;
pub mod user;
