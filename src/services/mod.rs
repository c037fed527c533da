pub mod dashboard;
pub mod ledger;
pub mod purchase;
pub mod signup;
