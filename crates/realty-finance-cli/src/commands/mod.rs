pub mod intent;
pub mod investment;
pub mod mortgage;
pub mod rates;
