mod account_actor;

pub use account_actor::AccountActor;
