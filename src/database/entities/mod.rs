pub mod credits;
pub mod dictionary;
pub mod payments;
pub mod plans;
pub mod users;

pub use credits::Entity as Credits;
pub use dictionary::Entity as Dictionary;
pub use payments::Entity as Payments;
pub use plans::Entity as Plans;
pub use users::Entity as Users;

// Type aliases
pub type UserRecord = users::Model;
pub type CreditRecord = credits::Model;
pub type CategoryRecord = dictionary::Model;
pub type PlanRecord = plans::Model;
pub type PaymentRecord = payments::Model;
