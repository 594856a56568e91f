pub mod credits;
pub mod dictionary;
pub mod payments;
pub mod plans;
pub mod users;

pub use credits::CreditsDao;
pub use dictionary::DictionaryDao;
pub use payments::PaymentsDao;
pub use plans::{NewPlan, PlanWithCategory, PlansDao};
pub use users::UsersDao;
