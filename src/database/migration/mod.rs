use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_dictionary_table;
mod m20240101_000003_create_credits_table;
mod m20240101_000004_create_plans_table;
mod m20240101_000005_create_payments_table;
mod m20240101_000006_seed_dictionary;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_dictionary_table::Migration),
            Box::new(m20240101_000003_create_credits_table::Migration),
            Box::new(m20240101_000004_create_plans_table::Migration),
            Box::new(m20240101_000005_create_payments_table::Migration),
            Box::new(m20240101_000006_seed_dictionary::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Login,
    RegistrationDate,
}

#[derive(Iden)]
pub enum Dictionary {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum Credits {
    Table,
    Id,
    UserId,
    IssuanceDate,
    ReturnDate,
    ActualReturnDate,
    Body,
    Percent,
}

#[derive(Iden)]
pub enum Plans {
    Table,
    Id,
    Period,
    Sum,
    CategoryId,
}

#[derive(Iden)]
pub enum Payments {
    Table,
    Id,
    Sum,
    PaymentDate,
    CreditId,
    TypeId,
}
