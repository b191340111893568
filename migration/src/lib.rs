pub use sea_orm_migration::prelude::*;

mod m20260705_000001_create_users_table;
mod m20260705_000002_create_profiles_table;
mod m20260705_000003_create_portfolios_table;
mod m20260706_000004_create_bookings_table;
mod m20260706_000005_create_orders_table;
mod m20260707_000006_create_chats_table;
mod m20260707_000007_create_messages_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260705_000001_create_users_table::Migration),
            Box::new(m20260705_000002_create_profiles_table::Migration),
            Box::new(m20260705_000003_create_portfolios_table::Migration),
            Box::new(m20260706_000004_create_bookings_table::Migration),
            Box::new(m20260706_000005_create_orders_table::Migration),
            Box::new(m20260707_000006_create_chats_table::Migration),
            Box::new(m20260707_000007_create_messages_table::Migration),
        ]
    }
}
