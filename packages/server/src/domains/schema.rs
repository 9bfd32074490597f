//! Tables, late columns and reference rows the catalog needs at startup.

use crate::kernel::database::{
    AddedColumn, ColumnDef, ColumnType, OnDelete, SchemaPlan, SeedSet, SqlValue, TableDef,
};

pub const PROVIDERS: &str = "provider_fiscal_records";
pub const PROVIDER_SERVICES: &str = "provider_services";
pub const PROVIDER_BRANCHES: &str = "provider_branches";
pub const PROVIDER_CONTACTS: &str = "provider_contacts";
pub const SERVICE_CATALOG: &str = "service_catalog";
pub const CLIENTS: &str = "client_fiscal_records";

/// Module/sub-module pairs inserted into an empty service catalog.
pub const CATALOG_SEED: &[(&str, &str)] = &[
    ("LOGISTICA", "CUSTODIAS"),
    ("LOGISTICA", "FLETES"),
    ("LOGISTICA", "SEGURO"),
    ("LOGISTICA", "ADUANA"),
];

pub fn catalog_schema() -> SchemaPlan {
    SchemaPlan {
        tables: vec![
            fiscal_table(PROVIDERS),
            TableDef::new(
                SERVICE_CATALOG,
                vec![
                    ColumnDef::new("id", ColumnType::Identity),
                    ColumnDef::new("module", ColumnType::Text(100)).not_null(),
                    ColumnDef::new("sub_module", ColumnType::Text(100)).not_null(),
                ],
            ),
            TableDef::new(
                PROVIDER_SERVICES,
                vec![
                    ColumnDef::new("id", ColumnType::Identity),
                    provider_ref(),
                    ColumnDef::new("service_name", ColumnType::Text(200)),
                    ColumnDef::new("description", ColumnType::LongText),
                ],
            ),
            TableDef::new(
                PROVIDER_BRANCHES,
                vec![
                    ColumnDef::new("id", ColumnType::Text(50)).primary_key(),
                    provider_ref(),
                    ColumnDef::new("kind", ColumnType::Text(50)),
                    ColumnDef::new("name", ColumnType::Text(200)),
                    ColumnDef::new("country", ColumnType::Text(100)),
                    ColumnDef::new("state", ColumnType::Text(100)),
                    ColumnDef::new("municipality", ColumnType::Text(100)),
                    ColumnDef::new("locality", ColumnType::Text(100)),
                    ColumnDef::new("street", ColumnType::Text(200)),
                    ColumnDef::new("neighborhood", ColumnType::Text(100)),
                    ColumnDef::new("postal_code", ColumnType::Text(10)),
                    ColumnDef::new("exterior_number", ColumnType::Text(20)),
                    ColumnDef::new("interior_number", ColumnType::Text(20)),
                    ColumnDef::new("neighborhood_code", ColumnType::Text(20)),
                    ColumnDef::new("locality_code", ColumnType::Text(20)),
                ],
            ),
            TableDef::new(
                PROVIDER_CONTACTS,
                vec![
                    ColumnDef::new("id", ColumnType::Text(50)).primary_key(),
                    provider_ref(),
                    ColumnDef::new("area", ColumnType::Text(100)),
                    ColumnDef::new("name", ColumnType::Text(200)),
                    ColumnDef::new("phone", ColumnType::Text(50)),
                    ColumnDef::new("extension", ColumnType::Text(20)),
                    ColumnDef::new("email", ColumnType::Text(200)),
                    ColumnDef::new("extra1", ColumnType::Text(200)),
                    ColumnDef::new("extra2", ColumnType::Text(200)),
                ],
            ),
            fiscal_table(CLIENTS),
        ],
        added_columns: vec![AddedColumn {
            table: PROVIDER_SERVICES,
            column: ColumnDef::new("catalog_id", ColumnType::Integer).references(
                SERVICE_CATALOG,
                "id",
                OnDelete::SetNull,
            ),
        }],
        seeds: vec![SeedSet {
            table: SERVICE_CATALOG,
            columns: vec!["module", "sub_module"],
            rows: CATALOG_SEED
                .iter()
                .map(|(module, sub_module)| vec![SqlValue::from(*module), SqlValue::from(*sub_module)])
                .collect(),
        }],
    }
}

/// Providers and clients share one fiscal attribute set.
fn fiscal_table(name: &'static str) -> TableDef {
    TableDef::new(
        name,
        vec![
            ColumnDef::new("id", ColumnType::Text(50)).primary_key(),
            ColumnDef::new("code", ColumnType::Text(50)),
            ColumnDef::new("name", ColumnType::Text(200)),
            ColumnDef::new("tax_id", ColumnType::Text(20)),
            ColumnDef::new("address", ColumnType::LongText),
            ColumnDef::new("active", ColumnType::SmallInt),
            ColumnDef::new("registered_at", ColumnType::Text(40)),
        ],
    )
}

fn provider_ref() -> ColumnDef {
    ColumnDef::new("provider_id", ColumnType::Text(50))
        .not_null()
        .references(PROVIDERS, "id", OnDelete::Cascade)
}
