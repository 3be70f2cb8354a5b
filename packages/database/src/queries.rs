//! Database query functions for member records.
//!
//! The rollup engine runs its own grouped queries; this module covers
//! point lookups and the subordinate-account listing.

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};
use voter_reach_database_models::MemberRow;
use voter_reach_location_models::{Designation, LocationLevel, LocationPath};

use crate::DbError;

const MEMBER_COLUMNS: &str = "id, full_name, email, phone, designation, is_admin,
             state, lga, ward, polling_unit, has_pvc, created_at";

fn member_from_row(row: &switchy_database::Row) -> MemberRow {
    let created_at: Option<chrono::NaiveDateTime> = row.to_value("created_at").unwrap_or(None);

    MemberRow {
        id: row.to_value("id").unwrap_or_default(),
        full_name: row.to_value("full_name").unwrap_or_default(),
        email: row.to_value("email").unwrap_or(None),
        phone: row.to_value("phone").unwrap_or(None),
        designation: row.to_value("designation").unwrap_or_default(),
        is_admin: row.to_value("is_admin").unwrap_or(false),
        state: row.to_value("state").unwrap_or(None),
        lga: row.to_value("lga").unwrap_or(None),
        ward: row.to_value("ward").unwrap_or(None),
        polling_unit: row.to_value("polling_unit").unwrap_or(None),
        has_pvc: row.to_value("has_pvc").unwrap_or(false),
        created_at: created_at
            .map(|n| chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(n, chrono::Utc)),
    }
}

/// Looks up a member by primary key.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn find_member_by_id(db: &dyn Database, id: i64) -> Result<Option<MemberRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"),
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(rows.first().map(member_from_row))
}

/// Lists accounts holding `designation`, confined to the subtree rooted
/// at `within`, in name order.
///
/// Used for the subordinate listing: the caller passes the designation
/// one tier below their own and their assigned subtree root.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn find_subordinates(
    db: &dyn Database,
    designation: Designation,
    within: &LocationPath,
) -> Result<Vec<MemberRow>, DbError> {
    let mut frags = vec!["designation = $1".to_string()];
    let mut params = vec![DatabaseValue::String(designation.as_ref().to_string())];

    for (level, column) in [
        (LocationLevel::State, "state"),
        (LocationLevel::Lga, "lga"),
        (LocationLevel::Ward, "ward"),
        (LocationLevel::PollingUnit, "polling_unit"),
    ] {
        if let Some(name) = within.get(level) {
            frags.push(format!("{column} = ${}", params.len() + 1));
            params.push(DatabaseValue::String(name.to_string()));
        }
    }

    let sql = format!(
        "SELECT {MEMBER_COLUMNS} FROM members WHERE {} ORDER BY full_name",
        frags.join(" AND ")
    );

    let rows = db.query_raw_params(&sql, &params).await?;

    Ok(rows.iter().map(member_from_row).collect())
}
