//! User account and health-profile database operations.

use anyhow::Result;
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};
use shared_types::{HealthProfileEntry, User};

use crate::models::{NewProfileEntry, NewUser};

pub async fn get_by_id(conn: &mut AsyncPgConnection, user: i32) -> Result<Option<User>> {
    use crate::schema::users::dsl::*;

    let row = users
        .filter(user_id.eq(user))
        .first::<User>(conn)
        .await
        .optional()?;

    Ok(row)
}

pub async fn get_by_email(conn: &mut AsyncPgConnection, email_val: &str) -> Result<Option<User>> {
    use crate::schema::users::dsl::*;

    let row = users
        .filter(email.eq(email_val))
        .first::<User>(conn)
        .await
        .optional()?;

    Ok(row)
}

pub async fn create(
    conn: &mut AsyncPgConnection,
    full_name_val: &str,
    email_val: &str,
    password_hash_val: &str,
) -> Result<User, diesel::result::Error> {
    use crate::schema::users::dsl::*;

    diesel::insert_into(users)
        .values(NewUser {
            full_name: full_name_val,
            email: email_val,
            password_hash: password_hash_val,
        })
        .get_result::<User>(conn)
        .await
}

pub async fn update_name(conn: &mut AsyncPgConnection, user: i32, name: &str) -> Result<bool> {
    use crate::schema::users::dsl::*;

    let updated = diesel::update(users.filter(user_id.eq(user)))
        .set(full_name.eq(name))
        .execute(conn)
        .await?;

    Ok(updated > 0)
}

/// Replace the health-profile fields and append a history entry, in one
/// transaction so the history never diverges from the current profile.
pub async fn update_health_profile(
    conn: &mut AsyncPgConnection,
    user: i32,
    height: Option<f64>,
    weight: Option<f64>,
    conditions: Option<&str>,
) -> Result<bool> {
    use crate::schema::user_health_profile_history::dsl as history;
    use crate::schema::users::dsl::*;

    let updated = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let updated = diesel::update(users.filter(user_id.eq(user)))
                    .set((
                        height_cm.eq(height),
                        weight_kg.eq(weight),
                        medical_conditions.eq(conditions),
                    ))
                    .execute(conn)
                    .await?;

                if updated > 0 {
                    diesel::insert_into(history::user_health_profile_history)
                        .values(NewProfileEntry {
                            user_id: user,
                            height_cm: height,
                            weight_kg: weight,
                            medical_conditions: conditions,
                        })
                        .execute(conn)
                        .await?;
                }

                Ok(updated > 0)
            }
            .scope_boxed()
        })
        .await?;

    Ok(updated)
}

pub async fn profile_history(
    conn: &mut AsyncPgConnection,
    user: i32,
    limit: i64,
) -> Result<Vec<HealthProfileEntry>> {
    use crate::schema::user_health_profile_history::dsl::*;

    let rows = user_health_profile_history
        .filter(user_id.eq(user))
        .order_by(created_at.desc())
        .limit(limit)
        .load::<HealthProfileEntry>(conn)
        .await?;

    Ok(rows)
}
