//! Tag database operations. Every query is scoped by the owning user.

use anyhow::Result;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use shared_types::Tag;

use crate::models::NewTag;

pub async fn list_all(conn: &mut AsyncPgConnection, user: i32) -> Result<Vec<Tag>> {
    use crate::schema::tags::dsl::*;

    let rows = tags
        .filter(user_id.eq(user))
        .order_by(tag_id.desc())
        .load::<Tag>(conn)
        .await?;

    Ok(rows)
}

pub async fn get_by_id(
    conn: &mut AsyncPgConnection,
    user: i32,
    tag: i32,
) -> Result<Option<Tag>> {
    use crate::schema::tags::dsl::*;

    let row = tags
        .filter(tag_id.eq(tag).and(user_id.eq(user)))
        .first::<Tag>(conn)
        .await
        .optional()?;

    Ok(row)
}

pub async fn create(
    conn: &mut AsyncPgConnection,
    user: i32,
    title_val: &str,
    color_val: &str,
) -> Result<Tag> {
    use crate::schema::tags::dsl::*;

    let row = diesel::insert_into(tags)
        .values(NewTag {
            user_id: user,
            title: title_val,
            color: color_val,
        })
        .get_result::<Tag>(conn)
        .await?;

    Ok(row)
}

pub async fn update(
    conn: &mut AsyncPgConnection,
    user: i32,
    tag: i32,
    title_val: &str,
    color_val: &str,
) -> Result<Option<Tag>> {
    use crate::schema::tags::dsl::*;

    let row = diesel::update(tags.filter(tag_id.eq(tag).and(user_id.eq(user))))
        .set((title.eq(title_val), color.eq(color_val)))
        .get_result::<Tag>(conn)
        .await
        .optional()?;

    Ok(row)
}

/// Deletes the tag only; referencing tasks, chains and nodes keep existing
/// with their tag reference nulled by the schema's SET NULL policy.
pub async fn delete(conn: &mut AsyncPgConnection, user: i32, tag: i32) -> Result<bool> {
    use crate::schema::tags::dsl::*;

    let deleted = diesel::delete(tags.filter(tag_id.eq(tag).and(user_id.eq(user))))
        .execute(conn)
        .await?;

    Ok(deleted > 0)
}
