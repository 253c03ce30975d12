use diesel::prelude::*;

use crate::domain::types::{Email, UserId};
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::association::clone_general_graph;
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, UserReader, UserWriter,
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }

    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = DbNewUser::from(user);

        let created = conn.immediate_transaction(|conn| {
            let taken = users::table
                .filter(users::email.eq(user.email.as_str()))
                .select(users::id)
                .first::<i32>(conn)
                .optional()?;
            if taken.is_some() {
                return Err(RepositoryError::Conflict(format!(
                    "email {} is already registered",
                    user.email
                )));
            }

            let created: User = diesel::insert_into(users::table)
                .values(&db_user)
                .get_result::<DbUser>(conn)?
                .try_into()?;
            clone_general_graph(conn, created.id)?;
            Ok(created)
        })?;

        Ok(created)
    }

    fn bootstrap_user_associations(&self, user_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let exists = users::table
                .find(user_id.get())
                .select(users::id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                return Err(RepositoryError::NotFound(format!("user {user_id}")));
            }
            clone_general_graph(conn, user_id)
        })
    }

    fn delete_user(&self, user_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::{
            categories, category_pictograms, hidden_pictograms, phrases, pictograms, user_settings,
            users,
        };

        let mut conn = self.conn()?;
        let owner = user_id.get();

        let affected = conn.immediate_transaction(|conn| {
            let owned_categories = categories::table
                .filter(categories::user_id.assume_not_null().eq(owner))
                .select(categories::id)
                .load::<i32>(conn)?;
            let owned_pictograms = pictograms::table
                .filter(pictograms::user_id.assume_not_null().eq(owner))
                .select(pictograms::id)
                .load::<i32>(conn)?;

            let unlinked = diesel::delete(
                category_pictograms::table.filter(
                    category_pictograms::user_id
                        .assume_not_null()
                        .eq(owner)
                        .or(category_pictograms::category_id.eq_any(owned_categories.clone()))
                        .or(category_pictograms::pictogram_id.eq_any(owned_pictograms.clone())),
                ),
            )
            .execute(conn)?;
            let unhidden = diesel::delete(
                hidden_pictograms::table.filter(
                    hidden_pictograms::user_id
                        .eq(owner)
                        .or(hidden_pictograms::pictogram_id.eq_any(owned_pictograms.clone())),
                ),
            )
            .execute(conn)?;
            diesel::delete(
                pictograms::table.filter(pictograms::user_id.assume_not_null().eq(owner)),
            )
            .execute(conn)?;
            diesel::delete(
                categories::table.filter(categories::user_id.assume_not_null().eq(owner)),
            )
            .execute(conn)?;
            let forgotten = diesel::delete(phrases::table.filter(phrases::user_id.eq(owner)))
                .execute(conn)?;
            diesel::delete(user_settings::table.find(owner)).execute(conn)?;
            let deleted = diesel::delete(users::table.find(owner)).execute(conn)?;

            log::info!(
                "Deleted user {user_id} with {} categories, {} pictograms, {unlinked} \
                 associations, {unhidden} hide entries and {forgotten} phrases",
                owned_categories.len(),
                owned_pictograms.len()
            );
            Ok::<_, RepositoryError>(deleted)
        })?;

        Ok(affected)
    }
}
