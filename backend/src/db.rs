// Database connection pool and queries

use diesel::dsl::{count, count_star};
use diesel::result::Error;
use diesel_async::{AsyncConnection, AsyncMysqlConnection};
use rocket_db_pools::diesel::prelude::*;
use rocket_db_pools::diesel::MysqlPool;
use rocket_db_pools::Database;
use scoped_futures::ScopedFutureExt;

use crate::ballot::{self, AcceptedVote, Ballot, VoteRejection};
use crate::models::{Candidate, CandidateResult, User, VoteForm};
use crate::schema::{candidates, users, votes};

/// Keywords returned per voice-of-supporter query.
pub const SUPPORTER_KEYWORDS: i64 = 10;

/// Connection pool for the election database
#[derive(Database)]
#[database("ishocon2")]
pub struct Ishocon2Db(MysqlPool);

/// Every candidate with their vote count, most votes first.
pub async fn election_results(
    conn: &mut AsyncMysqlConnection,
) -> Result<Vec<CandidateResult>, Error> {
    let rows = candidates::table
        .left_join(votes::table)
        .group_by(candidates::id)
        .select((Candidate::as_select(), count(votes::id.nullable())))
        .order_by(count(votes::id.nullable()).desc())
        .load::<(Candidate, i64)>(conn)
        .await?;

    Ok(rows.into_iter().map(CandidateResult::from).collect())
}

/// Most frequent keywords among votes for the given candidates.
pub async fn voice_of_supporter(
    conn: &mut AsyncMysqlConnection,
    candidate_ids: &[i32],
) -> Result<Vec<String>, Error> {
    if candidate_ids.is_empty() {
        return Ok(Vec::new());
    }

    votes::table
        .filter(votes::candidate_id.eq_any(candidate_ids.to_vec()))
        .group_by(votes::keyword)
        .select(votes::keyword)
        .order_by(count_star().desc())
        .limit(SUPPORTER_KEYWORDS)
        .load::<String>(conn)
        .await
}

pub async fn party_names(conn: &mut AsyncMysqlConnection) -> Result<Vec<String>, Error> {
    candidates::table
        .select(candidates::political_party)
        .distinct()
        .load::<String>(conn)
        .await
}

pub async fn all_candidates(conn: &mut AsyncMysqlConnection) -> Result<Vec<Candidate>, Error> {
    candidates::table
        .select(Candidate::as_select())
        .load(conn)
        .await
}

pub async fn candidate_by_id(
    conn: &mut AsyncMysqlConnection,
    id: i32,
) -> Result<Option<Candidate>, Error> {
    candidates::table
        .find(id)
        .select(Candidate::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn candidates_by_party(
    conn: &mut AsyncMysqlConnection,
    party: &str,
) -> Result<Vec<Candidate>, Error> {
    candidates::table
        .filter(candidates::political_party.eq(party))
        .select(Candidate::as_select())
        .load(conn)
        .await
}

pub async fn candidate_vote_count(
    conn: &mut AsyncMysqlConnection,
    candidate_id: i32,
) -> Result<i64, Error> {
    votes::table
        .filter(votes::candidate_id.eq(candidate_id))
        .count()
        .get_result(conn)
        .await
}

/// Removes every vote.
pub async fn reset(conn: &mut AsyncMysqlConnection) -> Result<usize, Error> {
    diesel::delete(votes::table).execute(conn).await
}

/// Checks and records a vote submission in a single transaction.
///
/// The voter's row is locked for the duration, so two submissions from the
/// same voter cannot both pass the allowance check.
pub async fn cast_vote(
    conn: &mut AsyncMysqlConnection,
    form: &VoteForm,
) -> Result<Result<AcceptedVote, VoteRejection>, Error> {
    conn.transaction::<_, Error, _>(|conn| {
        async move {
            let user = users::table
                .filter(users::name.eq(&form.name))
                .filter(users::address.eq(&form.address))
                .filter(users::mynumber.eq(&form.mynumber))
                .select(User::as_select())
                .for_update()
                .first(conn)
                .await
                .optional()?;

            let voted: i64 = match &user {
                Some(user) => {
                    votes::table
                        .filter(votes::user_id.eq(user.id))
                        .count()
                        .get_result(conn)
                        .await?
                }
                None => 0,
            };

            let candidate = if form.candidate.is_empty() {
                None
            } else {
                candidates::table
                    .filter(candidates::name.eq(&form.candidate))
                    .select(Candidate::as_select())
                    .first(conn)
                    .await
                    .optional()?
            };

            let accepted = match ballot::check(&Ballot {
                user: user.as_ref(),
                voted,
                requested: form.vote_count,
                candidate_name: &form.candidate,
                candidate: candidate.as_ref(),
                keyword: &form.keyword,
            }) {
                Ok(accepted) => accepted,
                Err(rejection) => return Ok(Err(rejection)),
            };

            let rows = accepted.rows();
            if !rows.is_empty() {
                diesel::insert_into(votes::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
            }

            Ok(Ok(accepted))
        }
        .scope_boxed()
    })
    .await
}
