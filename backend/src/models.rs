use diesel::prelude::*;
use rocket::FromForm;
use rocket::serde::Serialize;

use crate::schema::{candidates, users, votes};

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[serde(crate = "rocket::serde")]
#[diesel(table_name = candidates)]
pub struct Candidate {
    pub id: i32,
    pub name: String,
    pub political_party: String,
    pub sex: String,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub mynumber: String,
    /// Total vote units this user may ever cast.
    pub votes: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub struct NewVote {
    pub user_id: i32,
    pub candidate_id: i32,
    pub keyword: String,
}

/// A candidate together with the number of votes cast for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CandidateResult {
    pub id: i32,
    pub name: String,
    pub political_party: String,
    pub sex: String,
    pub count: i64,
}

impl From<(Candidate, i64)> for CandidateResult {
    fn from((candidate, count): (Candidate, i64)) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            political_party: candidate.political_party,
            sex: candidate.sex,
            count,
        }
    }
}

#[derive(Debug, FromForm)]
pub struct VoteForm {
    #[field(default = String::new())]
    pub name: String,
    #[field(default = String::new())]
    pub address: String,
    #[field(default = String::new())]
    pub mynumber: String,
    #[field(default = String::new())]
    pub candidate: String,
    pub vote_count: Option<i64>,
    #[field(default = String::new())]
    pub keyword: String,
}
