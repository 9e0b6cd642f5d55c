use rocket::request::FromParam;
use rocket::response::Redirect;
use rocket_db_pools::Connection;
use rocket_dyn_templates::Template;

use crate::db::{self, Ishocon2Db};
use crate::election::{self, CandidateView, IndexView, PartyView};
use crate::error::AppError;

/// A party name taken from the path, decoded form-style (`+` is a space).
#[derive(Debug, PartialEq, Eq)]
pub struct PartyName(String);

impl PartyName {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'a> FromParam<'a> for PartyName {
    type Error = std::convert::Infallible;

    // `param` arrives percent-decoded.
    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        Ok(PartyName(param.replace('+', " ")))
    }
}

#[derive(Responder)]
pub enum CandidatePage {
    Found(Template),
    Missing(Redirect),
}

// Route to show the overall election results
#[get("/")]
pub async fn index(mut db: Connection<Ishocon2Db>) -> Result<Template, AppError> {
    let results = db::election_results(&mut db).await?;
    let party_names = db::party_names(&mut db).await?;

    Ok(Template::render("index", IndexView::build(&results, party_names)))
}

// Route to show a single candidate
#[get("/candidates/<id>")]
pub async fn candidate(
    mut db: Connection<Ishocon2Db>,
    id: i32,
) -> Result<CandidatePage, AppError> {
    let Some(candidate) = db::candidate_by_id(&mut db, id).await? else {
        return Ok(CandidatePage::Missing(Redirect::moved("/")));
    };

    let votes = db::candidate_vote_count(&mut db, candidate.id).await?;
    let keywords = db::voice_of_supporter(&mut db, &[candidate.id]).await?;

    Ok(CandidatePage::Found(Template::render(
        "candidate",
        CandidateView {
            candidate,
            votes,
            keywords,
        },
    )))
}

// Route to show a political party
#[get("/political_parties/<name>")]
pub async fn political_party(
    mut db: Connection<Ishocon2Db>,
    name: PartyName,
) -> Result<Template, AppError> {
    let name = name.into_inner();

    let results = db::election_results(&mut db).await?;
    let votes = election::party_votes(&results, &name);

    let candidates = db::candidates_by_party(&mut db, &name).await?;
    let candidate_ids: Vec<i32> = candidates.iter().map(|c| c.id).collect();
    let keywords = db::voice_of_supporter(&mut db, &candidate_ids).await?;

    Ok(Template::render(
        "political_party",
        PartyView {
            political_party: name,
            votes,
            candidates,
            keywords,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_name_turns_plus_into_space() {
        let name = PartyName::from_param("国民 10人+大活躍党").unwrap();
        assert_eq!(name.into_inner(), "国民 10人 大活躍党");
    }

    #[test]
    fn party_name_keeps_plain_names() {
        let name = PartyName::from_param("夢実現党").unwrap();
        assert_eq!(name, PartyName("夢実現党".to_string()));
    }
}
