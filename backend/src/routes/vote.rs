use rocket::form::Form;
use rocket_db_pools::Connection;
use rocket_dyn_templates::Template;

use crate::ballot::SUCCESS_MESSAGE;
use crate::db::{self, Ishocon2Db};
use crate::election::VoteView;
use crate::error::AppError;
use crate::models::VoteForm;

// Route to show the empty vote form
#[get("/vote")]
pub async fn vote_form(mut db: Connection<Ishocon2Db>) -> Result<Template, AppError> {
    let candidates = db::all_candidates(&mut db).await?;

    Ok(Template::render(
        "vote",
        VoteView {
            candidates,
            message: String::new(),
        },
    ))
}

// Route to cast one or more vote units
#[post("/vote", data = "<form>")]
pub async fn cast_vote(
    mut db: Connection<Ishocon2Db>,
    form: Form<VoteForm>,
) -> Result<Template, AppError> {
    let message = match db::cast_vote(&mut db, &form).await? {
        Ok(accepted) => {
            tracing::debug!(
                user_id = accepted.user_id,
                candidate_id = accepted.candidate_id,
                units = accepted.units,
                "vote accepted"
            );
            SUCCESS_MESSAGE
        }
        Err(rejection) => rejection.message(),
    };

    let candidates = db::all_candidates(&mut db).await?;

    Ok(Template::render(
        "vote",
        VoteView {
            candidates,
            message: message.to_string(),
        },
    ))
}
