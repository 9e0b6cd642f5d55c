use rocket_db_pools::Connection;

use crate::db::{self, Ishocon2Db};
use crate::error::AppError;

// Route to wipe every vote before a benchmark run
#[get("/initialize")]
pub async fn initialize(mut db: Connection<Ishocon2Db>) -> Result<(), AppError> {
    let deleted = db::reset(&mut db).await?;
    tracing::info!(deleted, "votes reset");
    Ok(())
}
