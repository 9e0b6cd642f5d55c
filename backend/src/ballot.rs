//! Vote submission rules.
//!
//! A submission is checked against a fixed sequence of rules and the first
//! failing rule decides the message shown on the re-rendered form.

use thiserror::Error;

use crate::models::{Candidate, NewVote, User};

pub const SUCCESS_MESSAGE: &str = "投票に成功しました";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoteRejection {
    /// No user matches the submitted name, address and mynumber.
    #[error("個人情報に誤りがあります")]
    InvalidPersonalInfo,
    /// Requested units would push the user past their allowance, or the
    /// requested count is missing or negative.
    #[error("投票数が上限を超えています")]
    LimitExceeded,
    #[error("候補者を記入してください")]
    MissingCandidate,
    #[error("候補者を正しく記入してください")]
    UnknownCandidate,
    #[error("投票理由を記入してください")]
    MissingKeyword,
}

impl VoteRejection {
    pub fn message(self) -> &'static str {
        match self {
            VoteRejection::InvalidPersonalInfo => "個人情報に誤りがあります",
            VoteRejection::LimitExceeded => "投票数が上限を超えています",
            VoteRejection::MissingCandidate => "候補者を記入してください",
            VoteRejection::UnknownCandidate => "候補者を正しく記入してください",
            VoteRejection::MissingKeyword => "投票理由を記入してください",
        }
    }
}

/// What the database knows about a submission.
#[derive(Debug)]
pub struct Ballot<'a> {
    pub user: Option<&'a User>,
    /// Vote units already recorded for `user`.
    pub voted: i64,
    pub requested: Option<i64>,
    pub candidate_name: &'a str,
    pub candidate: Option<&'a Candidate>,
    pub keyword: &'a str,
}

/// An accepted submission, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedVote {
    pub user_id: i32,
    pub candidate_id: i32,
    pub units: usize,
    pub keyword: String,
}

impl AcceptedVote {
    /// One row per vote unit.
    pub fn rows(&self) -> Vec<NewVote> {
        (0..self.units)
            .map(|_| NewVote {
                user_id: self.user_id,
                candidate_id: self.candidate_id,
                keyword: self.keyword.clone(),
            })
            .collect()
    }
}

pub fn check(ballot: &Ballot<'_>) -> Result<AcceptedVote, VoteRejection> {
    let user = ballot.user.ok_or(VoteRejection::InvalidPersonalInfo)?;

    let requested = match ballot.requested {
        Some(n)
            if n >= 0
                && ballot
                    .voted
                    .checked_add(n)
                    .is_some_and(|total| total <= i64::from(user.votes)) =>
        {
            n
        }
        _ => return Err(VoteRejection::LimitExceeded),
    };

    if ballot.candidate_name.is_empty() {
        return Err(VoteRejection::MissingCandidate);
    }
    let candidate = ballot.candidate.ok_or(VoteRejection::UnknownCandidate)?;

    if ballot.keyword.is_empty() {
        return Err(VoteRejection::MissingKeyword);
    }

    Ok(AcceptedVote {
        user_id: user.id,
        candidate_id: candidate.id,
        units: requested as usize,
        keyword: ballot.keyword.to_string(),
    })
}
