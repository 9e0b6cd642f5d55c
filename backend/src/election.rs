//! Aggregations over election results and the per-page view models.

use rocket::serde::Serialize;

use crate::models::{Candidate, CandidateResult};

/// Leading candidates shown on the index page.
pub const TOP_CANDIDATES: usize = 10;

const MALE: &str = "男";
const FEMALE: &str = "女";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PartyTotal {
    pub name: String,
    pub votes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SexRatio {
    pub men: i64,
    pub women: i64,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct IndexView {
    pub candidates: Vec<CandidateResult>,
    pub parties: Vec<PartyTotal>,
    pub sex_ratio: SexRatio,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CandidateView {
    pub candidate: Candidate,
    pub votes: i64,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PartyView {
    pub political_party: String,
    pub votes: i64,
    pub candidates: Vec<Candidate>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct VoteView {
    pub candidates: Vec<Candidate>,
    pub message: String,
}

impl IndexView {
    /// `results` must already be ordered by vote count, highest first.
    pub fn build(results: &[CandidateResult], party_names: Vec<String>) -> Self {
        Self {
            candidates: leaders_and_last(results),
            parties: party_totals(results, party_names),
            sex_ratio: sex_ratio(results),
        }
    }
}

/// The top candidates plus the last-ranked one. The last is only appended
/// when it is not already among the leaders.
pub fn leaders_and_last(results: &[CandidateResult]) -> Vec<CandidateResult> {
    let mut shown: Vec<CandidateResult> = results.iter().take(TOP_CANDIDATES).cloned().collect();
    if results.len() > TOP_CANDIDATES {
        if let Some(last) = results.last() {
            shown.push(last.clone());
        }
    }
    shown
}

/// Every party in `party_names` starts at zero; ties keep their input order.
pub fn party_totals(results: &[CandidateResult], party_names: Vec<String>) -> Vec<PartyTotal> {
    let mut parties: Vec<PartyTotal> = party_names
        .into_iter()
        .map(|name| PartyTotal { name, votes: 0 })
        .collect();

    for result in results {
        if let Some(party) = parties
            .iter_mut()
            .find(|p| p.name == result.political_party)
        {
            party.votes += result.count;
        }
    }

    parties.sort_by(|a, b| b.votes.cmp(&a.votes));
    parties
}

pub fn sex_ratio(results: &[CandidateResult]) -> SexRatio {
    results
        .iter()
        .fold(SexRatio::default(), |mut ratio, result| {
            match result.sex.as_str() {
                MALE => ratio.men += result.count,
                FEMALE => ratio.women += result.count,
                _ => {}
            }
            ratio
        })
}

/// Votes for one party, summed across its candidates.
pub fn party_votes(results: &[CandidateResult], party: &str) -> i64 {
    results
        .iter()
        .filter(|r| r.political_party == party)
        .map(|r| r.count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i32, party: &str, sex: &str, count: i64) -> CandidateResult {
        CandidateResult {
            id,
            name: format!("候補者{id}"),
            political_party: party.to_string(),
            sex: sex.to_string(),
            count,
        }
    }

    fn ranked(n: i32) -> Vec<CandidateResult> {
        (1..=n)
            .map(|id| result(id, "夢実現党", "男", i64::from(n - id)))
            .collect()
    }

    #[test]
    fn shows_top_ten_and_the_last_place() {
        let results = ranked(30);
        let shown = leaders_and_last(&results);

        assert_eq!(shown.len(), 11);
        let ids: Vec<i32> = shown.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 30]);
    }

    #[test]
    fn short_lists_do_not_repeat_the_last_place() {
        assert_eq!(leaders_and_last(&ranked(4)).len(), 4);
        assert_eq!(leaders_and_last(&ranked(10)).len(), 10);
        assert_eq!(leaders_and_last(&ranked(11)).len(), 11);
    }

    #[test]
    fn empty_results_show_nothing() {
        let view = IndexView::build(&[], vec!["夢実現党".to_string()]);
        assert!(view.candidates.is_empty());
        assert_eq!(view.parties, vec![PartyTotal { name: "夢実現党".to_string(), votes: 0 }]);
        assert_eq!(view.sex_ratio, SexRatio::default());
    }

    #[test]
    fn parties_are_ranked_by_total() {
        let results = vec![
            result(1, "国民10人大活躍党", "男", 5),
            result(2, "夢実現党", "女", 4),
            result(3, "夢実現党", "男", 3),
            result(4, "国民平和党", "女", 0),
        ];
        let parties = party_totals(
            &results,
            vec![
                "国民10人大活躍党".to_string(),
                "国民平和党".to_string(),
                "夢実現党".to_string(),
            ],
        );

        assert_eq!(
            parties,
            vec![
                PartyTotal { name: "夢実現党".to_string(), votes: 7 },
                PartyTotal { name: "国民10人大活躍党".to_string(), votes: 5 },
                PartyTotal { name: "国民平和党".to_string(), votes: 0 },
            ]
        );
    }

    #[test]
    fn sex_ratio_ignores_unknown_markers() {
        let results = vec![
            result(1, "a", "男", 5),
            result(2, "a", "女", 4),
            result(3, "a", "男", 3),
            result(4, "a", "その他", 9),
        ];
        assert_eq!(sex_ratio(&results), SexRatio { men: 8, women: 4 });
    }

    #[test]
    fn party_votes_match_exact_name() {
        let results = vec![
            result(1, "夢実現党", "男", 5),
            result(2, "夢実現党 ", "女", 4),
            result(3, "夢実現党", "男", 3),
        ];
        assert_eq!(party_votes(&results, "夢実現党"), 8);
        assert_eq!(party_votes(&results, "存在しない党"), 0);
    }

    mod rendering {
        use super::*;
        use rocket::local::blocking::Client;
        use rocket_dyn_templates::Template;

        fn client() -> Client {
            Client::tracked(rocket::build().attach(Template::fairing()))
                .expect("valid rocket instance")
        }

        #[test]
        fn index_renders_zero_counts_as_digits() {
            let client = client();
            let results: Vec<CandidateResult> =
                (1..=3).map(|id| result(id, "夢実現党", "男", 0)).collect();
            let view = IndexView::build(&results, vec!["夢実現党".to_string()]);

            let html = Template::show(client.rocket(), "index", view).expect("index renders");
            assert!(html.matches("<td>0</td>").count() >= results.len());
            assert!(!html.contains("<td></td>"));
        }

        #[test]
        fn last_place_label_only_for_long_lists() {
            let client = client();

            let long = IndexView::build(&ranked(11), Vec::new());
            let html = Template::show(client.rocket(), "index", long).expect("index renders");
            assert!(html.contains("最下位"));

            let short = IndexView::build(&ranked(10), Vec::new());
            let html = Template::show(client.rocket(), "index", short).expect("index renders");
            assert!(!html.contains("最下位"));
        }

        #[test]
        fn supporter_keywords_are_escaped() {
            let client = client();
            let view = CandidateView {
                candidate: Candidate {
                    id: 1,
                    name: "佐藤一郎".to_string(),
                    political_party: "夢実現党".to_string(),
                    sex: "男".to_string(),
                },
                votes: 1,
                keywords: vec!["<script>alert(1)</script>".to_string()],
            };

            let html =
                Template::show(client.rocket(), "candidate", view).expect("candidate renders");
            assert!(html.contains("&lt;script&gt;"));
            assert!(!html.contains("<script>alert(1)</script>"));
        }
    }
}
