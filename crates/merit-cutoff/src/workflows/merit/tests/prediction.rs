use super::common::*;
use crate::workflows::merit::allocation::{allocate, CutoffTable};
use crate::workflows::merit::domain::{Category, Cutoff, Post, ScoreBasis, Seat, Vacancies};
use crate::workflows::merit::prediction::{
    PredictionConfig, PredictionPolicy, Predictor, Verdict,
};
use crate::workflows::merit::profile::{BonusMarks, UserProfile};
use crate::workflows::merit::ranking::rank;

fn table() -> CutoffTable {
    allocate(&ledger_candidates(), &catalog_posts()).table
}

fn verdict_for(predictor: &Predictor, profile: &UserProfile, post: &str) -> Verdict {
    verdict_in(predictor, profile, &table(), post)
}

fn verdict_in(
    predictor: &Predictor,
    profile: &UserProfile,
    table: &CutoffTable,
    post: &str,
) -> Verdict {
    predictor
        .assess(profile, table)
        .into_iter()
        .find(|assessment| assessment.post == post)
        .map(|assessment| assessment.verdict)
        .expect("post assessed")
}

#[test]
fn missing_statistics_paper_is_flagged_not_low_chance() {
    let predictor = Predictor::default();
    let profile = UserProfile::new(310.0, 25.0, Category::Obc).with_statistics(0.0);

    let assessments = predictor.assess(&profile, &table());
    let verdicts: Vec<_> = assessments
        .iter()
        .map(|assessment| (assessment.post.as_str(), assessment.verdict.clone()))
        .collect();

    assert_eq!(
        verdicts,
        [
            ("Inspector", Verdict::LowChance),
            ("Statistical Officer", Verdict::StatisticsPaperAbsent),
            ("Tax Assistant", Verdict::ClearsGeneralMerit),
        ]
    );

    let predictions = predictor.predict(&profile, &table());
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].post, "Tax Assistant");
    assert_eq!(predictions[0].matched_cutoff, Cutoff::Score(290.0));
    assert_eq!(predictions[0].category_used, Seat::General);
}

#[test]
fn elevated_computer_requirement_uses_category_threshold() {
    let predictor = Predictor::default();
    let profile = UserProfile::new(355.0, 20.0, Category::Ur);

    assert_eq!(
        verdict_for(&predictor, &profile, "Inspector"),
        Verdict::ComputerRequirementNotMet {
            required: 27.0,
            actual: 20.0
        }
    );
    assert_eq!(
        verdict_for(&predictor, &profile, "Tax Assistant"),
        Verdict::ClearsGeneralMerit
    );

    let boosted = profile.with_bonus(BonusMarks {
        computer: 7.0,
        ..BonusMarks::default()
    });
    assert_eq!(
        verdict_for(&predictor, &boosted, "Inspector"),
        Verdict::ClearsGeneralMerit
    );
}

#[test]
fn own_category_cutoff_is_checked_after_general_merit() {
    let predictor = Predictor::default();
    let profile = UserProfile::new(325.0, 30.0, Category::Obc);

    let predictions = predictor.predict(&profile, &table());
    let posts: Vec<_> = predictions
        .iter()
        .map(|prediction| (prediction.post.as_str(), prediction.category_used))
        .collect();
    assert_eq!(
        posts,
        [
            ("Inspector", Seat::Reserved(Category::Obc)),
            ("Tax Assistant", Seat::General),
        ]
    );
    assert_eq!(predictions[0].verdict, Verdict::ClearsCategoryCutoff);
    assert_eq!(predictions[0].matched_cutoff, Cutoff::Score(320.0));
}

#[test]
fn first_match_policy_stops_at_highest_priority_post() {
    let predictor = Predictor::new(PredictionConfig {
        policy: PredictionPolicy::FirstMatch,
        ..PredictionConfig::default()
    });
    let profile = UserProfile::new(325.0, 30.0, Category::Obc);

    let predictions = predictor.predict(&profile, &table());
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].post, "Inspector");
}

#[test]
fn category_without_seats_is_skipped() {
    let posts = vec![Post::new(
        6,
        "Reserved Only",
        Vacancies::new(0).with_reserved(Category::Obc, 1),
    )];
    let table = allocate(&ledger_candidates(), &posts).table;
    let profile = UserProfile::new(390.0, 60.0, Category::St);

    let assessments = Predictor::default().assess(&profile, &table);
    assert_eq!(assessments[0].verdict, Verdict::NoVacancyForCategory);
    assert!(assessments[0].seat.is_none());
}

#[test]
fn post_opens_through_general_or_own_reserved_seats() {
    let posts = vec![
        Post::new(7, "Reserved Only", Vacancies::new(0).with_reserved(Category::Obc, 1)),
        Post::new(6, "General Only", Vacancies::new(1)),
        Post::new(5, "Others Only", Vacancies::new(0).with_reserved(Category::Sc, 2)),
    ];
    let table = allocate(&ledger_candidates(), &posts).table;
    let obc = UserProfile::new(390.0, 60.0, Category::Obc);

    assert_ne!(
        verdict_in(&Predictor::default(), &obc, &table, "Reserved Only"),
        Verdict::NoVacancyForCategory
    );
    assert_ne!(
        verdict_in(&Predictor::default(), &obc, &table, "General Only"),
        Verdict::NoVacancyForCategory
    );
    assert_eq!(
        verdict_in(&Predictor::default(), &obc, &table, "Others Only"),
        Verdict::NoVacancyForCategory
    );
}

#[test]
fn empty_cell_has_no_merit_line_to_clear() {
    let candidates = vec![candidate("only", Category::Ur, 300.0)];
    let posts = vec![
        Post::new(7, "Upper", Vacancies::new(1)),
        Post::new(5, "Lower", Vacancies::new(3).with_reserved(Category::Obc, 1)),
    ];
    let table = allocate(&candidates, &posts).table;
    let profile = UserProfile::new(0.0, 30.0, Category::Obc);

    let assessments = Predictor::default().assess(&profile, &table);
    let lower = &assessments[1];
    assert_eq!(lower.post, "Lower");
    assert_eq!(lower.verdict, Verdict::UnfilledSeats);
    assert!(!lower.verdict.is_match());
    assert!(lower.matched_cutoff.is_none());
    assert!(lower.seat.is_none());

    assert!(Predictor::default().predict(&profile, &table).is_empty());
}

#[test]
fn partially_filled_cell_is_cleared_only_at_its_lowest_admitted_score() {
    let candidates = vec![
        candidate("top", Category::Ur, 300.0),
        candidate("second", Category::Ur, 250.0),
    ];
    let posts = vec![
        Post::new(7, "Upper", Vacancies::new(1)),
        Post::new(5, "Lower", Vacancies::new(3)),
    ];
    let table = allocate(&candidates, &posts).table;
    let predictor = Predictor::default();

    let above = UserProfile::new(260.0, 30.0, Category::Sc);
    let predictions = predictor.predict(&above, &table);
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].post, "Lower");
    assert_eq!(predictions[0].matched_cutoff, Cutoff::Score(250.0));
    assert_eq!(predictions[0].verdict, Verdict::ClearsGeneralMerit);

    let below = UserProfile::new(100.0, 30.0, Category::Sc);
    assert_eq!(
        verdict_in(&predictor, &below, &table, "Lower"),
        Verdict::UnfilledSeats
    );
    assert_eq!(
        verdict_in(&predictor, &below, &table, "Upper"),
        Verdict::LowChance
    );
}

#[test]
fn low_score_gets_low_chance_everywhere() {
    let profile = UserProfile::new(100.0, 60.0, Category::Sc);
    let assessments = Predictor::default().assess(&profile, &table());
    assert!(assessments
        .iter()
        .filter(|assessment| assessment.post != "Statistical Officer")
        .all(|assessment| assessment.verdict == Verdict::LowChance));
}

#[test]
fn raising_score_never_loses_a_post_or_rank() {
    let predictor = Predictor::default();
    let table = table();
    let pool = ledger_candidates();

    let mut previous_posts: Vec<String> = Vec::new();
    let mut previous_rank = usize::MAX;
    let mut main = 200.0;
    while main <= 390.0 {
        let profile = UserProfile::new(main, 30.0, Category::Obc).with_statistics(60.0);

        let posts: Vec<String> = predictor
            .predict(&profile, &table)
            .into_iter()
            .map(|prediction| prediction.post)
            .collect();
        assert!(
            previous_posts.iter().all(|post| posts.contains(post)),
            "lost a post when main rose to {main}"
        );

        let position = rank(
            profile.score(ScoreBasis::WithStatistics),
            &pool,
            ScoreBasis::WithStatistics,
            Category::Obc,
        );
        assert!(position.overall <= previous_rank);

        previous_posts = posts;
        previous_rank = position.overall;
        main += 5.0;
    }
}
