use crate::workflows::merit::domain::{Candidate, Category, Post, Vacancies};

pub(super) fn candidate(roll: &str, category: Category, main: f64) -> Candidate {
    Candidate::new(roll, category, main, 40.0)
}

/// The five-candidate pool used across allocation scenarios.
pub(super) fn scenario_pool() -> Vec<Candidate> {
    vec![
        candidate("ur-95", Category::Ur, 95.0),
        candidate("ur-90", Category::Ur, 90.0),
        candidate("ur-85", Category::Ur, 85.0),
        candidate("obc-80", Category::Obc, 80.0),
        candidate("ur-70", Category::Ur, 70.0),
    ]
}

pub(super) fn scenario_post() -> Post {
    Post::new(7, "X", Vacancies::new(2).with_reserved(Category::Ur, 1))
}

/// A small three-level catalog with one statistics post.
pub(super) fn catalog_posts() -> Vec<Post> {
    vec![
        Post::new(
            4,
            "Tax Assistant",
            Vacancies::new(2)
                .with_reserved(Category::Obc, 1)
                .with_reserved(Category::Sc, 1),
        ),
        Post::new(
            7,
            "Inspector",
            Vacancies::new(2)
                .with_reserved(Category::Obc, 1)
                .with_reserved(Category::Sc, 1),
        )
        .with_elevated_computer(),
        Post::new(
            6,
            "Statistical Officer",
            Vacancies::new(1).with_reserved(Category::Obc, 1),
        )
        .requiring_statistics(),
    ]
}

pub(super) fn ledger_candidates() -> Vec<Candidate> {
    vec![
        candidate("c01", Category::Ur, 360.0),
        candidate("c02", Category::Obc, 350.0),
        candidate("c03", Category::Ur, 340.0).with_statistics(150.0),
        candidate("c04", Category::Sc, 330.0),
        candidate("c05", Category::Obc, 320.0),
        candidate("c06", Category::Ur, 310.0),
        candidate("c07", Category::Obc, 300.0).with_statistics(40.0),
        candidate("c08", Category::Sc, 290.0),
        candidate("c09", Category::Ews, 280.0),
        candidate("c10", Category::Obc, 270.0),
        candidate("c11", Category::Sc, 260.0),
        candidate("c12", Category::Ur, 250.0),
        candidate("c13", Category::Obc, 240.0),
        candidate("c14", Category::St, 230.0),
    ]
}
