use super::super::domain::{ComputerRules, Post};
use super::super::profile::UserProfile;

/// Facts about one post gathered before a verdict is reached.
pub(crate) struct PostSignals {
    pub seats_open: u32,
    pub computer_required: f64,
    pub computer_actual: f64,
    pub statistics_missing: bool,
    pub score: f64,
}

/// `seats_open` counts general plus the user's own reserved seats, so a post is skipped only
/// when both are zero; other categories' seats never open a post to this user.
pub(crate) fn post_signals(profile: &UserProfile, post: &Post, rules: &ComputerRules) -> PostSignals {
    PostSignals {
        seats_open: post.vacancies.open_to(profile.category),
        computer_required: rules.required(Some(profile.category), post.elevated_computer),
        computer_actual: profile.computer_with_bonus(),
        statistics_missing: post.requires_statistics && !profile.attempted_statistics(),
        score: profile.score_with_bonus(post.score_basis()),
    }
}
