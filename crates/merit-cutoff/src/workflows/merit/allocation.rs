//! Sequential merit allocation.
//!
//! Posts are filled one at a time in priority order (pay level descending, then name).
//! Within a post the general quota is taken first from the whole available pool, then each
//! reserved category is filled from what remains, restricted to that category. A candidate
//! who wins a seat leaves the pool for every lower-priority post. Ties on score keep ledger
//! order, so identical inputs always yield identical cutoffs.

use super::domain::{Candidate, Category, Cutoff, CutoffCell, Post, ScoreBasis, Seat};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Cutoffs derived for one post during an allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCutoffs {
    pub post: Post,
    pub pool_size: usize,
    pub general: CutoffCell,
    pub reserved: BTreeMap<Category, CutoffCell>,
}

impl PostCutoffs {
    pub fn cell(&self, seat: Seat) -> CutoffCell {
        match seat {
            Seat::General => self.general,
            Seat::Reserved(category) => self
                .reserved
                .get(&category)
                .copied()
                .unwrap_or_else(|| CutoffCell::empty(0)),
        }
    }
}

/// Post x category cutoff matrix, rows in priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CutoffTable {
    rows: Vec<PostCutoffs>,
}

impl CutoffTable {
    pub fn rows(&self) -> &[PostCutoffs] {
        &self.rows
    }

    pub fn row(&self, post_name: &str) -> Option<&PostCutoffs> {
        self.rows.iter().find(|row| row.post.name == post_name)
    }

    pub fn cell(&self, post_name: &str, seat: Seat) -> Option<CutoffCell> {
        self.row(post_name).map(|row| row.cell(seat))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub roll_number: String,
    pub post: String,
    pub pay_level: u8,
    pub seat: Seat,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationOutcome {
    pub table: CutoffTable,
    pub assignments: Vec<Assignment>,
}

impl AllocationOutcome {
    pub fn assignment_for(&self, roll_number: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.roll_number == roll_number)
    }

    pub fn assignments_for_post<'a>(
        &'a self,
        post_name: &'a str,
    ) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.post == post_name)
    }
}

/// Run one full allocation pass over `candidates` (ledger order) and `posts` (any order).
pub fn allocate(candidates: &[Candidate], posts: &[Post]) -> AllocationOutcome {
    let mut ordered: Vec<&Post> = posts.iter().collect();
    ordered.sort_by(|a, b| a.priority_cmp(b));

    let mut allocated = vec![false; candidates.len()];
    let mut rows = Vec::with_capacity(ordered.len());
    let mut assignments = Vec::new();

    for post in ordered {
        let basis = post.score_basis();
        let mut pool: Vec<usize> = (0..candidates.len())
            .filter(|&index| !allocated[index])
            .collect();
        let pool_size = pool.len();

        // `sort_by` is stable and the pool is built in ledger order: first seen wins ties.
        pool.sort_by(|&a, &b| {
            candidates[b]
                .score(basis)
                .total_cmp(&candidates[a].score(basis))
        });

        debug!(post = %post.name, pay_level = post.pay_level, pool_size, "allocating post");

        let general_take = (post.vacancies.general as usize).min(pool.len());
        let general_taken: Vec<usize> = pool.drain(..general_take).collect();
        let general = settle_cell(
            post,
            Seat::General,
            post.vacancies.general,
            &general_taken,
            candidates,
            basis,
            &mut allocated,
            &mut assignments,
        );

        let mut reserved = BTreeMap::new();
        for category in Category::ordered() {
            let seats = post.vacancies.reserved_for(category);
            let taken: Vec<usize> = pool
                .iter()
                .copied()
                .filter(|&index| candidates[index].category == Some(category))
                .take(seats as usize)
                .collect();
            let cell = settle_cell(
                post,
                Seat::Reserved(category),
                seats,
                &taken,
                candidates,
                basis,
                &mut allocated,
                &mut assignments,
            );
            reserved.insert(category, cell);
        }

        rows.push(PostCutoffs {
            post: post.clone(),
            pool_size,
            general,
            reserved,
        });
    }

    info!(
        posts = rows.len(),
        candidates = candidates.len(),
        allocated = assignments.len(),
        "allocation pass complete"
    );

    AllocationOutcome {
        table: CutoffTable { rows },
        assignments,
    }
}

#[allow(clippy::too_many_arguments)]
fn settle_cell(
    post: &Post,
    seat: Seat,
    vacancies: u32,
    taken: &[usize],
    candidates: &[Candidate],
    basis: ScoreBasis,
    allocated: &mut [bool],
    assignments: &mut Vec<Assignment>,
) -> CutoffCell {
    if taken.is_empty() {
        return CutoffCell::empty(vacancies);
    }

    let mut minimum = f64::INFINITY;
    for &index in taken {
        let candidate = &candidates[index];
        let score = candidate.score(basis);
        minimum = minimum.min(score);
        allocated[index] = true;
        assignments.push(Assignment {
            roll_number: candidate.roll_number.clone(),
            post: post.name.clone(),
            pay_level: post.pay_level,
            seat,
            score,
        });
    }

    CutoffCell {
        vacancies,
        filled: taken.len() as u32,
        cutoff: Cutoff::Score(minimum),
    }
}
