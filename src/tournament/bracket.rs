//! Knockout bracket construction.
//!
//! Seeding follows the classic tennis layout: the top seed and second seed land
//! in opposite halves so they can only meet in the final. Pairings are either
//! winner-vs-runner-up across adjacent groups (FIFA style) or rank-based across
//! the whole field (cannon style).

/// Seed positions for a bracket of `size` slots (power of two). Slot `i` of the
/// result holds the seed that plays there, so seeds 0 and 1 end up in opposite
/// halves.
pub fn bracket_order(size: usize) -> Vec<usize> {
    debug_assert!(size.is_power_of_two());
    let mut order = vec![0];
    while order.len() < size {
        let doubled = order.len() * 2;
        let mut next = Vec::with_capacity(doubled);
        for &seed in &order {
            next.push(seed);
            next.push(doubled - 1 - seed);
        }
        order = next;
    }
    order
}

/// First-round pairs for group play: each group winner meets the runner-up of
/// its neighbour group, alternating direction so two teams from the same group
/// cannot meet before the final rounds.
pub fn split_bracket_pairs(winners: &[String], runners_up: &[String]) -> Vec<(String, String)> {
    debug_assert_eq!(winners.len(), runners_up.len());
    let count = winners.len();
    let mut pairs = Vec::with_capacity(count);
    // Even-indexed winners fill the top half, odd-indexed the bottom, so a
    // winner and its own runner-up stay in opposite halves.
    for i in (0..count).step_by(2) {
        pairs.push((winners[i].clone(), runners_up[i + 1].clone()));
    }
    for i in (1..count).step_by(2) {
        pairs.push((winners[i].clone(), runners_up[i - 1].clone()));
    }
    pairs
}

/// First-round pairs for a ranked field (best first): seed `i` meets seed
/// `n - 1 - i`, placed into the bracket so top seeds are kept apart.
pub fn ranked_pairs(ranked: &[String]) -> Vec<(String, String)> {
    let count = ranked.len();
    let half = count / 2;
    let seeded: Vec<(String, String)> = (0..half)
        .map(|i| (ranked[i].clone(), ranked[count - 1 - i].clone()))
        .collect();
    bracket_order(half)
        .into_iter()
        .map(|slot| seeded[slot].clone())
        .collect()
}

/// Stage titles for a knockout starting with `pair_count` first-round matches.
pub fn round_names(pair_count: usize) -> Option<&'static [&'static str]> {
    match pair_count {
        16 => Some(&[
            "Round of 32",
            "Round of 16",
            "Quarterfinals",
            "Semifinals",
            "Finals",
        ]),
        8 => Some(&["Round of 16", "Quarterfinals", "Semifinals", "Finals"]),
        4 => Some(&["Quarterfinals", "Semifinals", "Finals"]),
        2 => Some(&["Semifinals", "Finals"]),
        _ => None,
    }
}
