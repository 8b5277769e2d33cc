use serde::{Deserialize, Serialize};

/// One layer of the pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Non-folded seats that contributed up to this layer's cap, ascending
    pub eligible: Vec<usize>,
}

/// Splits a hand's contributions into a main pot and side pots.
///
/// Layers are capped at each distinct contribution level of a non-folded
/// player, smallest first. Every player, folded or not, pays into each layer
/// up to its cap; only non-folded players who reached the cap are eligible.
/// Chips above every other player's contribution are uncalled and go back to
/// their owner instead of forming a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
    uncalled: Option<(usize, u32)>,
}

impl PotManager {
    pub fn new(contributions: &[u32], folded: &[bool]) -> Self {
        debug_assert_eq!(contributions.len(), folded.len());
        let n = contributions.len();
        let live = |p: usize| !folded.get(p).copied().unwrap_or(false);

        // Uncalled excess: the top contributor beyond everyone else.
        let mut paid: Vec<u32> = contributions.to_vec();
        let mut uncalled = None;
        if let Some(top) = (0..n).max_by_key(|&p| (paid[p], std::cmp::Reverse(p))) {
            let second = (0..n)
                .filter(|&p| p != top)
                .map(|p| paid[p])
                .max()
                .unwrap_or(0);
            if paid[top] > second {
                uncalled = Some((top, paid[top] - second));
                paid[top] = second;
            }
        }

        let mut levels: Vec<u32> = (0..n)
            .filter(|&p| live(p) && paid[p] > 0)
            .map(|p| paid[p])
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
        let mut floor = 0u32;
        for &cap in &levels {
            let amount: u32 = paid
                .iter()
                .map(|&c| c.clamp(floor, cap) - floor)
                .sum();
            let eligible: Vec<usize> = (0..n).filter(|&p| live(p) && paid[p] >= cap).collect();
            pots.push(Pot { amount, eligible });
            floor = cap;
        }
        // Folded chips above the highest live level join the top layer.
        let excess: u32 = paid.iter().map(|&c| c.saturating_sub(floor)).sum();
        if excess > 0 {
            match pots.last_mut() {
                Some(top) => top.amount += excess,
                None => {
                    let eligible = (0..n).filter(|&p| live(p)).collect();
                    pots.push(Pot {
                        amount: excess,
                        eligible,
                    })
                }
            }
        }

        Self { pots, uncalled }
    }

    /// Layers for contributions where nobody folded.
    pub fn from_contributions<const N: usize>(contributions: [u32; N]) -> Self {
        Self::new(&contributions, &[false; N])
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn main_pot(&self) -> u32 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.pots.iter().skip(1).map(|p| p.amount).collect()
    }

    /// `(seat, chips)` returned because no one could match them.
    pub fn uncalled(&self) -> Option<(usize, u32)> {
        self.uncalled
    }

    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum::<u32>() + self.uncalled.map_or(0, |(_, c)| c)
    }
}
