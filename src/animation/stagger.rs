use crate::foundation::core::Millis;
use crate::foundation::math::Rng64;

/// Order in which a stagger distributes start offsets across sibling elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StaggerFrom {
    /// Index order: first element starts first.
    #[default]
    Start,
    /// Reverse index order.
    End,
    /// Distance from the middle outward; ties go to the lower index.
    Center,
    /// Seeded shuffle.
    Random {
        /// Shuffle seed.
        #[serde(default)]
        seed: u64,
    },
}

/// Per-element start offset distribution for one animation spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Delay added per rank.
    pub each: Millis,
    /// Rank assignment order.
    #[serde(default)]
    pub from: StaggerFrom,
}

impl Stagger {
    /// Index-ordered stagger.
    pub fn each(each: Millis) -> Self {
        Self {
            each,
            from: StaggerFrom::Start,
        }
    }

    /// Set the rank order.
    pub fn from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    /// Start offset for every element, indexed by element position.
    pub fn offsets(&self, count: usize) -> Vec<Millis> {
        let mut out = vec![Millis::ZERO; count];
        for (rank, idx) in stagger_order(count, self.from).into_iter().enumerate() {
            out[idx] = Millis(self.each.0.saturating_mul(rank as u64));
        }
        out
    }

    /// Extra time the last element starts after the first.
    pub fn spread(&self, count: usize) -> Millis {
        Millis(self.each.0.saturating_mul(count.saturating_sub(1) as u64))
    }
}

/// Element indices in the order they start animating.
pub fn stagger_order(count: usize, from: StaggerFrom) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    match from {
        StaggerFrom::Start => {}
        StaggerFrom::End => order.reverse(),
        StaggerFrom::Center => {
            // Doubled distance keeps even counts (center between two items) in integers.
            let mid2 = count.saturating_sub(1);
            order.sort_by_key(|&i| ((2 * i).abs_diff(mid2), i));
        }
        StaggerFrom::Random { seed } => {
            let mut rng = Rng64::new(seed);
            for i in (1..count).rev() {
                let j = rng.next_below(i as u64 + 1) as usize;
                order.swap(i, j);
            }
        }
    }
    order
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
