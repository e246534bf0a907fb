use serde::{Deserialize, Serialize};

pub const MAX_TOTAL_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingInfo {
    pub overall_rank: String,
    pub badge: String,
    pub total_score: f64,
    pub percentile: f64,
    pub social_score: f64,
    pub code_score: f64,
    pub activity_score: f64,
    pub innovation_score: f64,
}

/// A named band of the total score range.
///
/// The band covers `[min_score, max_score)`; the band ending at
/// `MAX_TOTAL_SCORE` also includes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankTier {
    pub name: &'static str,
    pub badge: &'static str,
    pub min_score: f64,
    pub max_score: f64,
}

impl RankTier {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_score
            && (score < self.max_score
                || (self.max_score >= MAX_TOTAL_SCORE && score <= self.max_score))
    }
}

/// Ordered tier table, highest band first.
#[derive(Debug, Clone, Copy)]
pub struct RankTable {
    tiers: &'static [RankTier],
}

impl RankTable {
    pub const fn new(tiers: &'static [RankTier]) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &'static [RankTier] {
        self.tiers
    }

    pub fn lowest(&self) -> &'static RankTier {
        &self.tiers[self.tiers.len() - 1]
    }

    /// First tier containing `score`, falling back to the lowest tier for
    /// scores outside `[0, 100]`.
    pub fn lookup(&self, score: f64) -> &'static RankTier {
        self.tiers
            .iter()
            .find(|tier| tier.contains(score))
            .unwrap_or_else(|| self.lowest())
    }
}

pub static DEVELOPER_TIERS: RankTable = RankTable::new(&[
    RankTier {
        name: "Elite Developer",
        badge: "ELITE",
        min_score: 90.0,
        max_score: 100.0,
    },
    RankTier {
        name: "Senior Developer",
        badge: "SENIOR",
        min_score: 80.0,
        max_score: 90.0,
    },
    RankTier {
        name: "Experienced Developer",
        badge: "EXPERIENCED",
        min_score: 70.0,
        max_score: 80.0,
    },
    RankTier {
        name: "Active Developer",
        badge: "ACTIVE",
        min_score: 60.0,
        max_score: 70.0,
    },
    RankTier {
        name: "Growing Developer",
        badge: "GROWING",
        min_score: 50.0,
        max_score: 60.0,
    },
    RankTier {
        name: "Junior Developer",
        badge: "JUNIOR",
        min_score: 30.0,
        max_score: 50.0,
    },
    RankTier {
        name: "Beginner",
        badge: "BEGINNER",
        min_score: 0.0,
        max_score: 30.0,
    },
]);

pub static LEGACY_TIERS: RankTable = RankTable::new(&[
    RankTier {
        name: "Legendary Developer",
        badge: "LEGENDARY",
        min_score: 95.0,
        max_score: 100.0,
    },
    RankTier {
        name: "Elite Developer",
        badge: "ELITE",
        min_score: 90.0,
        max_score: 95.0,
    },
    RankTier {
        name: "Senior Developer",
        badge: "SENIOR",
        min_score: 80.0,
        max_score: 90.0,
    },
    RankTier {
        name: "Experienced Developer",
        badge: "EXPERIENCED",
        min_score: 70.0,
        max_score: 80.0,
    },
    RankTier {
        name: "Active Developer",
        badge: "ACTIVE",
        min_score: 60.0,
        max_score: 70.0,
    },
    RankTier {
        name: "Growing Developer",
        badge: "GROWING",
        min_score: 50.0,
        max_score: 60.0,
    },
    RankTier {
        name: "Learning Developer",
        badge: "LEARNING",
        min_score: 40.0,
        max_score: 50.0,
    },
    RankTier {
        name: "Junior Developer",
        badge: "JUNIOR",
        min_score: 30.0,
        max_score: 40.0,
    },
    RankTier {
        name: "Aspiring Developer",
        badge: "ASPIRING",
        min_score: 20.0,
        max_score: 30.0,
    },
    RankTier {
        name: "Beginner",
        badge: "BEGINNER",
        min_score: 0.0,
        max_score: 20.0,
    },
]);
