
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::models::{CommonInterests, InterestCategory, InterestProfile};

use super::category::{CategoryMatch, CategoryMatcher};
use super::normalizer::TextNormalizer;


/// Raw additive point tally; larger means more similar.
pub type SimilarityScore = f64;


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub school_match_points: f64,
    pub near_match_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            school_match_points: crate::SCHOOL_MATCH_POINTS,
            near_match_threshold: crate::NEAR_MATCH_THRESHOLD,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub school: f64,
    pub categories: BTreeMap<InterestCategory, CategoryMatch>,
    pub total: SimilarityScore,
}


pub struct ProfileScorer {
    matcher: CategoryMatcher,
    config: ScoringConfig,
}

impl ProfileScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            matcher: CategoryMatcher::new(TextNormalizer::new(), config.near_match_threshold),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        self.matcher.normalizer()
    }

    pub fn score(&self, left: &InterestProfile, right: &InterestProfile) -> SimilarityScore {
        self.breakdown(left, right).total
    }

    pub fn breakdown(&self, left: &InterestProfile, right: &InterestProfile) -> ScoreBreakdown {
        let school = if schools_match(left, right) {
            self.config.school_match_points
        } else {
            0.0
        };

        let categories: BTreeMap<InterestCategory, CategoryMatch> = InterestCategory::all()
            .map(|category| {
                let result = self
                    .matcher
                    .compare(left.items(category), right.items(category));
                (category, result)
            })
            .collect();

        let category_points: usize = categories.values().map(CategoryMatch::points).sum();

        ScoreBreakdown {
            school,
            total: school + category_points as f64,
            categories,
        }
    }

    /// Exact raw-string overlap per category, plus the school when equal.
    ///
    /// No normalization is applied: "Soccer" and "soccer" are not common here
    /// even though they count as an exact match in [`ProfileScorer::score`].
    pub fn common_interests(&self, left: &InterestProfile, right: &InterestProfile) -> CommonInterests {
        let categories = InterestCategory::all()
            .filter_map(|category| {
                let right_items = right.item_set(category);
                let shared: Vec<String> = left
                    .item_set(category)
                    .intersection(&right_items)
                    .map(|s| s.to_string())
                    .collect();
                (!shared.is_empty()).then_some((category, shared))
            })
            .collect();

        CommonInterests {
            school: schools_match(left, right)
                .then(|| left.school().map(str::to_string))
                .flatten(),
            categories,
        }
    }
}

impl Default for ProfileScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}


fn schools_match(left: &InterestProfile, right: &InterestProfile) -> bool {
    matches!((left.school(), right.school()), (Some(a), Some(b)) if a == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(school: Option<&str>, sports: &[&str]) -> InterestProfile {
        let mut builder = InterestProfile::builder().category(InterestCategory::Sports, sports.iter().copied());
        if let Some(school) = school {
            builder = builder.school(school);
        }
        builder.build()
    }

    #[test]
    fn test_reference_example_scores_six() {
        let scorer = ProfileScorer::default();
        let a = profile(Some("Lincoln High"), &["soccer", "chess"]);
        let b = profile(Some("Lincoln High"), &["soccer", "tennis"]);

        let breakdown = scorer.breakdown(&a, &b);
        assert_eq!(breakdown.school, 5.0);
        assert_eq!(
            breakdown.categories[&InterestCategory::Sports],
            CategoryMatch { exact: 1, near: 0 }
        );
        assert_eq!(breakdown.total, 6.0);
        assert_eq!(scorer.score(&a, &b), 6.0);
    }

    #[test]
    fn test_school_is_case_sensitive() {
        let scorer = ProfileScorer::default();
        let a = profile(Some("Lincoln High"), &[]);
        let b = profile(Some("lincoln high"), &[]);
        assert_eq!(scorer.score(&a, &b), 0.0);
    }

    #[test]
    fn test_missing_school_never_matches() {
        let scorer = ProfileScorer::default();
        let a = profile(None, &[]);
        let b = profile(Some(""), &[]);
        assert_eq!(scorer.score(&a, &b), 0.0);
        assert_eq!(scorer.score(&a, &a), 0.0);
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let scorer = ProfileScorer::default();
        let empty = InterestProfile::default();
        let full = InterestProfile::builder()
            .school("Lincoln High")
            .category(InterestCategory::Pets, ["dog"])
            .category(InterestCategory::Hobbies, ["painting"])
            .build();
        assert_eq!(scorer.score(&empty, &empty), 0.0);
        assert_eq!(scorer.score(&empty, &full), 0.0);
        assert_eq!(scorer.score(&full, &empty), 0.0);
    }

    #[test]
    fn test_categories_sum() {
        let scorer = ProfileScorer::default();
        let a = InterestProfile::builder()
            .category(InterestCategory::Pets, ["Dogs", "cat"])
            .category(InterestCategory::VideoGames, ["Minecraft", "Playing Guitar Hero"])
            .category(InterestCategory::Clubs, ["robotics"])
            .build();
        let b = InterestProfile::builder()
            .category(InterestCategory::Pets, ["dog"])
            .category(InterestCategory::VideoGames, ["minecraft", "Guitar Hero Playing"])
            .category(InterestCategory::Classes, ["robotics"])
            .build();

        let breakdown = scorer.breakdown(&a, &b);
        assert_eq!(breakdown.categories[&InterestCategory::Pets].exact, 1);
        assert_eq!(
            breakdown.categories[&InterestCategory::VideoGames],
            CategoryMatch { exact: 1, near: 1 }
        );
        assert_eq!(breakdown.categories[&InterestCategory::Clubs].points(), 0);
        assert_eq!(breakdown.total, 3.0);
    }

    #[test]
    fn test_custom_school_points() {
        let scorer = ProfileScorer::new(ScoringConfig {
            school_match_points: 2.5,
            ..ScoringConfig::default()
        });
        let a = profile(Some("Lincoln High"), &[]);
        assert_eq!(scorer.score(&a, &a), 2.5);
    }

    #[test]
    fn test_common_interests_use_raw_strings() {
        let scorer = ProfileScorer::default();
        let a = InterestProfile::builder()
            .school("Lincoln High")
            .category(InterestCategory::Sports, ["Soccer", "tennis"])
            .category(InterestCategory::Pets, ["dog"])
            .build();
        let b = InterestProfile::builder()
            .school("Lincoln High")
            .category(InterestCategory::Sports, ["soccer", "tennis"])
            .category(InterestCategory::Hobbies, ["dog"])
            .build();

        let common = scorer.common_interests(&a, &b);
        assert_eq!(common.school.as_deref(), Some("Lincoln High"));
        assert_eq!(common.get(InterestCategory::Sports), Some(&["tennis".to_string()][..]));
        assert_eq!(common.get(InterestCategory::Pets), None);
        assert_eq!(common.categories.len(), 1);

        // Case variants still count toward the score.
        assert_eq!(scorer.breakdown(&a, &b).categories[&InterestCategory::Sports].exact, 2);
    }

    #[test]
    fn test_common_interests_without_school() {
        let scorer = ProfileScorer::default();
        let a = profile(Some("Lincoln High"), &["soccer"]);
        let b = profile(Some("Roosevelt"), &["chess"]);
        assert!(scorer.common_interests(&a, &b).is_empty());
    }

    fn arb_items() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop::sample::select(vec![
                "soccer", "Soccer", "chess", "tennis", "board games", "Board Game",
                "playing guitar", "guitar playing", "dogs", "dog", "cats", "video game design",
                "game design", "robotics club", "club robotics", "AP Biology", "biology",
            ])
            .prop_map(str::to_string),
            0..5,
        )
    }

    fn arb_profile() -> impl Strategy<Value = InterestProfile> {
        (
            prop::option::of(prop::sample::select(vec!["Lincoln High", "Roosevelt", ""])),
            prop::collection::vec(arb_items(), 7),
        )
            .prop_map(|(school, mut lists)| {
                let mut builder = InterestProfile::builder();
                if let Some(school) = school {
                    builder = builder.school(school);
                }
                for category in InterestCategory::all() {
                    builder = builder.category(category, lists.remove(0));
                }
                builder.build()
            })
    }

    proptest! {
        #[test]
        fn prop_score_is_symmetric(a in arb_profile(), b in arb_profile()) {
            let scorer = ProfileScorer::default();
            prop_assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
        }

        #[test]
        fn prop_self_score_counts_every_item(a in arb_profile()) {
            let scorer = ProfileScorer::default();
            let normalizer = scorer.normalizer();
            let school = if a.school().is_some() { 5.0 } else { 0.0 };
            let distinct_items: usize = InterestCategory::all()
                .map(|c| {
                    a.items(c)
                        .iter()
                        .map(|item| normalizer.normalize(item))
                        .collect::<std::collections::BTreeSet<_>>()
                        .len()
                })
                .sum();
            prop_assert!(scorer.score(&a, &a) >= school + distinct_items as f64);
        }
    }
}
