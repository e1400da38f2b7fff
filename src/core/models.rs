
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, EnumString, IntoStaticStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterestCategory {
    Clubs,
    #[strum(to_string = "video_games", serialize = "videoGames")]
    #[serde(alias = "videoGames")]
    VideoGames,
    Hobbies,
    #[strum(to_string = "career_aspirations", serialize = "careerAspirations")]
    #[serde(alias = "careerAspirations")]
    CareerAspirations,
    Classes,
    Pets,
    Sports,
}

impl InterestCategory {
    pub fn all() -> impl Iterator<Item = InterestCategory> {
        Self::iter()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}


/// Nullable database columns read as empty lists.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}


/// A user's interests. Absent or null categories deserialize to empty lists, so every
/// category is always readable without a missing-key check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub clubs: Vec<String>,
    #[serde(default, alias = "videoGames", deserialize_with = "null_as_empty")]
    pub video_games: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hobbies: Vec<String>,
    #[serde(default, alias = "careerAspirations", deserialize_with = "null_as_empty")]
    pub career_aspirations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub classes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sports: Vec<String>,
}

impl InterestProfile {
    pub fn builder() -> InterestProfileBuilder {
        InterestProfileBuilder::default()
    }

    pub fn items(&self, category: InterestCategory) -> &[String] {
        match category {
            InterestCategory::Clubs => &self.clubs,
            InterestCategory::VideoGames => &self.video_games,
            InterestCategory::Hobbies => &self.hobbies,
            InterestCategory::CareerAspirations => &self.career_aspirations,
            InterestCategory::Classes => &self.classes,
            InterestCategory::Pets => &self.pets,
            InterestCategory::Sports => &self.sports,
        }
    }

    fn items_mut(&mut self, category: InterestCategory) -> &mut Vec<String> {
        match category {
            InterestCategory::Clubs => &mut self.clubs,
            InterestCategory::VideoGames => &mut self.video_games,
            InterestCategory::Hobbies => &mut self.hobbies,
            InterestCategory::CareerAspirations => &mut self.career_aspirations,
            InterestCategory::Classes => &mut self.classes,
            InterestCategory::Pets => &mut self.pets,
            InterestCategory::Sports => &mut self.sports,
        }
    }

    /// School name, treating an empty string as unset.
    pub fn school(&self) -> Option<&str> {
        self.school.as_deref().filter(|s| !s.is_empty())
    }

    /// Raw (un-normalized) set of items in a category.
    pub fn item_set(&self, category: InterestCategory) -> BTreeSet<&str> {
        self.items(category).iter().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.school().is_none() && InterestCategory::all().all(|c| self.items(c).is_empty())
    }

    pub fn item_count(&self) -> usize {
        InterestCategory::all().map(|c| self.items(c).len()).sum()
    }
}


#[derive(Default)]
pub struct InterestProfileBuilder {
    profile: InterestProfile,
}

impl InterestProfileBuilder {
    pub fn school(mut self, school: impl Into<String>) -> Self {
        self.profile.school = Some(school.into());
        self
    }

    pub fn category<I, S>(mut self, category: InterestCategory, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profile
            .items_mut(category)
            .extend(items.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> InterestProfile {
        self.profile
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub interests: InterestProfile,
}

impl CandidateUser {
    pub fn new(id: impl Into<String>, interests: InterestProfile) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            interests,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateGroup {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl CandidateGroup {
    pub fn new<I, S>(id: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: None,
            description: None,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}


/// Exact raw-string overlap between two profiles, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonInterests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(flatten)]
    pub categories: BTreeMap<InterestCategory, Vec<String>>,
}

impl CommonInterests {
    pub fn get(&self, category: InterestCategory) -> Option<&[String]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.school.is_none() && self.categories.is_empty()
    }
}
