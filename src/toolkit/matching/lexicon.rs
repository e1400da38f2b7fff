use std::collections::{HashMap, HashSet};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Word runs, clitics (`'s`, `'re`) and single punctuation marks.
    pub static ref TOKEN_PATTERN: Regex = Regex::new(r"'\w+|\w+|[^\w\s]")
        .expect("token pattern is a valid regex");

    /// Terms used for vector-space comparison: runs of two or more word characters.
    pub static ref TERM_PATTERN: Regex = Regex::new(r"\b\w\w+\b")
        .expect("term pattern is a valid regex");

    pub static ref LEXICON: Lexicon = Lexicon::english();
}


const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("freshmen", "freshman"),
    ("sportsmen", "sportsman"),
    ("children", "child"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wolves", "wolf"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("calves", "calf"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("alumni", "alumnus"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("data", "datum"),
    ("dice", "die"),
    ("quizzes", "quiz"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("rookies", "rookie"),
    ("selfies", "selfie"),
    ("smoothies", "smoothie"),
    ("goalies", "goalie"),
    ("calories", "calorie"),
    ("brownies", "brownie"),
    ("hoodies", "hoodie"),
    ("pies", "pie"),
    ("ties", "tie"),
    ("headaches", "headache"),
    ("niches", "niche"),
    ("caches", "cache"),
    ("quiches", "quiche"),
    ("moustaches", "moustache"),
    ("buses", "bus"),
    ("campuses", "campus"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("circuses", "circus"),
    ("choruses", "chorus"),
    ("octopuses", "octopus"),
    ("walruses", "walrus"),
    ("gases", "gas"),
    ("lenses", "lens"),
    ("atlases", "atlas"),
    ("canvases", "canvas"),
    ("tomatoes", "tomato"),
    ("potatoes", "potato"),
    ("heroes", "hero"),
    ("echoes", "echo"),
    ("volcanoes", "volcano"),
    ("mosquitoes", "mosquito"),
    ("dominoes", "domino"),
    ("tornadoes", "tornado"),
    ("torpedoes", "torpedo"),
    ("vetoes", "veto"),
    ("embargoes", "embargo"),
    ("superheroes", "superhero"),
];

/// Words that look plural but are their own base form.
const INVARIANT_WORDS: &[&str] = &[
    "series", "species", "news", "chess", "darts", "gas", "atlas", "canvas", "christmas",
    "lens", "diabetes", "rabies", "herpes", "sheep", "fish", "deer", "moose", "bison",
    "aircraft", "ramen", "anime", "this", "his", "was", "has", "yes", "always", "perhaps",
];

/// Endings that never lose their final `s`.
const PROTECTED_SUFFIXES: &[&str] = &["ss", "us", "is", "ics", "ous"];

/// Suffix detachment rules, longest first.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("s", ""),
];

const MIN_STEM_CHARS: usize = 2;

const MAX_REDUCTIONS: usize = 4;


/// Dictionary resources for reducing English nouns to their base form.
pub struct Lexicon {
    exceptions: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
}

impl Lexicon {
    pub fn english() -> Self {
        Self {
            exceptions: IRREGULAR_PLURALS.iter().copied().collect(),
            invariant: INVARIANT_WORDS.iter().copied().collect(),
        }
    }

    /// Reduce a lowercase token to its noun base form.
    ///
    /// Reductions are applied until the word stops changing, so the result
    /// is always a fixed point: `lemmatize(lemmatize(w)) == lemmatize(w)`.
    pub fn lemmatize(&self, token: &str) -> String {
        let mut current = token.to_string();
        for _ in 0..MAX_REDUCTIONS {
            match self.reduce_once(&current) {
                Some(next) if next != current => current = next,
                _ => return current,
            }
        }
        current
    }

    fn reduce_once(&self, word: &str) -> Option<String> {
        if !word.chars().all(char::is_alphabetic) || word.chars().count() <= MIN_STEM_CHARS {
            return None;
        }

        if let Some(base) = self.exceptions.get(word) {
            return Some((*base).to_string());
        }

        if self.invariant.contains(word) {
            return None;
        }

        if PROTECTED_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
            return None;
        }

        DETACHMENT_RULES.iter().find_map(|(suffix, replacement)| {
            let stem = word.strip_suffix(suffix)?;
            if stem.chars().count() < MIN_STEM_CHARS {
                return None;
            }
            Some(format!("{}{}", stem, replacement))
        })
    }
}


/// Split already-lowercased text into normalizer tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split a document into vector-space terms.
pub fn terms(text: &str) -> Vec<&str> {
    TERM_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}
