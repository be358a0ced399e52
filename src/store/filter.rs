use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::str::FromStr;

/// A record that can be found by free-text search and narrowed by one categorical value.
pub trait Searchable {
    /// The categorical value a record can be narrowed by, e.g. an invoice status.
    type Facet: PartialEq + Debug + Clone;

    /// The text fields that free-text search looks in.
    fn search_fields(&self) -> Vec<&str>;

    fn facet(&self) -> &Self::Facet;
}

/// An exact-match categorical filter where `All` matches everything.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice<C> {
    #[default]
    All,
    Only(C),
}

impl<C> Choice<C> {
    /// Reads a choice from user input. Absent, blank or `all` (any case) means `All`.
    pub fn parse(input: Option<&str>) -> Result<Self, C::Err>
    where
        C: FromStr,
    {
        match input.map(str::trim) {
            None => Ok(Choice::All),
            Some(s) if s.is_empty() || s.eq_ignore_ascii_case("all") => Ok(Choice::All),
            Some(s) => Ok(Choice::Only(C::from_str(s)?)),
        }
    }

    pub fn matches(&self, value: &C) -> bool
    where
        C: PartialEq,
    {
        match self {
            Choice::All => true,
            Choice::Only(c) => c == value,
        }
    }
}

/// The active search text and categorical choice for a list of records.
///
/// A record passes when the choice matches its facet and, if there is search text, at least one
/// of its search fields contains the text, ignoring case.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Filter<F> {
    /// Lowercased search text. `None` when there is nothing to search for.
    text: Option<String>,
    choice: Choice<F>,
}

impl<F> Filter<F>
where
    F: PartialEq + Debug + Clone,
{
    /// A filter that matches every record.
    pub fn all() -> Self {
        Self {
            text: None,
            choice: Choice::All,
        }
    }

    pub fn new(text: impl AsRef<str>, choice: Choice<F>) -> Self {
        Self::all().with_text(text).with_choice(choice)
    }

    /// Blank text clears the search.
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        let text = text.as_ref().trim();
        self.text = if text.is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        };
        self
    }

    pub fn with_choice(mut self, choice: Choice<F>) -> Self {
        self.choice = choice;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn choice(&self) -> &Choice<F> {
        &self.choice
    }

    pub fn is_match_all(&self) -> bool {
        self.text.is_none() && self.choice == Choice::All
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Searchable<Facet = F>,
    {
        if !self.choice.matches(record.facet()) {
            return false;
        }
        match &self.text {
            None => true,
            Some(needle) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }

    /// Returns the records that match, in their original order.
    pub fn apply<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: Searchable<Facet = F>,
    {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}
