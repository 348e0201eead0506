//! Tree layout builder
//!
//! Turns grouped records into an abstract tree of generation bands and person
//! cards. Cards carry logical positions only; measured geometry comes from
//! the render surface once the tree is attached.

use super::grouping::Generations;
use crate::core::labels::Labels;
use crate::core::models::PersonRecord;
use std::fmt;

/// Photo shown on a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Photo {
    /// Image loaded from the record's photo URL
    Url(String),
    /// Fixed placeholder image carrying the given caption
    Placeholder(String),
}

/// One rendered person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonCard {
    /// Element id, `person-{ID}`
    pub element_id: String,
    /// `ID` of the person
    pub person_id: String,
    /// Photo or placeholder
    pub photo: Photo,
    /// Name label, em-dash when the name is missing
    pub name: String,
    /// Life span label
    pub life_span: String,
    /// Index of the owning band
    pub band: usize,
    /// Position inside the band, left to right
    pub slot: usize,
}

impl PersonCard {
    /// Build the card for one person
    #[must_use]
    pub fn from_person(person: &PersonRecord, labels: &Labels, band: usize, slot: usize) -> Self {
        let photo = person.photo_url.as_ref().map_or_else(
            || Photo::Placeholder(labels.no_photo.to_string()),
            |url| Photo::Url(url.clone()),
        );

        Self {
            element_id: person.element_id(),
            person_id: person.id.clone(),
            photo,
            name: person
                .name
                .clone()
                .unwrap_or_else(|| labels.missing_name.to_string()),
            life_span: labels.life_span(person.birth_date.as_deref(), person.death_date.as_deref()),
            band,
            slot,
        }
    }
}

/// One horizontal band of cards sharing a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationBand {
    /// Generation key as written in the sheet
    pub key: String,
    /// Band label, e.g. "Поколение 2"
    pub label: String,
    /// Cards in stored record order
    pub cards: Vec<PersonCard>,
}

/// Full replacement tree for the render container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeLayout {
    /// Bands in numeric generation order
    pub bands: Vec<GenerationBand>,
}

impl TreeLayout {
    /// Lay out grouped generations
    #[must_use]
    pub fn build(generations: &Generations, labels: &Labels) -> Self {
        let bands = generations
            .iter()
            .enumerate()
            .map(|(band_index, (key, people))| GenerationBand {
                key: key.to_string(),
                label: labels.generation_label(key.as_str()),
                cards: people
                    .iter()
                    .enumerate()
                    .map(|(slot, person)| PersonCard::from_person(person, labels, band_index, slot))
                    .collect(),
            })
            .collect();

        Self { bands }
    }

    /// Card count of every band, top to bottom
    #[must_use]
    pub fn band_sizes(&self) -> Vec<usize> {
        self.bands.iter().map(|band| band.cards.len()).collect()
    }

    /// All cards, band by band
    pub fn cards(&self) -> impl Iterator<Item = &PersonCard> {
        self.bands.iter().flat_map(|band| band.cards.iter())
    }

    /// Find a card by element id
    #[must_use]
    pub fn card(&self, element_id: &str) -> Option<&PersonCard> {
        self.cards().find(|card| card.element_id == element_id)
    }

    /// Total number of cards
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.bands.iter().map(|band| band.cards.len()).sum()
    }
}

impl fmt::Display for TreeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Family tree ({} generations, {} people):",
            self.bands.len(),
            self.card_count()
        )?;

        for band in &self.bands {
            writeln!(f)?;
            writeln!(f, "  {}", band.label)?;
            for card in &band.cards {
                writeln!(f, "    [{}] {} ({})", card.person_id, card.name, card.life_span)?;
            }
        }

        Ok(())
    }
}

/// What the render container shows after a rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeContent {
    /// No valid records: a single placeholder message
    NoData(String),
    /// The generation bands
    Tree(TreeLayout),
}

impl TreeContent {
    /// Build container content from validated records
    #[must_use]
    pub fn build(valid: &[PersonRecord], labels: &Labels) -> Self {
        if valid.is_empty() {
            return Self::NoData(labels.no_data.to_string());
        }
        let generations = Generations::from_records(valid);
        Self::Tree(TreeLayout::build(&generations, labels))
    }

    /// The tree, when there is one
    #[must_use]
    pub const fn layout(&self) -> Option<&TreeLayout> {
        match self {
            Self::Tree(layout) => Some(layout),
            Self::NoData(_) => None,
        }
    }
}
