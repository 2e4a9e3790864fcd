//! Page datasets: the question sequence and option pool for every page.
//!
//! Pages are numbered from 1; page 0 is reserved and never holds data. JSON
//! input uses the same shape as the web build's `data.json`:
//! `{ "1": { "question": [..], "images": [..] }, "2": { .. } }`.

use std::collections::BTreeMap;

use super::placement::ItemRef;
use crate::error::DatasetError;

use super::{quiz_page1, quiz_page2, quiz_page3, quiz_page4};

pub const FIRST_PAGE: u32 = 1;

/// One quiz page.
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Target order the user must rebuild.
    pub question: Vec<ItemRef>,
    /// Unordered option pool shown below the answer box.
    pub images: Vec<ItemRef>,
}

impl Page {
    pub fn from_static(question: &[&str], images: &[&str]) -> Self {
        Self {
            question: question.iter().map(|s| ItemRef::from(*s)).collect(),
            images: images.iter().map(|s| ItemRef::from(*s)).collect(),
        }
    }
}

/// Read-only page source injected into the session.
pub trait Dataset {
    fn page(&self, number: u32) -> Option<&Page>;

    fn has_page(&self, number: u32) -> bool {
        self.page(number).is_some()
    }
}

/// Dataset held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticDataset {
    pages: BTreeMap<u32, Page>,
}

impl StaticDataset {
    /// Validates numbering (contiguous from 1) and page contents.
    pub fn new(pages: BTreeMap<u32, Page>) -> Result<Self, DatasetError> {
        if pages.is_empty() {
            return Err(DatasetError::NoPages);
        }
        if pages.contains_key(&0) {
            return Err(DatasetError::ReservedPageZero);
        }
        for (expected, (&found, page)) in (FIRST_PAGE..).zip(pages.iter()) {
            if found != expected {
                return Err(DatasetError::PageGap { expected, found });
            }
            validate_page(found, page)?;
        }
        Ok(Self { pages })
    }

    /// Numbers `pages` from 1 in iteration order.
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Result<Self, DatasetError> {
        Self::new((FIRST_PAGE..).zip(pages).collect())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let pages: BTreeMap<u32, Page> = serde_json::from_str(json)?;
        Self::new(pages)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = (u32, &Page)> {
        self.pages.iter().map(|(n, p)| (*n, p))
    }
}

impl Dataset for StaticDataset {
    fn page(&self, number: u32) -> Option<&Page> {
        self.pages.get(&number)
    }
}

fn validate_page(number: u32, page: &Page) -> Result<(), DatasetError> {
    if page.question.is_empty() {
        return Err(DatasetError::EmptyQuestion { page: number });
    }
    if let Some(missing) = page.question.iter().find(|q| !page.images.contains(q)) {
        return Err(DatasetError::MissingOption { page: number, item: missing.to_string() });
    }
    Ok(())
}

/// Pages bundled with the crate, used by `start_quiz()`.
pub fn builtin() -> StaticDataset {
    let pages = [
        Page::from_static(&quiz_page1::PAGE1_QUESTION, &quiz_page1::PAGE1_IMAGES),
        Page::from_static(&quiz_page2::PAGE2_QUESTION, &quiz_page2::PAGE2_IMAGES),
        Page::from_static(&quiz_page3::PAGE3_QUESTION, &quiz_page3::PAGE3_IMAGES),
        Page::from_static(&quiz_page4::PAGE4_QUESTION, &quiz_page4::PAGE4_IMAGES),
    ];
    StaticDataset { pages: (FIRST_PAGE..).zip(pages).collect() }
}
