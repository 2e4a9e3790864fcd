// Integration tests for the bundled page dataset.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use picture_order_quiz::quiz::{Dataset, FIRST_PAGE, StaticDataset, builtin};

#[test]
fn builtin_pages_are_contiguous_from_one() {
    let ds = builtin();
    assert!(!ds.is_empty());
    assert!(ds.page(0).is_none(), "page 0 is reserved");
    for (expected, (number, _)) in (FIRST_PAGE..).zip(ds.pages()) {
        assert_eq!(number, expected, "page numbering has a gap");
    }
}

#[test]
fn builtin_questions_are_solvable() {
    for (number, page) in builtin().pages() {
        assert!(!page.question.is_empty(), "page {} has an empty question", number);
        for item in &page.question {
            assert!(page.images.contains(item), "page {}: '{}' missing from options", number, item);
        }
    }
}

#[test]
fn builtin_options_are_unique_image_paths() {
    for (number, page) in builtin().pages() {
        let mut seen = HashSet::new();
        for item in &page.images {
            assert!(seen.insert(item.as_str()), "duplicate option '{}' on page {}", item, number);
            assert!(item.as_str().starts_with("images/"), "option '{}' is not under images/", item);
            assert!(item.as_str().ends_with(".png"), "option '{}' is not a png", item);
        }
        assert!(page.images.len() > page.question.iter().collect::<HashSet<_>>().len(), "page {} has no distractor", number);
    }
}

#[test]
fn builtin_passes_full_validation() {
    let pages: Vec<_> = builtin().pages().map(|(_, p)| p.clone()).collect();
    let revalidated = StaticDataset::from_pages(pages).expect("builtin dataset validates");
    assert_eq!(revalidated.len(), builtin().len());
}
