//! Randomized action and completion sequences against the reader controller.

use library_catalog::{Book, BookId, Catalog, MemoryStore, ReadingPositions};
use proptest::prelude::*;
use reader_runtime::*;
use std::sync::Arc;

const PAGES: u32 = 12;

#[derive(Debug, Clone)]
enum Step {
    Action(ReaderAction),
    /// The worker finishes the outstanding render, if any
    Complete,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Action(ReaderAction::NextPage)),
        2 => Just(Step::Action(ReaderAction::PreviousPage)),
        2 => (0u32..=PAGES + 3).prop_map(|n| Step::Action(ReaderAction::JumpTo(n.to_string()))),
        1 => Just(Step::Action(ReaderAction::JumpTo("x".to_string()))),
        1 => Just(Step::Action(ReaderAction::ZoomIn)),
        1 => Just(Step::Action(ReaderAction::ZoomOut)),
        4 => Just(Step::Complete),
    ]
}

fn catalog() -> Catalog {
    let book = Book {
        id: BookId(1),
        title: "صحيح البخاري".to_string(),
        author: "البخاري".to_string(),
        category: "hadith".to_string(),
        category_name: "الحديث".to_string(),
        description: String::new(),
        cover: String::new(),
        pages: PAGES,
        rating: 5.0,
        downloads: 0,
        publish_year: 2000,
        publisher: String::new(),
        badge: None,
        pdf_file: Some("bukhari.pdf".to_string()),
    };
    Catalog::new(vec![book]).unwrap()
}

/// Track the single outstanding render. Fails if a second one is issued.
fn absorb(
    outstanding: &mut Option<RenderRequest>,
    effects: Vec<ReaderEffect>,
) -> std::result::Result<(), TestCaseError> {
    let renders: Vec<RenderRequest> = effects
        .into_iter()
        .filter_map(|effect| match effect {
            ReaderEffect::Render(request) => Some(request),
            _ => None,
        })
        .collect();

    prop_assert!(renders.len() <= 1, "several renders issued at once: {:?}", renders);
    if let Some(request) = renders.into_iter().next() {
        prop_assert!(
            outstanding.is_none(),
            "render {:?} issued while {:?} in flight",
            request,
            outstanding
        );
        prop_assert!((1..=PAGES).contains(&request.page));
        *outstanding = Some(request);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_one_render_in_flight_and_display_settles(steps in prop::collection::vec(step(), 0..60)) {
        let catalog = catalog();
        let mut controller = ReaderController::new(ReadingPositions::new(Arc::new(MemoryStore::new())));

        let effects = controller.open(&catalog, BookId(1)).unwrap();
        let doc_id = match effects.last() {
            Some(ReaderEffect::Load { doc_id, .. }) => *doc_id,
            other => panic!("Expected Load effect, got {:?}", other),
        };

        let mut outstanding = None;
        absorb(&mut outstanding, controller.document_loaded(doc_id, PAGES))?;
        prop_assert!(outstanding.is_some());

        for step in steps {
            let effects = match step {
                Step::Action(action) => controller.dispatch(action),
                Step::Complete => match outstanding.take() {
                    Some(request) => controller.page_rendered(request),
                    None => Vec::new(),
                },
            };
            absorb(&mut outstanding, effects)?;

            let snapshot = controller.snapshot().unwrap();
            prop_assert_eq!(snapshot.rendering, outstanding.is_some());
            prop_assert!((1..=PAGES).contains(&snapshot.current_page));
        }

        // Let the worker drain everything still in flight
        let mut last = None;
        while let Some(request) = outstanding.take() {
            last = Some(request);
            absorb(&mut outstanding, controller.page_rendered(request))?;
        }

        let snapshot = controller.snapshot().unwrap();
        prop_assert!(!snapshot.rendering);
        prop_assert_eq!(snapshot.displayed_page, Some(snapshot.current_page));
        if let Some(last) = last {
            prop_assert_eq!(last.page, snapshot.current_page);
            prop_assert_eq!((last.scale * 100.0).round() as u32, snapshot.zoom_percent);
        }
    }
}
