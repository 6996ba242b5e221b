use super::UiEvent;
use crate::covers::CoverCache;
use eframe::egui;
use library_catalog::{Book, BookId, BrowseState, Catalog, CategoryFilter, StarRating};

const CARD_WIDTH: f32 = 180.0;

/// Which list the main page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogView {
    #[default]
    Browse,
    Favorites,
    SearchResults {
        term: String,
        books: Vec<BookId>,
    },
}

impl CatalogView {
    /// View for a submitted search; a blank term goes back to browsing
    pub fn for_search(catalog: &Catalog, term: &str) -> Self {
        match catalog.search(term) {
            Some(results) => CatalogView::SearchResults {
                term: term.trim().to_string(),
                books: results.iter().map(|book| book.id).collect(),
            },
            None => CatalogView::Browse,
        }
    }
}

/// Everything the catalog page reads while drawing
pub struct CatalogPage<'a> {
    pub catalog: &'a Catalog,
    pub browse: &'a BrowseState,
    pub view: &'a CatalogView,
    pub favorites: &'a [BookId],
    pub covers: &'a mut CoverCache,
    pub scroll_to_top: bool,
}

pub fn show_catalog(ui: &mut egui::Ui, page: CatalogPage<'_>, events: &mut Vec<UiEvent>) {
    let mut scroll = egui::ScrollArea::vertical().id_salt("catalog_scroll");
    if page.scroll_to_top {
        scroll = scroll.vertical_scroll_offset(0.0);
    }

    scroll.show(ui, |ui| {
        show_hero(ui, page.catalog);
        ui.add_space(8.0);
        show_navigation(ui, page.view, page.favorites.len(), events);
        ui.separator();

        match page.view {
            CatalogView::Browse => {
                show_browse(ui, page.catalog, page.browse, page.favorites, page.covers, events)
            }
            CatalogView::Favorites => {
                ui.heading("المفضلة");
                let books: Vec<&Book> = page
                    .favorites
                    .iter()
                    .filter_map(|id| page.catalog.get(*id))
                    .collect();
                if books.is_empty() {
                    ui.label("لا توجد كتب في المفضلة بعد");
                } else {
                    show_book_grid(ui, page.catalog, &books, page.favorites, page.covers, events);
                }
            }
            CatalogView::SearchResults { term, books } => {
                ui.horizontal(|ui| {
                    ui.heading(format!("نتائج البحث عن: {} ({})", term, books.len()));
                    if ui.button("✕ مسح").clicked() {
                        events.push(UiEvent::ShowView(CatalogView::Browse));
                    }
                });
                let books: Vec<&Book> = books.iter().filter_map(|id| page.catalog.get(*id)).collect();
                if books.is_empty() {
                    ui.label("لا توجد نتائج");
                } else {
                    show_book_grid(ui, page.catalog, &books, page.favorites, page.covers, events);
                }
            }
        }
    });
}

fn show_hero(ui: &mut egui::Ui, catalog: &Catalog) {
    let stats = catalog.statistics();
    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("المكتبة الإسلامية").size(28.0).strong());
        ui.label("مكتبة إلكترونية مجانية بدون إعلانات");
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            stat(ui, &stats.books_label(), "كتاب");
            stat(ui, &stats.authors_label(), "مؤلف");
            stat(ui, &stats.downloads_label(), "تحميل");
        });
    });
}

fn stat(ui: &mut egui::Ui, value: &str, caption: &str) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(value).size(20.0).strong());
            ui.label(caption);
        });
    });
}

fn show_navigation(ui: &mut egui::Ui, view: &CatalogView, favorites: usize, events: &mut Vec<UiEvent>) {
    ui.horizontal(|ui| {
        if ui
            .selectable_label(matches!(view, CatalogView::Browse), "📚 الكتب")
            .clicked()
        {
            events.push(UiEvent::ShowView(CatalogView::Browse));
        }
        if ui
            .selectable_label(
                matches!(view, CatalogView::Favorites),
                format!("♥ المفضلة ({})", favorites),
            )
            .clicked()
        {
            events.push(UiEvent::ShowView(CatalogView::Favorites));
        }
        if ui.button("🔍 بحث (Ctrl+K)").clicked() {
            events.push(UiEvent::OpenSearch);
        }
    });
}

fn show_browse(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    browse: &BrowseState,
    favorites: &[BookId],
    covers: &mut CoverCache,
    events: &mut Vec<UiEvent>,
) {
    let counts = catalog.category_counts();

    egui::CollapsingHeader::new("📂 التصنيفات")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for category in &counts {
                    let card = ui.group(|ui| {
                        ui.vertical(|ui| {
                            ui.strong(&category.name);
                            ui.label(format!("{} كتاب", category.count));
                        });
                    });
                    if card.response.interact(egui::Sense::click()).clicked() {
                        events.push(UiEvent::SetFilter(CategoryFilter::Category(category.key.clone())));
                    }
                }
            });
        });

    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui| {
        if ui
            .selectable_label(*browse.filter() == CategoryFilter::All, "الكل")
            .clicked()
        {
            events.push(UiEvent::SetFilter(CategoryFilter::All));
        }
        for category in &counts {
            let selected = browse.filter().key() == category.key;
            if ui.selectable_label(selected, &category.name).clicked() {
                events.push(UiEvent::SetFilter(CategoryFilter::Category(category.key.clone())));
            }
        }
    });
    ui.add_space(6.0);

    let listing = browse.listing(catalog);
    if listing.books.is_empty() {
        ui.label("لا توجد كتب في هذا التصنيف");
        return;
    }

    show_book_grid(ui, catalog, &listing.books, favorites, covers, events);

    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        ui.weak(format!("{} من {}", listing.books.len(), listing.total));
        if listing.has_more && ui.button("تحميل المزيد").clicked() {
            events.push(UiEvent::LoadMore);
        }
    });
}

fn show_book_grid(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    books: &[&Book],
    favorites: &[BookId],
    covers: &mut CoverCache,
    events: &mut Vec<UiEvent>,
) {
    ui.horizontal_wrapped(|ui| {
        for book in books {
            let favorite = favorites.contains(&book.id);
            ui.allocate_ui(egui::vec2(CARD_WIDTH, 0.0), |ui| {
                book_card(ui, catalog, book, favorite, covers, events);
            });
        }
    });
}

fn book_card(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    book: &Book,
    favorite: bool,
    covers: &mut CoverCache,
    events: &mut Vec<UiEvent>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH - 12.0);
        ui.vertical(|ui| {
            if let Some(badge) = &book.badge {
                ui.small(egui::RichText::new(badge).color(egui::Color32::from_rgb(230, 126, 34)));
            }

            let cover = covers.get(ui.ctx(), catalog, book);
            let cover_response = match cover {
                Some(texture) => ui.add(
                    egui::Image::new((texture.id(), texture.size_vec2()))
                        .max_width(CARD_WIDTH - 20.0)
                        .sense(egui::Sense::click()),
                ),
                None => ui.add(
                    egui::Button::new(egui::RichText::new("📖").size(48.0))
                        .min_size(egui::vec2(CARD_WIDTH - 20.0, 120.0)),
                ),
            };
            if cover_response.clicked() {
                events.push(UiEvent::SelectBook(book.id));
            }

            ui.strong(&book.title);
            ui.weak(&book.author);
            ui.label(format!(
                "{} {:.1}",
                StarRating::from_rating(book.rating).symbols(),
                book.rating
            ));
            ui.small(format!("{} صفحة · {}", book.pages, book.category_name));

            ui.horizontal(|ui| {
                let heart = if favorite { "♥" } else { "♡" };
                if ui.button(heart).on_hover_text("المفضلة").clicked() {
                    events.push(UiEvent::ToggleFavorite(book.id));
                }
                if ui.button("التفاصيل").clicked() {
                    events.push(UiEvent::SelectBook(book.id));
                }
                if ui.button("اقرأ").clicked() {
                    events.push(UiEvent::ReadBook(book.id));
                }
            });
        });
    });
}
