//! Plain-text rendering of the product list

use crate::forms::FieldErrors;
use crate::products::{LoadState, ProductListView};
use catalog_core::Product;
use catalog_core::format::{format_price_rub, format_rating, is_low_rating, or_dash};
use std::fmt::Write as _;

const HEADERS: [&str; 5] = ["Title", "Brand", "SKU", "Rating", "Price, RUB"];

/// Suffix appended to a flagged rating
pub const LOW_RATING_MARK: &str = " !";

/// Placeholder for a product without a category
pub const NO_CATEGORY: &str = "—";

fn title_cell(product: &Product) -> String {
    format!(
        "{} ({})",
        product.title,
        product.category.as_deref().unwrap_or(NO_CATEGORY)
    )
}

fn rating_cell(rating: f64) -> String {
    let mut cell = format_rating(rating);
    if is_low_rating(rating) {
        cell.push_str(LOW_RATING_MARK);
    }
    cell
}

fn row(product: &Product) -> [String; 5] {
    [
        title_cell(product),
        or_dash(product.brand.as_deref()).to_string(),
        or_dash(product.sku.as_deref()).to_string(),
        rating_cell(product.rating),
        format_price_rub(product.price),
    ]
}

/// Table of products with a header row
#[must_use]
pub fn render_table(products: &[&Product]) -> String {
    let rows: Vec<[String; 5]> = products.iter().map(|p| row(p)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(str::to_string);
    for cells in std::iter::once(&header).chain(&rows) {
        let line = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                // Prices are right-aligned
                if i == HEADERS.len() - 1 {
                    format!("{cell:>width$}")
                } else {
                    format!("{cell:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Page buttons with the current page bracketed
#[must_use]
pub fn render_pagination(view: &ProductListView<'_>) -> String {
    let current = view.query().page();
    let buttons = view
        .page_buttons()
        .into_iter()
        .map(|p| {
            if p == current {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("‹ {buttons} ›")
}

/// `Shown a-b of total`, marked while a request is in flight
#[must_use]
pub fn render_footer(view: &ProductListView<'_>) -> String {
    let (from, to) = view.shown_range();
    let mut footer = format!("Shown {from}-{to} of {}", view.total());
    if view.is_fetching() {
        footer.push_str(" • refreshing…");
    }
    footer
}

/// Whole product screen: status line or table, then footer and pagination
#[must_use]
pub fn render_products(view: &ProductListView<'_>) -> String {
    match view.state() {
        LoadState::Loading => "Loading…\n".to_string(),
        LoadState::Error(message) => format!("{message}\n"),
        LoadState::Loaded | LoadState::Refetching => {
            let products = view.visible_products();
            let mut out = if products.is_empty() {
                "No products found\n".to_string()
            } else {
                render_table(&products)
            };
            let _ = writeln!(out, "\n{}", render_footer(view));
            let _ = writeln!(out, "{}", render_pagination(view));
            out
        }
    }
}

/// One `field: message` line per failing input
#[must_use]
pub fn render_field_errors(errors: &FieldErrors) -> String {
    errors.iter().fold(String::new(), |mut out, (field, message)| {
        let _ = writeln!(out, "  {field}: {message}");
        out
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::products::QueryState;
    use catalog_core::ProductsPage;
    use pretty_assertions::assert_eq;

    fn product(title: &str, rating: f64, category: Option<&str>) -> Product {
        Product {
            id: 1,
            title: title.to_string(),
            price: 48652.0,
            rating,
            brand: None,
            sku: Some("SKU-1".to_string()),
            category: category.map(str::to_string),
            thumbnail: None,
        }
    }

    fn page(products: Vec<Product>, total: u64, skip: u64) -> ProductsPage {
        ProductsPage {
            products,
            total,
            skip,
            limit: 10,
        }
    }

    fn view<'a>(
        query: &'a QueryState,
        result: Option<&'a ProductsPage>,
        state: &'a LoadState,
    ) -> ProductListView<'a> {
        ProductListView {
            query,
            result,
            local: &[],
            state,
            max_page_buttons: 5,
        }
    }

    #[test]
    fn test_row_cells() {
        let cells = row(&product("Lamp", 2.5, None));

        assert_eq!(cells[0], "Lamp (—)");
        assert_eq!(cells[1], "-");
        assert_eq!(cells[2], "SKU-1");
        assert_eq!(cells[3], "2.5/5 !");
        assert_eq!(cells[4], "48 652,00");
    }

    #[test]
    fn test_good_rating_is_not_flagged() {
        assert_eq!(rating_cell(4.94), "4.9/5");
        assert_eq!(rating_cell(3.0), "3.0/5");
    }

    #[test]
    fn test_table_columns_align() {
        let a = product("Lamp", 4.0, Some("home"));
        let b = product("Wireless Mouse", 4.0, Some("electronics"));
        let table = render_table(&[&a, &b]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Title"));
        let brand_col = lines[0].find("Brand").unwrap();
        assert_eq!(lines[1].chars().nth(brand_col), Some('-'));
        assert!(lines.iter().skip(1).all(|l| l.ends_with("48 652,00")));
    }

    #[test]
    fn test_footer_and_pagination() {
        let mut query = QueryState::new(10);
        query.set_page(2, Some(20));
        let result = page(vec![product("Lamp", 4.0, None)], 194, 10);
        let state = LoadState::Refetching;
        let view = view(&query, Some(&result), &state);

        assert_eq!(render_footer(&view), "Shown 11-20 of 194 • refreshing…");
        assert_eq!(render_pagination(&view), "‹ 1 [2] 3 4 5 ›");
    }

    #[test]
    fn test_loading_and_error_screens() {
        let query = QueryState::new(10);
        let loading = LoadState::Loading;
        assert_eq!(render_products(&view(&query, None, &loading)), "Loading…\n");

        let failed = LoadState::Error("Failed to load products".to_string());
        assert_eq!(
            render_products(&view(&query, None, &failed)),
            "Failed to load products\n"
        );
    }

    #[test]
    fn test_empty_result() {
        let query = QueryState::new(10);
        let result = page(Vec::new(), 0, 0);
        let state = LoadState::Loaded;
        let out = render_products(&view(&query, Some(&result), &state));

        assert!(out.starts_with("No products found"));
        assert!(out.contains("Shown 1-0 of 0"));
        assert!(out.contains("‹ [1] ›"));
    }

    #[test]
    fn test_field_errors() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        errors.insert("price", "Price is required");

        assert_eq!(
            render_field_errors(&errors),
            "  price: Price is required\n  title: Title is required\n"
        );
    }
}
