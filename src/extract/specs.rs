use crate::domain::product::MAX_SPECIFICATIONS;
use crate::domain::ElementRule;
use crate::extract::{descendants_named, element_text, Snapshot};

/// Key/value rows of the first specifications container.
///
/// Rows need at least two cells; the first two become key and value. Rows
/// with an empty key or value are skipped. At most [`MAX_SPECIFICATIONS`].
pub fn specifications(snapshot: &Snapshot, container: &ElementRule) -> Vec<(String, String)> {
    let Some(container) = snapshot.find(container) else {
        return Vec::new();
    };

    descendants_named(container, &["tr"])
        .filter_map(|row| {
            let mut cells = descendants_named(row, &["th", "td"]);
            let key = element_text(cells.next()?)?;
            let value = element_text(cells.next()?)?;
            Some((key, value))
        })
        .take(MAX_SPECIFICATIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SiteSelectors;

    fn rule() -> ElementRule {
        SiteSelectors::default().specifications
    }

    #[test]
    fn test_rows_become_pairs() {
        let snapshot = Snapshot::parse(
            r#"<div class="specifications-list"><table>
                <tr><th>Brand</th><td>Apple</td></tr>
                <tr><th>Color</th><td> Black </td></tr>
                <tr><th>Only key</th></tr>
                <tr><th></th><td>orphan</td></tr>
                <tr><th>Weight</th><td>6.02 ounces</td></tr>
            </table></div>"#,
        );
        assert_eq!(
            specifications(&snapshot, &rule()),
            vec![
                ("Brand".to_string(), "Apple".to_string()),
                ("Color".to_string(), "Black".to_string()),
                ("Weight".to_string(), "6.02 ounces".to_string()),
            ]
        );
    }

    #[test]
    fn test_rows_capped_at_five() {
        let rows: String = (0..8)
            .map(|i| format!("<tr><td>k{i}</td><td>v{i}</td></tr>"))
            .collect();
        let snapshot = Snapshot::parse(&format!(
            r#"<section class="product-specification"><table>{rows}</table></section>"#
        ));
        let specs = specifications(&snapshot, &rule());
        assert_eq!(specs.len(), MAX_SPECIFICATIONS);
        assert_eq!(specs[4], ("k4".to_string(), "v4".to_string()));
    }

    #[test]
    fn test_no_container() {
        let snapshot = Snapshot::parse("<table><tr><td>a</td><td>b</td></tr></table>");
        assert!(specifications(&snapshot, &rule()).is_empty());
    }
}
