//! Small text and layout helpers used by the panels.

use ratatui::layout::Rect;

/// The part of `area` inside `bounds`, or `None` when they do not overlap.
pub fn clip(area: Rect, bounds: Rect) -> Option<Rect> {
    if area.intersects(bounds) {
        Some(area.intersection(bounds))
    } else {
        None
    }
}

/// Title-case a search term the way the name box shows it.
///
/// A letter is upper-cased when it follows a non-letter (or starts the
/// string); every other letter is lower-cased. `mr-mime` -> `Mr-Mime`.
pub fn title_case(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    let mut prev_is_letter = false;
    for c in term.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Join names with `", "`. A single name comes back unchanged.
pub fn join_names(names: &[String]) -> String {
    names.join(", ")
}

/// Label for the hidden-ability line.
pub fn hidden_label(hidden: Option<&str>) -> String {
    match hidden {
        Some(name) => format!("{} (hidden)", name),
        None => "(no hidden ability)".to_string(),
    }
}

/// Render a value stored in tenths with exactly one decimal: `60` -> `6.0`.
pub fn tenths(raw: u32) -> String {
    format!("{}.{}", raw / 10, raw % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_disjoint_is_none() {
        let bounds = Rect::new(0, 0, 40, 10);
        assert_eq!(clip(Rect::new(76, 0, 44, 3), bounds), None);
        assert_eq!(clip(Rect::new(0, 0, 0, 0), bounds), None);
        assert_eq!(
            clip(Rect::new(30, 5, 30, 15), bounds),
            Some(Rect::new(30, 5, 10, 5))
        );
    }

    #[test]
    fn title_case_simple_and_hyphenated() {
        assert_eq!(title_case("pikachu"), "Pikachu");
        assert_eq!(title_case("mr-mime"), "Mr-Mime");
        assert_eq!(title_case("ho-oh"), "Ho-Oh");
        assert_eq!(title_case("porygon2"), "Porygon2");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_lowercases_the_rest() {
        assert_eq!(title_case("tOGEKISS"), "Togekiss");
    }

    #[test]
    fn join_has_no_artifact_for_one_entry() {
        assert_eq!(join_names(&["fire".to_string()]), "fire");
        assert_eq!(
            join_names(&["grass".to_string(), "poison".to_string()]),
            "grass, poison"
        );
        assert_eq!(join_names(&[]), "");
    }

    #[test]
    fn hidden_ability_labels() {
        assert_eq!(hidden_label(Some("static")), "static (hidden)");
        assert_eq!(hidden_label(None), "(no hidden ability)");
    }

    #[test]
    fn tenths_always_has_one_decimal() {
        assert_eq!(tenths(60), "6.0");
        assert_eq!(tenths(4), "0.4");
        assert_eq!(tenths(9999), "999.9");
        assert_eq!(tenths(0), "0.0");
    }
}
