use farmstall_model::Category;

use super::contains_ignore_case;

/// Categories whose name or description contains `term`, ignoring case.
pub fn search_categories<'a>(categories: &'a [Category], term: &str) -> Vec<&'a Category> {
    let term = term.trim();
    categories
        .iter()
        .filter(|c| {
            contains_ignore_case(&c.name, term)
                || c.description
                    .as_deref()
                    .is_some_and(|d| contains_ignore_case(d, term))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, description: Option<&str>) -> Category {
        Category {
            id: name.to_lowercase().into(),
            name: name.to_string(),
            description: description.map(str::to_string),
            ..Category::default()
        }
    }

    #[test]
    fn matches_name_or_description() {
        let categories = vec![
            category("Dairy", Some("Milk, cheese and butter")),
            category("Eggs", None),
            category("Bakery", Some("Fresh bread")),
        ];

        let hits: Vec<_> = search_categories(&categories, "CHEESE").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(hits, ["Dairy"]);

        let hits: Vec<_> = search_categories(&categories, "eg").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(hits, ["Eggs"]);

        assert_eq!(search_categories(&categories, "  ").len(), 3);
    }
}
