use farmstall_model::{Category, Order, Product};

/// Anything listed in a dashboard table.
pub trait Identified {
    fn id_str(&self) -> &str;
}

impl Identified for Product {
    fn id_str(&self) -> &str {
        self.id.as_str()
    }
}

impl Identified for Category {
    fn id_str(&self) -> &str {
        self.id.as_str()
    }
}

impl Identified for Order {
    fn id_str(&self) -> &str {
        self.id.as_str()
    }
}

/// Local copy of a server-side collection kept in step with successful
/// mutations instead of being refetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList<T> {
    items: Vec<T>,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Handle for undoing an optimistic removal.
#[derive(Debug)]
#[must_use = "call commit or rollback once the request finishes"]
pub struct PendingRemoval<T> {
    index: usize,
    item: T,
}

impl<T: Identified + Clone> ResourceList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id_str() == id)
    }

    pub fn created(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the entry with the same id. Returns false if none matched.
    pub fn updated(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|i| i.id_str() == item.id_str()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn deleted(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|i| i.id_str() == id)?;
        Some(self.items.remove(index))
    }

    /// Remove now, before the server confirms.
    pub fn remove_optimistic(&mut self, id: &str) -> Option<PendingRemoval<T>> {
        let index = self.items.iter().position(|i| i.id_str() == id)?;
        let item = self.items.remove(index);
        Some(PendingRemoval { index, item })
    }

    /// Put an optimistically removed item back where it was.
    pub fn rollback(&mut self, pending: PendingRemoval<T>) {
        let index = pending.index.min(self.items.len());
        self.items.insert(index, pending.item);
    }
}

impl<T> PendingRemoval<T> {
    /// The server confirmed the removal.
    pub fn commit(self) -> T {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.into(),
            name: name.to_string(),
            ..Category::default()
        }
    }

    fn names(list: &ResourceList<Category>) -> Vec<&str> {
        list.items().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn mutations_reconcile_by_id() {
        let mut list = ResourceList::new(vec![category("1", "Dairy"), category("2", "Eggs")]);

        list.created(category("3", "Bakery"));
        assert!(list.updated(category("2", "Free-range eggs")));
        assert!(!list.updated(category("9", "Ghost")));
        assert_eq!(list.deleted("1").map(|c| c.name), Some("Dairy".to_string()));

        assert_eq!(names(&list), ["Free-range eggs", "Bakery"]);
    }

    #[test]
    fn optimistic_removal_rolls_back_in_place() {
        let mut list = ResourceList::new(vec![
            category("1", "Dairy"),
            category("2", "Eggs"),
            category("3", "Bakery"),
        ]);

        let pending = list.remove_optimistic("2").unwrap();
        assert_eq!(names(&list), ["Dairy", "Bakery"]);

        list.rollback(pending);
        assert_eq!(names(&list), ["Dairy", "Eggs", "Bakery"]);

        let pending = list.remove_optimistic("1").unwrap();
        assert_eq!(pending.commit().name, "Dairy");
        assert_eq!(list.len(), 2);
        assert!(list.remove_optimistic("missing").is_none());
    }
}
