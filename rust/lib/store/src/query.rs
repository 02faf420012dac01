use std::cmp::Ordering;
use std::sync::Arc;

type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Filter, order and limit over a collection snapshot.
///
/// Without `order_by` results keep fetch order. Sorting is stable.
pub struct Query<T> {
    filters: Vec<Filter<T>>,
    order: Option<Comparator<T>>,
    limit: Option<usize>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            order: self.order.clone(),
            limit: self.limit,
        }
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }
}

impl<T> Query<T> {
    /// Every document, in fetch order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep documents for which `pred` holds. Multiple filters are ANDed.
    pub fn filter<F>(mut self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(pred));
        self
    }

    pub fn order_by<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.order = Some(Arc::new(cmp));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn matches(&self, doc: &T) -> bool {
        self.filters.iter().all(|f| f(doc))
    }

    pub fn apply(&self, docs: Vec<T>) -> Vec<T> {
        let mut out: Vec<T> = docs.into_iter().filter(|d| self.matches(d)).collect();
        if let Some(cmp) = &self.order {
            out.sort_by(|a, b| cmp(a, b));
        }
        if let Some(n) = self.limit {
            out.truncate(n);
        }
        out
    }
}
